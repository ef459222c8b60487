//! Source of "today" for status resolution.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date. Read once per request so a batch
/// resolution sees a single `today`.
pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// A clock pinned to one date; useful for testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}
