//! The session calendar: when tracking starts, the weekly rest day, and the
//! configured holidays.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The wire and storage format for every date in the service.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A named non-working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
  pub date: NaiveDate,
  pub name: String,
}

/// Calendar rules shared by every resolution. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCalendar {
  /// First tracked day; anything earlier is outside the session.
  pub session_start: NaiveDate,
  /// Weekly day that is always a holiday.
  #[serde(default = "default_rest_day")]
  pub rest_day:      Weekday,
  #[serde(default)]
  pub holidays:      Vec<Holiday>,
}

fn default_rest_day() -> Weekday { Weekday::Sun }

impl Default for SessionCalendar {
  fn default() -> Self {
    Self {
      session_start: NaiveDate::from_ymd_opt(2025, 8, 1)
        .expect("2025-08-01 is a valid date"),
      rest_day:      default_rest_day(),
      holidays:      default_holidays(),
    }
  }
}

impl SessionCalendar {
  pub fn new(session_start: NaiveDate, holidays: Vec<Holiday>) -> Self {
    Self { session_start, rest_day: default_rest_day(), holidays }
  }

  /// `true` if `date` is before the first tracked day.
  pub fn before_session(&self, date: NaiveDate) -> bool {
    date < self.session_start
  }

  /// `true` if `date` falls on the weekly rest day.
  pub fn is_rest_day(&self, date: NaiveDate) -> bool {
    date.weekday() == self.rest_day
  }

  /// The configured holiday on `date`, if any.
  pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
    self.holidays.iter().find(|h| h.date == date)
  }
}

/// The built-in holiday list used when none is configured.
pub fn default_holidays() -> Vec<Holiday> {
  [(2025, 8, 15, "Independence Day"), (2025, 10, 2, "Gandhi Jayanti")]
    .into_iter()
    .filter_map(|(y, m, d, name)| {
      NaiveDate::from_ymd_opt(y, m, d).map(|date| Holiday {
        date,
        name: name.to_owned(),
      })
    })
    .collect()
}

/// `true` if `value` has exactly the shape of `pattern`, where `D` stands for
/// an ASCII digit and every other byte must match literally.
fn has_shape(value: &str, pattern: &str) -> bool {
  value.len() == pattern.len()
    && value.bytes().zip(pattern.bytes()).all(|(v, p)| match p {
      b'D' => v.is_ascii_digit(),
      _ => v == p,
    })
}

/// Parse a `YYYY-MM-DD` string, naming `field` in the error.
///
/// Only the zero-padded form is accepted: no sign, no surrounding whitespace.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
  let invalid = || Error::InvalidDate {
    field,
    value: value.to_owned(),
  };
  if !has_shape(value, "DDDD-DD-DD") {
    return Err(invalid());
  }
  NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Parse a zero-padded `YYYY-MM` string into `(year, month)`.
pub fn parse_month(value: &str) -> Result<(i32, u32)> {
  let invalid = || Error::InvalidMonth(value.to_owned());
  if !has_shape(value, "DDDD-DD") {
    return Err(invalid());
  }
  let (y, m) = value.split_once('-').ok_or_else(invalid)?;
  let year: i32 = y.parse().map_err(|_| invalid())?;
  let month: u32 = m.parse().map_err(|_| invalid())?;
  NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
  Ok((year, month))
}
