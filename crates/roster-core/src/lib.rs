//! Core types and trait definitions for the Roster attendance service.
//!
//! This crate is deliberately free of HTTP and file-system dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod calendar;
pub mod clock;
pub mod error;
pub mod face;
pub mod generate;
pub mod resolve;
pub mod status;
pub mod store;

pub use error::{Error, Result};
