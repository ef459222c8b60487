//! JSON-file backend for the Roster store.
//!
//! The face registry and the attendance log each live in a single JSON
//! document. All file access goes through [`tokio::fs`] so no request blocks
//! the async runtime.

mod store;

pub mod document;
pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;

#[cfg(test)]
mod tests;
