//! Google Gemini client for Roster.
//!
//! Implements [`roster_core::generate::TextGenerator`] over the
//! `generateContent` REST endpoint. One request per call; failures are not
//! retried.

mod client;
mod types;

pub mod error;

pub use client::{GeminiClient, GeminiConfig, default_base_url, default_model};
pub use error::{Error, Result};
