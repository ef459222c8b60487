//! Error types for `roster-core`.
//!
//! This is the closed set of failure kinds every layer reports. The HTTP layer
//! maps each variant to a status code; nothing is re-wrapped into a generic
//! message before it reaches that boundary.

use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date for `{field}`: {value:?} (expected YYYY-MM-DD)")]
  InvalidDate { field: &'static str, value: String },

  #[error("invalid month: {0:?} (expected YYYY-MM)")]
  InvalidMonth(String),

  #[error("invalid status {0:?} (expected Present, Absent or Leave)")]
  InvalidStatus(String),

  #[error("missing required field `{0}`")]
  MissingField(&'static str),

  #[error("face not found: {0}")]
  FaceNotFound(String),

  #[error("label already in use: {0}")]
  LabelTaken(String),

  #[error("storage error at {}: {source}", path.display())]
  Storage {
    path:   PathBuf,
    #[source]
    source: BoxError,
  },

  #[error("generation error: {0}")]
  Generation(#[source] BoxError),
}

impl Error {
  /// Wrap any upstream failure of the text-generation dependency.
  pub fn generation(e: impl Into<BoxError>) -> Self {
    Self::Generation(e.into())
  }

  /// `true` for failures caused by the caller's input rather than by the
  /// service or its dependencies.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::InvalidDate { .. }
        | Self::InvalidMonth(_)
        | Self::InvalidStatus(_)
        | Self::MissingField(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
