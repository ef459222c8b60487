//! Error type for `roster-gemini`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("gemini returned {status}: {body}")]
  Status {
    status: reqwest::StatusCode,
    body:   String,
  },

  #[error("prompt blocked: {0}")]
  Blocked(String),

  #[error("response contained no text")]
  Empty,
}

impl From<Error> for roster_core::Error {
  fn from(e: Error) -> Self { Self::generation(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
