//! Error type for `roster-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("i/o error at {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json encode error for {}: {source}", path.display())]
  Encode {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl From<Error> for roster_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(e) => e,
      Error::Io { path, source } => Self::Storage {
        path,
        source: Box::new(source),
      },
      Error::Encode { path, source } => Self::Storage {
        path,
        source: Box::new(source),
      },
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
