//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Client errors carry a message that is safe to return verbatim. Server
/// errors keep their cause for the log and answer with a fixed message.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("storage failure: {0}")]
  Storage(#[source] roster_core::Error),

  #[error("ai service failure: {0}")]
  Upstream(#[source] roster_core::Error),
}

impl ApiError {
  /// Convert a backend error, keeping its kind.
  pub fn store<E: Into<roster_core::Error>>(e: E) -> Self { Self::from(e.into()) }
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    use roster_core::Error as E;
    match e {
      E::InvalidDate { .. }
      | E::InvalidMonth(_)
      | E::InvalidStatus(_)
      | E::MissingField(_) => Self::BadRequest(e.to_string()),
      E::FaceNotFound(label) => Self::NotFound(format!("face {label:?} not found")),
      E::LabelTaken(label) => {
        Self::Conflict(format!("label {label:?} is already in use"))
      }
      E::Storage { .. } => Self::Storage(e),
      E::Generation(_) => Self::Upstream(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Storage(e) => {
        tracing::error!(error = %e, "storage failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "internal storage error".to_owned(),
        )
      }
      ApiError::Upstream(e) => {
        tracing::error!(error = %e, "ai service failure");
        (StatusCode::BAD_GATEWAY, "ai service unavailable".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
