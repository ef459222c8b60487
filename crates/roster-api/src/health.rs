//! Liveness and dependency checks.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use roster_core::{generate::TextGenerator, store::RosterStore};
use serde::Serialize;
use serde_json::{Value, json};

use crate::AppState;

/// `GET /`
pub async fn root() -> Json<Value> {
  Json(json!({ "message": "Face Recognition Attendance API is running!" }))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
  pub status:          &'static str,
  pub faces_data:      &'static str,
  pub attendance_data: &'static str,
  pub ai_service:      &'static str,
  pub timestamp:       DateTime<Utc>,
}

/// `GET /health`
///
/// Reads both documents and sends a probe prompt. Failures are reported in
/// the body; the check itself always answers 200.
pub async fn check<S, G>(State(state): State<AppState<S, G>>) -> Json<HealthReport>
where
  S: RosterStore,
  G: TextGenerator,
{
  let faces_data = match state.store.list_faces().await {
    Ok(_) => "accessible",
    Err(e) => {
      tracing::warn!(error = %e, "health: face registry unreadable");
      "error"
    }
  };
  let attendance_data = match state.store.attendance_sheet().await {
    Ok(_) => "accessible",
    Err(e) => {
      tracing::warn!(error = %e, "health: attendance log unreadable");
      "error"
    }
  };
  let ai_service = match state.generator.generate("test").await {
    Ok(_) => "working",
    Err(e) => {
      tracing::warn!(error = %e, "health: ai service probe failed");
      "error"
    }
  };

  Json(HealthReport {
    status: "healthy",
    faces_data,
    attendance_data,
    ai_service,
    timestamp: Utc::now(),
  })
}
