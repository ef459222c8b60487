//! Handlers for attendance endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/attendance/student/{id}?date=YYYY-MM-DD` | `{"status": ...}` |
//! | `GET`  | `/attendance/student/{id}/month/{YYYY-MM}` | Status for every day of the month |
//! | `GET`  | `/attendance/date/{date}` | `{label: status}` for every registered face |
//! | `POST` | `/attendance` | Body: [`MarkBody`] |
//! | `GET`  | `/holidays` | Configured holiday calendar |
//!
//! "Today" is read from the clock once per request.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use roster_core::{
  Error,
  calendar::{Holiday, parse_date, parse_month},
  generate::TextGenerator,
  resolve::{resolve, resolve_for_date, resolve_month},
  status::{AttendanceStatus, MarkedStatus},
  store::RosterStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── Single subject ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DateParams {
  pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
  pub status: AttendanceStatus,
}

/// `GET /attendance/student/{id}?date=YYYY-MM-DD`
pub async fn for_student<S, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<String>,
  Query(params): Query<DateParams>,
) -> Result<Json<StatusBody>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  let raw = params.date.ok_or(Error::MissingField("date"))?;
  let date = parse_date("date", &raw)?;
  let today = state.clock.today();

  let records = state.store.records_for(&id).await.map_err(ApiError::store)?;
  let status = resolve(date, today, &state.calendar, &records);
  Ok(Json(StatusBody { status }))
}

// ─── Month view ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MonthBody {
  pub label: String,
  pub month: String,
  pub days:  BTreeMap<NaiveDate, AttendanceStatus>,
}

/// `GET /attendance/student/{id}/month/{YYYY-MM}`
pub async fn month_for_student<S, G>(
  State(state): State<AppState<S, G>>,
  Path((id, month)): Path<(String, String)>,
) -> Result<Json<MonthBody>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  let (year, m) = parse_month(&month)?;
  let today = state.clock.today();

  let records = state.store.records_for(&id).await.map_err(ApiError::store)?;
  let days = resolve_month(year, m, today, &state.calendar, &records)?;
  Ok(Json(MonthBody {
    label: id,
    month: format!("{year:04}-{m:02}"),
    days,
  }))
}

// ─── Whole registry ───────────────────────────────────────────────────────────

/// `GET /attendance/date/{date}`
pub async fn for_date<S, G>(
  State(state): State<AppState<S, G>>,
  Path(raw): Path<String>,
) -> Result<Json<BTreeMap<String, AttendanceStatus>>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  let date = parse_date("date", &raw)?;
  let today = state.clock.today();

  let faces = state.store.list_faces().await.map_err(ApiError::store)?;
  let sheet = state
    .store
    .attendance_sheet()
    .await
    .map_err(ApiError::store)?;

  let statuses = resolve_for_date(
    date,
    today,
    &state.calendar,
    faces.iter().map(|f| f.label.as_str()),
    &sheet,
  );
  Ok(Json(statuses))
}

// ─── Mark ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /attendance`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkBody {
  pub student_id: String,
  pub date:       String,
  pub status:     String,
}

/// `POST /attendance` — body: `{"studentId": ..., "date": ..., "status": ...}`.
pub async fn mark<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<MarkBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  if body.student_id.trim().is_empty() {
    return Err(Error::MissingField("studentId").into());
  }
  let date = parse_date("date", &body.date)?;
  let status = MarkedStatus::parse(&body.status)?;

  state
    .store
    .mark(&body.student_id, date, status)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(label = %body.student_id, %date, %status, "attendance marked");
  Ok(Json(serde_json::json!({ "message": "Attendance marked successfully" })))
}

// ─── Holidays ─────────────────────────────────────────────────────────────────

/// `GET /holidays`
pub async fn holidays<S, G>(
  State(state): State<AppState<S, G>>,
) -> Json<Vec<Holiday>>
where
  S: RosterStore,
  G: TextGenerator,
{
  Json(state.calendar.holidays.clone())
}
