//! Handlers for `/faces` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/faces` | Whole registry in storage order |
//! | `POST`   | `/faces` | Body: [`NewFace`]; merges into an existing label |
//! | `PUT`    | `/faces/{label}` | Body: [`FaceUpdate`]; relabels, 404/409 on failure |
//! | `DELETE` | `/faces/{label}` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
};
use roster_core::{
  Error,
  face::{Face, FaceUpdate, NewFace},
  generate::TextGenerator,
  store::RosterStore,
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Confirmation body returned by face writes.
#[derive(Debug, Serialize)]
pub struct FaceSaved {
  pub message: &'static str,
  pub face:    Face,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /faces`
pub async fn list<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<Face>>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  let faces = state.store.list_faces().await.map_err(ApiError::store)?;
  Ok(Json(faces))
}

// ─── Upsert ───────────────────────────────────────────────────────────────────

/// `POST /faces` — save a new face or add captures to an existing one.
pub async fn upsert<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<NewFace>,
) -> Result<Json<FaceSaved>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  if body.label.trim().is_empty() {
    return Err(Error::MissingField("label").into());
  }

  let face = state.store.upsert_face(body).await.map_err(ApiError::store)?;
  Ok(Json(FaceSaved {
    message: "Face saved successfully",
    face,
  }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /faces/{label}` — body: `{"name": ..., "class": ..., "rollNo": ...}`.
pub async fn update<S, G>(
  State(state): State<AppState<S, G>>,
  Path(label): Path<String>,
  Json(body): Json<FaceUpdate>,
) -> Result<Json<FaceSaved>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  if body.name.trim().is_empty() {
    return Err(Error::MissingField("name").into());
  }

  let face = state
    .store
    .rename_face(&label, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(FaceSaved {
    message: "Face updated successfully",
    face,
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /faces/{label}`
pub async fn remove<S, G>(
  State(state): State<AppState<S, G>>,
  Path(label): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  state
    .store
    .remove_face(&label)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(serde_json::json!({ "message": "Face deleted successfully" })))
}
