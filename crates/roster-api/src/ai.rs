//! Handlers for `/ai` endpoints. Both pass straight through to the
//! [`TextGenerator`]; a generator failure becomes a 502.

use axum::{
  Json,
  extract::{Query, State},
};
use roster_core::{
  Error,
  generate::{TextGenerator, welcome_prompt},
  store::RosterStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
  pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeBody {
  pub result: String,
}

/// `POST /ai/analyze-face?prompt=...`
pub async fn analyze_face<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalyzeBody>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  let prompt = params
    .prompt
    .filter(|p| !p.trim().is_empty())
    .ok_or(Error::MissingField("prompt"))?;

  let result = state.generator.generate(&prompt).await?;
  Ok(Json(AnalyzeBody { result }))
}

#[derive(Debug, Deserialize)]
pub struct WelcomeRequest {
  pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeBody {
  pub welcome_message: String,
}

/// `POST /ai/welcome` — body: `{"name": "..."}`.
pub async fn welcome<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<WelcomeRequest>,
) -> Result<Json<WelcomeBody>, ApiError>
where
  S: RosterStore,
  G: TextGenerator,
{
  let name = body.name.trim();
  if name.is_empty() {
    return Err(Error::MissingField("name").into());
  }

  let welcome_message = state.generator.generate(&welcome_prompt(name)).await?;
  Ok(Json(WelcomeBody {
    welcome_message: welcome_message.trim().to_owned(),
  }))
}
