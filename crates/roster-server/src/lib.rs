//! Process wiring for the Roster server: configuration and the outer router.

use std::path::PathBuf;

use axum::{
  Router,
  http::{HeaderValue, Method, header::InvalidHeaderValue},
};
use chrono::NaiveDate;
use roster_api::AppState;
use roster_core::{
  calendar::{Holiday, SessionCalendar, default_holidays},
  generate::TextGenerator,
  store::RosterStore,
};
use roster_gemini::GeminiConfig;
use serde::Deserialize;
use thiserror::Error;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  #[serde(default = "default_faces_path")]
  pub faces_path:      PathBuf,
  #[serde(default = "default_attendance_path")]
  pub attendance_path: PathBuf,
  #[serde(default = "default_session_start")]
  pub session_start:   NaiveDate,
  #[serde(default = "default_holidays")]
  pub holidays:        Vec<Holiday>,
  #[serde(default = "default_cors_origins")]
  pub cors_origins:    Vec<String>,
  pub gemini_api_key:  Option<String>,
  #[serde(default = "roster_gemini::default_model")]
  pub gemini_model:    String,
  #[serde(default = "roster_gemini::default_base_url")]
  pub gemini_base_url: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_faces_path() -> PathBuf { PathBuf::from("data/faces.json") }

fn default_attendance_path() -> PathBuf { PathBuf::from("data/attendance.json") }

fn default_session_start() -> NaiveDate { SessionCalendar::default().session_start }

fn default_cors_origins() -> Vec<String> {
  vec![
    "http://localhost:3000".to_string(),
    "http://localhost:3001".to_string(),
  ]
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("no Gemini API key: set `gemini_api_key` or GOOGLE_API_KEY")]
  MissingApiKey,

  #[error("invalid CORS origin {origin:?}: {source}")]
  CorsOrigin {
    origin: String,
    #[source]
    source: InvalidHeaderValue,
  },
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn calendar(&self) -> SessionCalendar {
    SessionCalendar::new(self.session_start, self.holidays.clone())
  }

  /// Gemini settings; `fallback_key` is consulted when the config has none.
  pub fn gemini(&self, fallback_key: Option<String>) -> Result<GeminiConfig, ConfigError> {
    let api_key = self
      .gemini_api_key
      .clone()
      .or(fallback_key)
      .filter(|k| !k.trim().is_empty())
      .ok_or(ConfigError::MissingApiKey)?;
    Ok(GeminiConfig {
      api_key,
      model: self.gemini_model.clone(),
      base_url: self.gemini_base_url.clone(),
    })
  }

  pub fn cors(&self) -> Result<CorsLayer, ConfigError> {
    let origins = self
      .cors_origins
      .iter()
      .map(|o| {
        HeaderValue::from_str(o).map_err(|source| ConfigError::CorsOrigin {
          origin: o.clone(),
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(
      CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any),
    )
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in request tracing and CORS.
pub fn app<S, G>(state: AppState<S, G>, cors: CorsLayer) -> Router
where
  S: RosterStore + 'static,
  G: TextGenerator + 'static,
{
  Router::new()
    .merge(roster_api::api_router(state))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}
