//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`RosterStore`] and
//! [`TextGenerator`]. TLS, CORS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(roster_api::api_router(state))
//! ```

pub mod ai;
pub mod attendance;
pub mod error;
pub mod faces;
pub mod health;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use roster_core::{
  calendar::SessionCalendar,
  clock::Clock,
  generate::TextGenerator,
  store::RosterStore,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Everything is constructed once
/// at startup and injected here.
pub struct AppState<S, G> {
  pub store:     Arc<S>,
  pub generator: Arc<G>,
  pub calendar:  Arc<SessionCalendar>,
  pub clock:     Arc<dyn Clock>,
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:     self.store.clone(),
      generator: self.generator.clone(),
      calendar:  self.calendar.clone(),
      clock:     self.clock.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(state: AppState<S, G>) -> Router<()>
where
  S: RosterStore + 'static,
  G: TextGenerator + 'static,
{
  Router::new()
    // Liveness
    .route("/", get(health::root))
    .route("/health", get(health::check::<S, G>))
    // Faces
    .route("/faces", get(faces::list::<S, G>).post(faces::upsert::<S, G>))
    .route(
      "/faces/{label}",
      put(faces::update::<S, G>).delete(faces::remove::<S, G>),
    )
    // Attendance
    .route("/attendance", post(attendance::mark::<S, G>))
    .route("/attendance/student/{id}", get(attendance::for_student::<S, G>))
    .route(
      "/attendance/student/{id}/month/{month}",
      get(attendance::month_for_student::<S, G>),
    )
    .route("/attendance/date/{date}", get(attendance::for_date::<S, G>))
    .route("/holidays", get(attendance::holidays::<S, G>))
    // AI
    .route("/ai/analyze-face", post(ai::analyze_face::<S, G>))
    .route("/ai/welcome", post(ai::welcome::<S, G>))
    .with_state(state)
}
