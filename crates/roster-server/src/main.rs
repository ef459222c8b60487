//! Roster server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `ROSTER_*` environment variables, opens the JSON documents, and serves the
//! attendance API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_api::AppState;
use roster_core::clock::SystemClock;
use roster_gemini::GeminiClient;
use roster_server::ServerConfig;
use roster_store_json::JsonStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster attendance server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the JSON documents, creating them if absent.
  let store = JsonStore::open(&server_cfg.faces_path, &server_cfg.attendance_path)
    .await
    .with_context(|| {
      format!(
        "failed to open store at {:?} / {:?}",
        server_cfg.faces_path, server_cfg.attendance_path
      )
    })?;

  let gemini = server_cfg
    .gemini(std::env::var("GOOGLE_API_KEY").ok())
    .context("invalid AI configuration")?;
  let generator = GeminiClient::new(gemini).context("failed to build AI client")?;

  // Build application state.
  let state = AppState {
    store:     Arc::new(store),
    generator: Arc::new(generator),
    calendar:  Arc::new(server_cfg.calendar()),
    clock:     Arc::new(SystemClock),
  };

  let cors = server_cfg.cors().context("invalid CORS configuration")?;
  let app = roster_server::app(state, cors);
  let address = server_cfg.address();

  tracing::info!(
    session_start = %server_cfg.session_start,
    holidays = server_cfg.holidays.len(),
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
