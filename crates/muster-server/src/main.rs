//! muster-server binary.
//!
//! Reads `muster.toml` (or the path given with `--config`), layers
//! `MUSTER_*` environment variables and `PORT` on top, opens the SQLite
//! store, and serves the check-in site over HTTP.
//!
//! Nested keys use a double underscore, e.g.
//! `MUSTER_GEOFENCE__MAX_DISTANCE_KM=0.5` or
//! `MUSTER_PROGRAM__START_DATE=2026-02-13`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use muster_core::store::CheckInStore as _;
use muster_server::{AppState, ServerConfig};
use muster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Muster attendance check-in server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "muster.toml")]
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
    .add_source(
      config::Environment::with_prefix("MUSTER")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .set_override_option("port", std::env::var("PORT").ok())
    .context("invalid PORT")?
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store. Schema creation is best effort here; the store retries
  // it on the first request if this attempt fails.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match store.ensure_schema().await {
    Ok(()) => tracing::info!(path = ?store_path, "check-in store ready"),
    Err(e) => tracing::error!(path = ?store_path, error = %e, "failed to initialise check-in schema"),
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState::new(Arc::new(store), server_cfg);

  let fence = state.service.geofence().config();
  tracing::info!(
    latitude = fence.latitude,
    longitude = fence.longitude,
    max_distance_km = fence.max_distance_km,
    start_date = %state.service.calendar().start_date,
    "geofence configured"
  );
  let app = muster_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
