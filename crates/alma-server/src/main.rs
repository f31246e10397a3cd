//! alma-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `ALMA_*`
//! environment variables, builds a fresh in-memory registry and serves the
//! JSON API over HTTP. Nothing is persisted; restarting resets the data.

mod seed;
mod settings;

use std::path::PathBuf;

use alma_core::Registry;
use anyhow::Context as _;
use axum::http::HeaderValue;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{
  cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
  trace::TraceLayer,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Alma records API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Start with an empty store even if the configuration asks for seed data.
  #[arg(long)]
  no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let registry = if server_cfg.seed && !cli.no_seed {
    Registry::with_store(seed::seeded_store())
  } else {
    Registry::new()
  };

  let cors = cors_layer(&server_cfg.allowed_origins)?;
  tracing::info!(origins = ?server_cfg.allowed_origins, "CORS configured");

  let app = alma_api::api_router(registry)
    .layer(cors)
    .layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Credentialed CORS for the configured origins. Methods and headers are
/// mirrored because wildcards are not allowed alongside credentials.
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
  let origins = origins
    .iter()
    .map(|o| {
      o.trim()
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {o:?}"))
    })
    .collect::<anyhow::Result<Vec<_>>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods(AllowMethods::mirror_request())
      .allow_headers(AllowHeaders::mirror_request())
      .allow_credentials(true),
  )
}
