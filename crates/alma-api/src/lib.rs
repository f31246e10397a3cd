//! JSON REST API for Alma.
//!
//! Exposes an axum [`Router`] backed by an [`alma_core::Registry`]. CORS,
//! tracing layers and transport concerns are the caller's responsibility.
//!
//! Entity responses are wrapped in a `{data, error}` [`envelope`]; core
//! outcomes map to status codes in [`ApiError`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = alma_api::api_router(registry).layer(cors);
//! ```

pub mod envelope;
pub mod error;
pub mod fees;
pub mod guardians;
pub mod participants;
pub mod sites;

use alma_core::{Registry, dashboard::Stats};
use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

pub use envelope::Envelope;
pub use error::ApiError;

/// Build the full API router over `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(registry: Registry) -> Router<()> {
  Router::new()
    .route("/", get(root))
    .route("/health", get(health))
    .route("/dashboard/stats", get(stats))
    // Sites
    .route("/sedes", get(sites::list).post(sites::create))
    .route(
      "/sedes/{id}",
      get(sites::get_one).put(sites::update).delete(sites::delete),
    )
    // Participants
    .route(
      "/participantes",
      get(participants::list).post(participants::create),
    )
    .route(
      "/participantes/{id}",
      get(participants::get_one)
        .put(participants::update)
        .delete(participants::delete),
    )
    // Guardians
    .route("/acudientes", get(guardians::list).post(guardians::create))
    .route(
      "/acudientes/{id}",
      get(guardians::get_one)
        .put(guardians::update)
        .delete(guardians::delete),
    )
    .route(
      "/acudientes/participante/{id}",
      get(guardians::by_participant),
    )
    // Monthly fees
    .route("/mensualidades", get(fees::list).post(fees::create))
    .route(
      "/mensualidades/{id}",
      get(fees::get_one).put(fees::update).delete(fees::delete),
    )
    .route(
      "/mensualidades/participante/{id}",
      get(fees::by_participant),
    )
    .with_state(registry)
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({ "message": "Alma dashboard API", "status": "running" }))
}

/// `GET /health` — not enveloped, for load balancers.
async fn health() -> Json<Value> {
  Json(json!({ "status": "ok", "message": "API is running" }))
}

/// `GET /dashboard/stats`
async fn stats(State(registry): State<Registry>) -> Envelope<Stats> {
  Envelope::success(registry.stats().await)
}

#[cfg(test)]
mod tests;
