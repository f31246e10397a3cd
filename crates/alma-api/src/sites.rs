//! Handlers for `/sedes` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/sedes`      | All sites |
//! | `POST`   | `/sedes`      | Body: [`NewSite`]; returns 201 |
//! | `GET`    | `/sedes/{id}` | 404 if not found |
//! | `PUT`    | `/sedes/{id}` | Full replacement |
//! | `DELETE` | `/sedes/{id}` | 409 while participants reference it |

use alma_core::{
  Id, Registry,
  site::{NewSite, SiteView},
};
use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  response::IntoResponse,
};

use crate::{
  envelope::{Deleted, Envelope, created},
  error::ApiError,
};

/// `GET /sedes`
pub async fn list(State(registry): State<Registry>) -> Envelope<Vec<SiteView>> {
  Envelope::success(registry.list_sites().await)
}

/// `GET /sedes/{id}`
pub async fn get_one(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<SiteView>, ApiError> {
  let Path(id) = id?;
  Ok(Envelope::success(registry.get_site(id).await?))
}

/// `POST /sedes`
pub async fn create(
  State(registry): State<Registry>,
  body: Result<Json<NewSite>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  Ok(created(registry.create_site(&body).await?))
}

/// `PUT /sedes/{id}`
pub async fn update(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<NewSite>, JsonRejection>,
) -> Result<Envelope<SiteView>, ApiError> {
  let Path(id) = id?;
  let Json(body) = body?;
  Ok(Envelope::success(registry.update_site(id, &body).await?))
}

/// `DELETE /sedes/{id}`
pub async fn delete(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<Deleted>, ApiError> {
  let Path(id) = id?;
  let id = registry.delete_site(id).await?;
  Ok(Deleted::new("site", id))
}
