//! Handlers for `/acudientes` endpoints.
//!
//! | Method   | Path                             | Notes |
//! |----------|----------------------------------|-------|
//! | `GET`    | `/acudientes`                    | Each guardian embeds a participant summary |
//! | `POST`   | `/acudientes`                    | Body: [`NewGuardian`]; returns 201 |
//! | `GET`    | `/acudientes/{id}`               | 404 if not found |
//! | `GET`    | `/acudientes/participante/{id}`  | Guardians of one participant |
//! | `PUT`    | `/acudientes/{id}`               | Full replacement |
//! | `DELETE` | `/acudientes/{id}`               | 409 while fees reference it |

use alma_core::{
  Id, Registry,
  guardian::{GuardianView, NewGuardian},
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

pub async fn list(State(registry): State<Registry>) -> Envelope<Vec<GuardianView>> {
  Envelope::success(registry.list_guardians().await)
}

pub async fn get_one(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<GuardianView>, ApiError> {
  let Path(id) = id?;
  Ok(Envelope::success(registry.get_guardian(id).await?))
}

/// `GET /acudientes/participante/{id}`
pub async fn by_participant(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<Vec<GuardianView>>, ApiError> {
  let Path(participant_id) = id?;
  Ok(Envelope::success(registry.guardians_of(participant_id).await))
}

pub async fn create(
  State(registry): State<Registry>,
  body: Result<Json<NewGuardian>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  Ok(created(registry.create_guardian(&body).await?))
}

pub async fn update(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<NewGuardian>, JsonRejection>,
) -> Result<Envelope<GuardianView>, ApiError> {
  let Path(id) = id?;
  let Json(body) = body?;
  Ok(Envelope::success(registry.update_guardian(id, &body).await?))
}

pub async fn delete(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<Deleted>, ApiError> {
  let Path(id) = id?;
  let id = registry.delete_guardian(id).await?;
  Ok(Deleted::new("guardian", id))
}
