//! Handlers for `/participantes` endpoints.
//!
//! | Method   | Path                  | Notes |
//! |----------|-----------------------|-------|
//! | `GET`    | `/participantes`      | Each participant embeds its site |
//! | `POST`   | `/participantes`      | Body: [`NewParticipant`]; returns 201 |
//! | `GET`    | `/participantes/{id}` | 404 if not found |
//! | `PUT`    | `/participantes/{id}` | Full replacement |
//! | `DELETE` | `/participantes/{id}` | 409 while guardians or fees reference it |

use alma_core::{
  Id, Registry,
  participant::{NewParticipant, ParticipantView},
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

pub async fn list(
  State(registry): State<Registry>,
) -> Envelope<Vec<ParticipantView>> {
  Envelope::success(registry.list_participants().await)
}

pub async fn get_one(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<ParticipantView>, ApiError> {
  let Path(id) = id?;
  Ok(Envelope::success(registry.get_participant(id).await?))
}

pub async fn create(
  State(registry): State<Registry>,
  body: Result<Json<NewParticipant>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  Ok(created(registry.create_participant(&body).await?))
}

pub async fn update(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<NewParticipant>, JsonRejection>,
) -> Result<Envelope<ParticipantView>, ApiError> {
  let Path(id) = id?;
  let Json(body) = body?;
  Ok(Envelope::success(registry.update_participant(id, &body).await?))
}

pub async fn delete(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<Deleted>, ApiError> {
  let Path(id) = id?;
  let id = registry.delete_participant(id).await?;
  Ok(Deleted::new("participant", id))
}
