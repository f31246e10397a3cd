//! Handlers for `/mensualidades` endpoints.
//!
//! | Method   | Path                                | Notes |
//! |----------|-------------------------------------|-------|
//! | `GET`    | `/mensualidades`                    | Each fee embeds participant, site and guardian |
//! | `POST`   | `/mensualidades`                    | Body: [`NewMonthlyFee`]; returns 201 |
//! | `GET`    | `/mensualidades/{id}`               | 404 if not found |
//! | `GET`    | `/mensualidades/participante/{id}`  | Fees of one participant |
//! | `PUT`    | `/mensualidades/{id}`               | Full replacement, re-validated |
//! | `DELETE` | `/mensualidades/{id}`               | Always allowed |

use alma_core::{
  Id, Registry,
  fee::{MonthlyFeeView, NewMonthlyFee},
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

pub async fn list(State(registry): State<Registry>) -> Envelope<Vec<MonthlyFeeView>> {
  Envelope::success(registry.list_fees().await)
}

pub async fn get_one(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<MonthlyFeeView>, ApiError> {
  let Path(id) = id?;
  Ok(Envelope::success(registry.get_fee(id).await?))
}

pub async fn by_participant(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<Vec<MonthlyFeeView>>, ApiError> {
  let Path(participant_id) = id?;
  Ok(Envelope::success(registry.fees_of(participant_id).await))
}

pub async fn create(
  State(registry): State<Registry>,
  body: Result<Json<NewMonthlyFee>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  Ok(created(registry.create_fee(&body).await?))
}

pub async fn update(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
  body: Result<Json<NewMonthlyFee>, JsonRejection>,
) -> Result<Envelope<MonthlyFeeView>, ApiError> {
  let Path(id) = id?;
  let Json(body) = body?;
  Ok(Envelope::success(registry.update_fee(id, &body).await?))
}

pub async fn delete(
  State(registry): State<Registry>,
  id: Result<Path<Id>, PathRejection>,
) -> Result<Envelope<Deleted>, ApiError> {
  let Path(id) = id?;
  let id = registry.delete_fee(id).await?;
  Ok(Deleted::new("monthly fee", id))
}
