//! API error type and [`axum::response::IntoResponse`] implementation.

use alma_core::ErrorKind;
use axum::{
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] alma_core::Error),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Core(e) => match e.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::DependencyConflict => StatusCode::CONFLICT,
        ErrorKind::Format
        | ErrorKind::Reference
        | ErrorKind::CrossReference
        | ErrorKind::Uniqueness
        | ErrorKind::ConditionalRule => StatusCode::BAD_REQUEST,
      },
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::Core(e) => e.to_string(),
      ApiError::BadRequest(m) => m.clone(),
    };
    tracing::debug!(%status, %message, "request failed");
    (status, Envelope::<()>::failure(message)).into_response()
  }
}
