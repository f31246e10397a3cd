//! The `{data, error}` wrapper every entity response is sent in.

use alma_core::Id;
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub message: String,
}

/// Exactly one of `data` and `error` is non-null.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub data:  Option<T>,
  pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
  pub fn success(data: T) -> Self {
    Self {
      data:  Some(data),
      error: None,
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      data:  None,
      error: Some(ErrorBody {
        message: message.into(),
      }),
    }
  }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
  fn into_response(self) -> Response { Json(self).into_response() }
}

/// `201 Created` with the enveloped record.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Envelope<T>) {
  (StatusCode::CREATED, Envelope::success(data))
}

/// Payload returned by every successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: String,
  pub id:      Id,
}

impl Deleted {
  pub fn new(what: &str, id: Id) -> Envelope<Self> {
    Envelope::success(Self {
      message: format!("{what} deleted"),
      id,
    })
  }
}
