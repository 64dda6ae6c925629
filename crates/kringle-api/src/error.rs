//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use kringle_core::{Error as CoreError, participant::Duplicate};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("this {} ({}) is already registered", .kind.noun(), .value)]
  Duplicate { kind: Duplicate, value: String },

  #[error(transparent)]
  Engine(#[from] CoreError),

  #[error("email delivery is not configured on this server")]
  MailerUnavailable,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Duplicate { .. } => StatusCode::CONFLICT,
      ApiError::Engine(CoreError::MissingField(_)) => StatusCode::BAD_REQUEST,
      ApiError::Engine(CoreError::InsufficientParticipants { .. }) => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
      ApiError::Engine(CoreError::AlreadyNotified) => StatusCode::CONFLICT,
      ApiError::MailerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
