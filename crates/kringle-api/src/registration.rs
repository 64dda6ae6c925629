//! Handlers for `/participants`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/participants` | Register; 400 on blank fields, 409 on duplicate |
//! | `GET`  | `/participants` | Full roster |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use kringle_core::{
  gateway::NotificationGateway,
  participant::{Duplicate, NewParticipant, Participant, find_duplicate},
  store::{AssignmentStore, ParticipantStore},
};

use crate::{AppState, error::ApiError};

/// `POST /participants` — register for the exchange.
///
/// The confirmation email is fire-and-forget: the response never waits on
/// the relay, and a delivery failure is only logged. Registration succeeds
/// with or without a configured mailer once validation passes.
pub async fn register<S, G>(
  State(state): State<AppState<S, G>>,
  Json(input): Json<NewParticipant>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  input.validate()?;

  let existing = state
    .store
    .participants()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if let Some(kind) = find_duplicate(&input.name, &input.email, &existing) {
    let value = match kind {
      Duplicate::Email => input.email.clone(),
      Duplicate::Name => input.name.clone(),
    };
    return Err(ApiError::Duplicate { kind, value });
  }

  let participant = state
    .store
    .append(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if let Some(mailer) = state.mailer.clone() {
    let to_confirm = participant.clone();
    tokio::spawn(async move {
      if let Err(error) = mailer.send_confirmation(to_confirm).await {
        tracing::warn!(%error, "failed to send registration confirmation");
      }
    });
  }

  Ok((StatusCode::CREATED, Json(participant)))
}

/// `GET /participants`
pub async fn list<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<Participant>>, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  let roster = state
    .store
    .participants()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(roster))
}
