//! Admin handlers for the assignment lifecycle.
//!
//! Every handler takes the shared admin lock before touching the assignment
//! table, so generate, regenerate, and send serialise against each other.
//! Both draw routes are refused once any notification has gone out — a
//! giver who has been told their receiver is never silently reassigned.

use axum::{Json, extract::State};
use kringle_core::{
  assignment::{AssignmentRecord, SendReport},
  dispatch, engine,
  gateway::NotificationGateway,
  store::{AssignmentStore, ParticipantStore},
};

use crate::{AppState, error::ApiError};

async fn draw<S, G>(
  state: AppState<S, G>,
) -> Result<Json<Vec<AssignmentRecord>>, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  let _guard = state.admin_lock.lock().await;

  let existing = state
    .store
    .assignments()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let participants = state
    .store
    .participants()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let records = engine::regenerate(&participants, &existing)?;
  state
    .store
    .replace_all(records.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(count = records.len(), "drew assignments");
  Ok(Json(records))
}

/// `POST /admin/assignments/generate` — draw a fresh assignment set,
/// wholesale-replacing whatever is stored.
pub async fn generate<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<AssignmentRecord>>, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  draw(state).await
}

/// `POST /admin/assignments/regenerate` — redraw for review. Refused with
/// 409 once anything has been sent; the stored set is left untouched.
pub async fn regenerate<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<AssignmentRecord>>, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  draw(state).await
}

/// `POST /admin/assignments/send` — email every pending assignment and
/// report the aggregate outcome. 503 when no mailer is configured.
pub async fn send<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<SendReport>, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  let mailer = state.mailer.clone().ok_or(ApiError::MailerUnavailable)?;
  let _guard = state.admin_lock.lock().await;

  let report = dispatch::send_pending(&*state.store, &*mailer)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(
    sent = report.sent,
    failed = report.failed,
    already_sent = report.already_sent,
    "assignment send pass finished"
  );
  Ok(Json(report))
}
