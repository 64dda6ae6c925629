//! `GET /admin/dashboard` — read-only aggregation of both tables.

use std::collections::HashSet;

use axum::{Json, extract::State};
use kringle_core::{
  assignment::AssignmentRecord,
  gateway::NotificationGateway,
  participant::Participant,
  store::{AssignmentStore, ParticipantStore},
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Read model for the admin dashboard — never stored, always derived.
#[derive(Debug, Serialize)]
pub struct Dashboard {
  pub participants:       Vec<Participant>,
  pub assignments:        Vec<AssignmentRecord>,
  /// Registered participants with no assignment record as giver —
  /// non-empty when someone registered after the last draw.
  pub unassigned:         Vec<Participant>,
  pub total_participants: usize,
  pub total_assignments:  usize,
}

pub async fn handler<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  let participants = state
    .store
    .participants()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let assignments = state
    .store
    .assignments()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let givers: HashSet<String> = assignments
    .iter()
    .map(|r| r.giver_email.to_lowercase())
    .collect();
  let unassigned: Vec<Participant> = participants
    .iter()
    .filter(|p| !givers.contains(&p.email.to_lowercase()))
    .cloned()
    .collect();

  Ok(Json(Dashboard {
    total_participants: participants.len(),
    total_assignments: assignments.len(),
    participants,
    assignments,
    unassigned,
  }))
}
