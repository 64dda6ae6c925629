//! Assignment records and the send report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::participant::Participant;

/// One giver → receiver pairing. Exactly one record exists per
/// participant-as-giver.
///
/// Receiver contact details are denormalised into the record so the
/// notification email can be assembled without a second store lookup, and a
/// sent assignment stays readable even as the roster grows underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
  /// Shared by every record produced by one generation pass.
  pub generation_id:    Uuid,
  pub giver_name:       String,
  pub giver_email:      String,
  pub receiver_name:    String,
  pub receiver_email:   String,
  pub receiver_phone:   String,
  pub receiver_address: String,
  pub notified:         bool,
  pub sent_at:          Option<DateTime<Utc>>,
}

impl AssignmentRecord {
  /// Build an unsent record pairing `giver` with `receiver`.
  pub fn new(
    generation_id: Uuid,
    giver: &Participant,
    receiver: &Participant,
  ) -> Self {
    Self {
      generation_id,
      giver_name: giver.name.clone(),
      giver_email: giver.email.clone(),
      receiver_name: receiver.name.clone(),
      receiver_email: receiver.email.clone(),
      receiver_phone: receiver.phone.clone(),
      receiver_address: receiver.address.clone(),
      notified: false,
      sent_at: None,
    }
  }
}

/// Aggregate outcome of one send pass.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct SendReport {
  pub sent:         usize,
  pub failed:       usize,
  pub already_sent: usize,
}
