//! The outbound-notification seam.

use std::future::Future;

use crate::{assignment::AssignmentRecord, participant::Participant};

/// Sends one message to one recipient and reports the outcome.
///
/// Implemented over SMTP by `kringle-mailer`; tests substitute recording
/// fakes. The core only ever inspects success or failure — transport
/// details stay behind this trait.
pub trait NotificationGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Tell a giver who they drew.
  fn send_assignment(
    &self,
    record: AssignmentRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Confirm a fresh registration to the participant.
  fn send_confirmation(
    &self,
    participant: Participant,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
