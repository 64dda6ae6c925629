//! The store traits implemented by storage backends.
//!
//! Higher layers (`kringle-api`) depend on these abstractions, not on any
//! concrete backend. `kringle-store-sqlite` implements both on one type.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (tokio with `axum`).

use std::future::Future;

use crate::{
  assignment::AssignmentRecord,
  participant::{NewParticipant, Participant},
};

/// Durable roster of registered participants. Append-only: the system never
/// edits or deletes a registration.
pub trait ParticipantStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new participant. The `registered_at` timestamp is set by the
  /// store.
  fn append(
    &self,
    input: NewParticipant,
  ) -> impl Future<Output = Result<Participant, Self::Error>> + Send + '_;

  /// All participants, in registration order.
  fn participants(
    &self,
  ) -> impl Future<Output = Result<Vec<Participant>, Self::Error>> + Send + '_;
}

/// Durable giver → receiver table plus the per-record notification flag.
pub trait AssignmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Wholesale-replace the stored set with `records`. Assignments are never
  /// merged across generations.
  fn replace_all(
    &self,
    records: Vec<AssignmentRecord>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All stored records, in generation order. An empty or freshly-created
  /// store yields an empty table.
  fn assignments(
    &self,
  ) -> impl Future<Output = Result<Vec<AssignmentRecord>, Self::Error>> + Send + '_;

  /// Persist an updated notification flag and timestamp for one record,
  /// keyed by giver email.
  fn update_in_place(
    &self,
    record: AssignmentRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
