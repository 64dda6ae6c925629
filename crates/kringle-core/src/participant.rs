//! Participant types and the registration guards.
//!
//! A participant is identified by email address, case-insensitively. Once
//! registered there is no edit or delete operation — the roster only grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Participant ─────────────────────────────────────────────────────────────

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
  pub name:          String,
  /// Primary identity; unique case-insensitively.
  pub email:         String,
  pub phone:         String,
  pub address:       String,
  /// Store-assigned timestamp; never changes after creation.
  pub registered_at: DateTime<Utc>,
}

/// Input to [`crate::store::ParticipantStore::append`].
/// `registered_at` is always set by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParticipant {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  pub address: String,
}

impl NewParticipant {
  /// Refuse registrations with any blank field.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("name", &self.name),
      ("email", &self.email),
      ("phone", &self.phone),
      ("address", &self.address),
    ] {
      if value.trim().is_empty() {
        return Err(Error::MissingField(field));
      }
    }
    Ok(())
  }
}

// ─── Duplicate guard ─────────────────────────────────────────────────────────

/// Which registered attribute an incoming registration collides with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duplicate {
  Email,
  Name,
}

impl Duplicate {
  pub fn noun(&self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Name => "name",
    }
  }
}

/// Case-insensitive exact match against the registered roster.
///
/// Email is checked before name, so an entry colliding on both reports the
/// email collision. Two genuinely different people who share a name are
/// still refused — the exchange identifies people informally and a
/// same-name entry is far more often a double registration.
pub fn find_duplicate(
  name: &str,
  email: &str,
  existing: &[Participant],
) -> Option<Duplicate> {
  let email_lower = email.to_lowercase();
  if existing.iter().any(|p| p.email.to_lowercase() == email_lower) {
    return Some(Duplicate::Email);
  }

  let name_lower = name.to_lowercase();
  if existing.iter().any(|p| p.name.to_lowercase() == name_lower) {
    return Some(Duplicate::Name);
  }

  None
}

// ─── Tests ───────────────────────────────────────────────────────────────────
