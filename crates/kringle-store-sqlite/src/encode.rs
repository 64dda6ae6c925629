//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, and the notified flag as a SQLite integer.

use chrono::{DateTime, Utc};
use kringle_core::{assignment::AssignmentRecord, participant::Participant};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `participants` row.
pub struct RawParticipant {
  pub email:         String,
  pub name:          String,
  pub phone:         String,
  pub address:       String,
  pub registered_at: String,
}

impl RawParticipant {
  pub fn into_participant(self) -> Result<Participant> {
    Ok(Participant {
      name:          self.name,
      email:         self.email,
      phone:         self.phone,
      address:       self.address,
      registered_at: decode_dt(&self.registered_at)?,
    })
  }
}

/// Raw strings read directly from an `assignments` row.
pub struct RawAssignment {
  pub giver_email:      String,
  pub giver_name:       String,
  pub receiver_email:   String,
  pub receiver_name:    String,
  pub receiver_phone:   String,
  pub receiver_address: String,
  pub notified:         bool,
  pub sent_at:          Option<String>,
  pub generation_id:    String,
}

impl RawAssignment {
  pub fn into_record(self) -> Result<AssignmentRecord> {
    Ok(AssignmentRecord {
      generation_id:    decode_uuid(&self.generation_id)?,
      giver_name:       self.giver_name,
      giver_email:      self.giver_email,
      receiver_name:    self.receiver_name,
      receiver_email:   self.receiver_email,
      receiver_phone:   self.receiver_phone,
      receiver_address: self.receiver_address,
      notified:         self.notified,
      sent_at:          self.sent_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
