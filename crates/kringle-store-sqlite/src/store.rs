//! [`SqliteStore`] — the SQLite implementation of both store traits.

use std::path::Path;

use chrono::Utc;
use kringle_core::{
  assignment::AssignmentRecord,
  participant::{NewParticipant, Participant},
  store::{AssignmentStore, ParticipantStore},
};

use crate::{
  Result,
  encode::{RawAssignment, RawParticipant, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Kringle store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ParticipantStore impl ───────────────────────────────────────────────────

impl ParticipantStore for SqliteStore {
  type Error = crate::Error;

  async fn append(&self, input: NewParticipant) -> Result<Participant> {
    let participant = Participant {
      name:          input.name,
      email:         input.email,
      phone:         input.phone,
      address:       input.address,
      registered_at: Utc::now(),
    };

    let email   = participant.email.clone();
    let name    = participant.name.clone();
    let phone   = participant.phone.clone();
    let address = participant.address.clone();
    let at_str  = encode_dt(participant.registered_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO participants (email, name, phone, address, registered_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![email, name, phone, address, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(participant)
  }

  async fn participants(&self) -> Result<Vec<Participant>> {
    let raws: Vec<RawParticipant> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT email, name, phone, address, registered_at
           FROM participants
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawParticipant {
              email:         row.get(0)?,
              name:          row.get(1)?,
              phone:         row.get(2)?,
              address:       row.get(3)?,
              registered_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParticipant::into_participant).collect()
  }
}

// ─── AssignmentStore impl ────────────────────────────────────────────────────

impl AssignmentStore for SqliteStore {
  type Error = crate::Error;

  async fn replace_all(&self, records: Vec<AssignmentRecord>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM assignments", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO assignments (
               giver_email, giver_name, receiver_email, receiver_name,
               receiver_phone, receiver_address, notified, sent_at,
               generation_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          )?;
          for r in &records {
            stmt.execute(rusqlite::params![
              r.giver_email,
              r.giver_name,
              r.receiver_email,
              r.receiver_name,
              r.receiver_phone,
              r.receiver_address,
              r.notified,
              r.sent_at.map(encode_dt),
              encode_uuid(r.generation_id),
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn assignments(&self) -> Result<Vec<AssignmentRecord>> {
    let raws: Vec<RawAssignment> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT giver_email, giver_name, receiver_email, receiver_name,
                  receiver_phone, receiver_address, notified, sent_at,
                  generation_id
           FROM assignments
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAssignment {
              giver_email:      row.get(0)?,
              giver_name:       row.get(1)?,
              receiver_email:   row.get(2)?,
              receiver_name:    row.get(3)?,
              receiver_phone:   row.get(4)?,
              receiver_address: row.get(5)?,
              notified:         row.get(6)?,
              sent_at:          row.get(7)?,
              generation_id:    row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_record).collect()
  }

  async fn update_in_place(&self, record: AssignmentRecord) -> Result<()> {
    let giver_email = record.giver_email;
    let notified    = record.notified;
    let sent_at     = record.sent_at.map(encode_dt);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE assignments SET notified = ?2, sent_at = ?3
           WHERE giver_email = ?1",
          rusqlite::params![giver_email, notified, sent_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
