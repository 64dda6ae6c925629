//! Derangement construction for giver → receiver assignments.
//!
//! The obvious approach — shuffle the roster, reject any result with a fixed
//! point, repeat — has no termination bound. We use a Sattolo shuffle
//! instead: a single O(N) pass producing a uniformly random *cyclic*
//! permutation. A cycle over two or more elements cannot map anyone to
//! themselves, so every pass yields a valid derangement on the first try.
//! The trade is that only cyclic derangements are sampled, not all of them.

use rand::Rng;
use uuid::Uuid;

use crate::{
  Error, Result, assignment::AssignmentRecord, participant::Participant,
};

// ─── Generation ──────────────────────────────────────────────────────────────

/// Draw a fresh assignment set over `participants`.
///
/// Fails with [`Error::InsufficientParticipants`] when fewer than two people
/// are registered. For exactly two, the only cycle is the swap, so the one
/// valid pairing is always produced.
pub fn generate(participants: &[Participant]) -> Result<Vec<AssignmentRecord>> {
  generate_with_rng(participants, &mut rand::thread_rng())
}

/// [`generate`] with a caller-supplied RNG, for deterministic tests.
pub fn generate_with_rng<R: Rng>(
  participants: &[Participant],
  rng: &mut R,
) -> Result<Vec<AssignmentRecord>> {
  let count = participants.len();
  if count < 2 {
    return Err(Error::InsufficientParticipants { count });
  }

  let receiver_of = sattolo(count, rng);
  let generation_id = Uuid::new_v4();

  Ok(
    participants
      .iter()
      .enumerate()
      .map(|(i, giver)| {
        AssignmentRecord::new(
          generation_id,
          giver,
          &participants[receiver_of[i]],
        )
      })
      .collect(),
  )
}

// ─── Lifecycle guard ─────────────────────────────────────────────────────────

/// Refuse a redraw once any assignment has gone out.
///
/// A giver who has been told their receiver must never be silently
/// reassigned. The check precedes all computation, so a refusal provably
/// mutates nothing.
pub fn ensure_unsent(existing: &[AssignmentRecord]) -> Result<()> {
  if existing.iter().any(|r| r.notified) {
    return Err(Error::AlreadyNotified);
  }
  Ok(())
}

/// [`generate`], guarded by [`ensure_unsent`] over the records currently in
/// the store.
pub fn regenerate(
  participants: &[Participant],
  existing: &[AssignmentRecord],
) -> Result<Vec<AssignmentRecord>> {
  ensure_unsent(existing)?;
  generate(participants)
}

// ─── Shuffle ─────────────────────────────────────────────────────────────────

/// Sattolo's cyclic shuffle. Returns `receiver_of` such that giver `i` is
/// paired with `receiver_of[i]`, and `receiver_of[i] != i` for every `i`
/// whenever `n >= 2`.
fn sattolo<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
  let mut receiver_of: Vec<usize> = (0..n).collect();
  for i in (1..n).rev() {
    // Exclusive of `i` itself — this is what keeps the result a single
    // cycle rather than an arbitrary permutation.
    let j = rng.gen_range(0..i);
    receiver_of.swap(i, j);
  }
  receiver_of
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use chrono::Utc;
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;

  fn roster(n: usize) -> Vec<Participant> {
    (0..n)
      .map(|i| Participant {
        name:          format!("Person {i}"),
        email:         format!("person{i}@example.com"),
        phone:         format!("+1 555 010{i}"),
        address:       format!("{i} Evergreen Terrace"),
        registered_at: Utc::now(),
      })
      .collect()
  }

  fn assert_derangement(
    participants: &[Participant],
    records: &[AssignmentRecord],
  ) {
    assert_eq!(records.len(), participants.len());

    // Givers are exactly the roster, in roster order.
    for (p, r) in participants.iter().zip(records) {
      assert_eq!(r.giver_email, p.email);
    }

    // Receivers are a permutation of the roster.
    let receivers: HashSet<&str> =
      records.iter().map(|r| r.receiver_email.as_str()).collect();
    let everyone: HashSet<&str> =
      participants.iter().map(|p| p.email.as_str()).collect();
    assert_eq!(receivers, everyone);

    // No fixed points.
    for r in records {
      assert_ne!(
        r.giver_email, r.receiver_email,
        "self-assignment for {}",
        r.giver_email
      );
    }
  }

  #[test]
  fn fewer_than_two_participants_is_refused() {
    assert!(matches!(
      generate(&roster(0)),
      Err(Error::InsufficientParticipants { count: 0 })
    ));
    assert!(matches!(
      generate(&roster(1)),
      Err(Error::InsufficientParticipants { count: 1 })
    ));
  }

  #[test]
  fn every_size_yields_a_derangement() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for n in 2..=10 {
      let participants = roster(n);
      for _ in 0..50 {
        let records = generate_with_rng(&participants, &mut rng).unwrap();
        assert_derangement(&participants, &records);
      }
    }
  }

  #[test]
  fn two_participants_always_swap() {
    let participants = roster(2);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
      let records = generate_with_rng(&participants, &mut rng).unwrap();
      assert_eq!(records[0].receiver_email, participants[1].email);
      assert_eq!(records[1].receiver_email, participants[0].email);
    }
  }

  #[test]
  fn three_way_exchange_covers_everyone() {
    let participants = vec![
      Participant {
        name:          "Alice".to_string(),
        email:         "a@x".to_string(),
        phone:         "+1 555 0101".to_string(),
        address:       "1 First St".to_string(),
        registered_at: Utc::now(),
      },
      Participant {
        name:          "Bob".to_string(),
        email:         "b@x".to_string(),
        phone:         "+1 555 0102".to_string(),
        address:       "2 Second St".to_string(),
        registered_at: Utc::now(),
      },
      Participant {
        name:          "Charlie".to_string(),
        email:         "c@x".to_string(),
        phone:         "+1 555 0103".to_string(),
        address:       "3 Third St".to_string(),
        registered_at: Utc::now(),
      },
    ];

    let records = generate(&participants).unwrap();
    assert_eq!(records.len(), 3);
    assert_derangement(&participants, &records);
  }

  #[test]
  fn records_start_unsent_and_share_a_generation_id() {
    let records = generate(&roster(4)).unwrap();
    let generation_id = records[0].generation_id;
    for r in &records {
      assert!(!r.notified);
      assert!(r.sent_at.is_none());
      assert_eq!(r.generation_id, generation_id);
    }
  }

  #[test]
  fn redraw_is_refused_once_anything_was_sent() {
    let participants = roster(3);
    let mut existing = generate(&participants).unwrap();
    existing[1].notified = true;
    existing[1].sent_at = Some(Utc::now());

    assert!(matches!(
      regenerate(&participants, &existing),
      Err(Error::AlreadyNotified)
    ));
  }

  #[test]
  fn redraw_over_unsent_records_succeeds() {
    let participants = roster(3);
    let existing = generate(&participants).unwrap();
    let fresh = regenerate(&participants, &existing).unwrap();
    assert_derangement(&participants, &fresh);
  }
}
