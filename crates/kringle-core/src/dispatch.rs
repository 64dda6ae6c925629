//! The send orchestrator: walks pending assignments through the gateway.

use chrono::Utc;

use crate::{
  assignment::SendReport, gateway::NotificationGateway, store::AssignmentStore,
};

/// Send every not-yet-notified assignment through `gateway`.
///
/// Each successful send is persisted before it is counted, so a crash
/// partway through a pass cannot cause a double-send on the next one.
/// Gateway failures are logged and tallied but never abort the pass —
/// partial completion is expected, and the admin recovers by invoking send
/// again. Store failures do abort: a record we cannot mark sent must not
/// risk being emailed twice.
pub async fn send_pending<A, G>(
  assignments: &A,
  gateway: &G,
) -> Result<SendReport, A::Error>
where
  A: AssignmentStore,
  G: NotificationGateway,
{
  let mut report = SendReport::default();

  for mut record in assignments.assignments().await? {
    if record.notified {
      report.already_sent += 1;
      continue;
    }

    match gateway.send_assignment(record.clone()).await {
      Ok(()) => {
        record.notified = true;
        record.sent_at = Some(Utc::now());
        assignments.update_in_place(record).await?;
        report.sent += 1;
      }
      Err(error) => {
        tracing::warn!(
          giver = %record.giver_email,
          %error,
          "failed to send assignment notification"
        );
        report.failed += 1;
      }
    }
  }

  Ok(report)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{
    collections::HashSet,
    convert::Infallible,
    sync::Mutex,
  };

  use chrono::Utc;

  use super::*;
  use crate::{
    assignment::AssignmentRecord, engine, participant::Participant,
  };

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

  // ── In-memory store ─────────────────────────────────────────────────────

  struct MemoryAssignments {
    records: Mutex<Vec<AssignmentRecord>>,
  }

  impl MemoryAssignments {
    fn new(records: Vec<AssignmentRecord>) -> Self {
      Self { records: Mutex::new(records) }
    }
  }

  impl AssignmentStore for MemoryAssignments {
    type Error = Infallible;

    async fn replace_all(
      &self,
      records: Vec<AssignmentRecord>,
    ) -> Result<(), Infallible> {
      *self.records.lock().unwrap() = records;
      Ok(())
    }

    async fn assignments(&self) -> Result<Vec<AssignmentRecord>, Infallible> {
      Ok(self.records.lock().unwrap().clone())
    }

    async fn update_in_place(
      &self,
      record: AssignmentRecord,
    ) -> Result<(), Infallible> {
      let mut records = self.records.lock().unwrap();
      if let Some(slot) =
        records.iter_mut().find(|r| r.giver_email == record.giver_email)
      {
        *slot = record;
      }
      Ok(())
    }
  }

  // ── Scripted gateway ────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("scripted delivery failure")]
  struct DeliveryRefused;

  #[derive(Default)]
  struct ScriptedGateway {
    refuse:    Mutex<HashSet<String>>,
    delivered: Mutex<Vec<String>>,
  }

  impl ScriptedGateway {
    fn refuse(&self, giver_email: &str) {
      self.refuse.lock().unwrap().insert(giver_email.to_string());
    }

    fn relent(&self, giver_email: &str) {
      self.refuse.lock().unwrap().remove(giver_email);
    }

    fn delivered(&self) -> Vec<String> {
      self.delivered.lock().unwrap().clone()
    }
  }

  impl NotificationGateway for ScriptedGateway {
    type Error = DeliveryRefused;

    async fn send_assignment(
      &self,
      record: AssignmentRecord,
    ) -> Result<(), DeliveryRefused> {
      if self.refuse.lock().unwrap().contains(&record.giver_email) {
        return Err(DeliveryRefused);
      }
      self.delivered.lock().unwrap().push(record.giver_email);
      Ok(())
    }

    async fn send_confirmation(
      &self,
      _participant: Participant,
    ) -> Result<(), DeliveryRefused> {
      Ok(())
    }
  }

  // ── Cases ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn send_marks_records_and_reports_counts() {
    let store =
      MemoryAssignments::new(engine::generate(&roster(3)).unwrap());
    let gateway = ScriptedGateway::default();

    let report = send_pending(&store, &gateway).await.unwrap();
    assert_eq!(
      report,
      SendReport { sent: 3, failed: 0, already_sent: 0 }
    );

    let records = store.assignments().await.unwrap();
    assert!(records.iter().all(|r| r.notified && r.sent_at.is_some()));
    assert_eq!(gateway.delivered().len(), 3);
  }

  #[tokio::test]
  async fn resend_with_nothing_pending_is_a_no_op() {
    let store =
      MemoryAssignments::new(engine::generate(&roster(3)).unwrap());
    let gateway = ScriptedGateway::default();

    send_pending(&store, &gateway).await.unwrap();
    let second = send_pending(&store, &gateway).await.unwrap();

    assert_eq!(
      second,
      SendReport { sent: 0, failed: 0, already_sent: 3 }
    );
    // No additional deliveries went out.
    assert_eq!(gateway.delivered().len(), 3);
  }

  #[tokio::test]
  async fn failed_recipients_are_retried_and_successes_left_alone() {
    let store =
      MemoryAssignments::new(engine::generate(&roster(3)).unwrap());
    let gateway = ScriptedGateway::default();
    gateway.refuse("person1@example.com");

    let first = send_pending(&store, &gateway).await.unwrap();
    assert_eq!(
      first,
      SendReport { sent: 2, failed: 1, already_sent: 0 }
    );

    let after_first = store.assignments().await.unwrap();
    let person0_sent_at = after_first
      .iter()
      .find(|r| r.giver_email == "person0@example.com")
      .unwrap()
      .sent_at;
    assert!(person0_sent_at.is_some());
    assert!(
      !after_first
        .iter()
        .find(|r| r.giver_email == "person1@example.com")
        .unwrap()
        .notified
    );

    gateway.relent("person1@example.com");
    let second = send_pending(&store, &gateway).await.unwrap();
    assert_eq!(
      second,
      SendReport { sent: 1, failed: 0, already_sent: 2 }
    );

    // Only the previously-failed giver was delivered in the second pass,
    // and the earlier record kept its original timestamp.
    let after_second = store.assignments().await.unwrap();
    assert_eq!(
      after_second
        .iter()
        .find(|r| r.giver_email == "person0@example.com")
        .unwrap()
        .sent_at,
      person0_sent_at
    );
    assert_eq!(gateway.delivered().last().unwrap(), "person1@example.com");
    assert_eq!(
      gateway
        .delivered()
        .iter()
        .filter(|g| g.as_str() == "person0@example.com")
        .count(),
      1
    );
  }
}
