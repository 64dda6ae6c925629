//! Plain-text message templates.

use kringle_core::{assignment::AssignmentRecord, participant::Participant};

pub const CONFIRMATION_SUBJECT: &str = "Secret Santa registration confirmed";
pub const ASSIGNMENT_SUBJECT: &str = "Your Secret Santa assignment";

/// Body of the confirmation email sent right after registration.
pub fn confirmation_body(participant: &Participant) -> String {
  format!(
    "Hi {name},\n\n\
     You are registered for the Secret Santa exchange.\n\n\
     Your details:\n\
     Name: {name}\n\
     Email: {email}\n\
     Phone: {phone}\n\
     Address: {address}\n\n\
     You will receive your assignment by email once the draw is made.\n",
    name = participant.name,
    email = participant.email,
    phone = participant.phone,
    address = participant.address,
  )
}

/// Body of the assignment email sent to a giver once the draw is locked in.
pub fn assignment_body(record: &AssignmentRecord) -> String {
  format!(
    "Hi {giver},\n\n\
     You are the Secret Santa for:\n\n\
     Name: {name}\n\
     Email: {email}\n\
     Phone: {phone}\n\
     Address: {address}\n\n\
     Please make sure your gift reaches them in time.\n",
    giver = record.giver_name,
    name = record.receiver_name,
    email = record.receiver_email,
    phone = record.receiver_phone,
    address = record.receiver_address,
  )
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;

  #[test]
  fn assignment_body_names_the_receiver() {
    let record = AssignmentRecord {
      generation_id:    Uuid::new_v4(),
      giver_name:       "Alice".to_string(),
      giver_email:      "alice@example.com".to_string(),
      receiver_name:    "Bob".to_string(),
      receiver_email:   "bob@example.com".to_string(),
      receiver_phone:   "+1 555 0102".to_string(),
      receiver_address: "2 Second St".to_string(),
      notified:         false,
      sent_at:          None,
    };

    let body = assignment_body(&record);
    assert!(body.contains("Hi Alice"));
    assert!(body.contains("Name: Bob"));
    assert!(body.contains("Phone: +1 555 0102"));
    assert!(body.contains("Address: 2 Second St"));
  }

  #[test]
  fn confirmation_body_echoes_registration_details() {
    let participant = Participant {
      name:          "Alice".to_string(),
      email:         "alice@example.com".to_string(),
      phone:         "+1 555 0101".to_string(),
      address:       "1 First St".to_string(),
      registered_at: Utc::now(),
    };

    let body = confirmation_body(&participant);
    assert!(body.contains("Hi Alice"));
    assert!(body.contains("Email: alice@example.com"));
    assert!(body.contains("assignment by email"));
  }
}
