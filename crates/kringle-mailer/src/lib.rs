//! SMTP delivery for Kringle notifications.
//!
//! Implements [`NotificationGateway`] over lettre's async SMTP transport.
//! The relay is dialled over implicit TLS (port 465). Credentials are
//! supplied by the server binary from its environment; when they are absent
//! the server simply runs without a mailer and only the send/confirmation
//! paths are disabled.

pub mod error;
pub mod template;

pub use error::{Error, Result};

use kringle_core::{
  assignment::AssignmentRecord, gateway::NotificationGateway,
  participant::Participant,
};
use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::Mailbox, transport::smtp::authentication::Credentials,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
  pub relay:    String,
  pub username: String,
  pub password: String,
}

// ─── Mailer ──────────────────────────────────────────────────────────────────

/// A [`NotificationGateway`] delivering over SMTP.
///
/// Cloning is cheap — the transport's connection pool is shared.
#[derive(Clone)]
pub struct SmtpMailer {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  sender:    Mailbox,
}

impl SmtpMailer {
  /// Build a mailer for `config`. The authenticated username doubles as the
  /// From address, as the upstream relay requires.
  pub fn new(config: &SmtpConfig) -> Result<Self> {
    let sender: Mailbox = config.username.parse()?;
    let transport =
      AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)?
        .credentials(Credentials::new(
          config.username.clone(),
          config.password.clone(),
        ))
        .build();
    Ok(Self { transport, sender })
  }

  async fn deliver(
    &self,
    to: &str,
    subject: &str,
    body: String,
  ) -> Result<()> {
    let message = Message::builder()
      .from(self.sender.clone())
      .to(to.parse()?)
      .subject(subject)
      .body(body)?;
    self.transport.send(message).await?;
    Ok(())
  }
}

impl NotificationGateway for SmtpMailer {
  type Error = Error;

  async fn send_assignment(&self, record: AssignmentRecord) -> Result<()> {
    self
      .deliver(
        &record.giver_email,
        template::ASSIGNMENT_SUBJECT,
        template::assignment_body(&record),
      )
      .await
  }

  async fn send_confirmation(&self, participant: Participant) -> Result<()> {
    self
      .deliver(
        &participant.email,
        template::CONFIRMATION_SUBJECT,
        template::confirmation_body(&participant),
      )
      .await
  }
}
