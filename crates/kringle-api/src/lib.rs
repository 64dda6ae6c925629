//! JSON HTTP API for Kringle.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`ParticipantStore`] and [`AssignmentStore`], plus an optional
//! [`NotificationGateway`] for outbound email. TLS and any outer auth layer
//! are the deployer's responsibility — the admin routes are as open as the
//! registration form.

pub mod assignments;
pub mod dashboard;
pub mod error;
pub mod registration;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use kringle_core::{
  gateway::NotificationGateway,
  store::{AssignmentStore, ParticipantStore},
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `KRINGLE_`-prefixed environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// SMTP relay host, dialled over implicit TLS.
  #[serde(default = "default_smtp_relay")]
  pub smtp_relay: String,
  /// SMTP credentials. Leaving either unset disables outbound email
  /// without affecting registration or assignment generation.
  pub smtp_username: Option<String>,
  pub smtp_password: Option<String>,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("kringle.db") }
fn default_smtp_relay() -> String { "smtp.gmail.com".to_string() }

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, G> {
  pub store:      Arc<S>,
  /// `None` when SMTP credentials are not configured.
  pub mailer:     Option<Arc<G>>,
  /// Single-writer guard for assignment-table mutation. The admin actions
  /// are unauthenticated and can arrive concurrently; serialising them
  /// keeps a draw from racing a send pass into a lost update.
  pub admin_lock: Arc<Mutex<()>>,
}

impl<S, G> AppState<S, G> {
  pub fn new(store: S, mailer: Option<G>) -> Self {
    Self {
      store:      Arc::new(store),
      mailer:     mailer.map(Arc::new),
      admin_lock: Arc::new(Mutex::new(())),
    }
  }
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      mailer:     self.mailer.clone(),
      admin_lock: Arc::clone(&self.admin_lock),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router over `state`.
pub fn router<S, G>(state: AppState<S, G>) -> Router
where
  S: ParticipantStore + AssignmentStore + 'static,
  G: NotificationGateway + 'static,
{
  Router::new()
    .route(
      "/participants",
      post(registration::register::<S, G>).get(registration::list::<S, G>),
    )
    .route("/admin/dashboard", get(dashboard::handler::<S, G>))
    .route(
      "/admin/assignments/generate",
      post(assignments::generate::<S, G>),
    )
    .route(
      "/admin/assignments/regenerate",
      post(assignments::regenerate::<S, G>),
    )
    .route("/admin/assignments/send", post(assignments::send::<S, G>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
