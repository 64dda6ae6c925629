//! kringle-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `KRINGLE_*` environment variables, opens the SQLite store, and serves
//! the gift-exchange API over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use kringle_api::{AppState, ServerConfig};
use kringle_mailer::{SmtpConfig, SmtpMailer};
use kringle_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Kringle gift-exchange server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KRINGLE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Outbound email is optional: without credentials the exchange still
  // registers participants and draws assignments, it just cannot notify.
  let mailer = match (&server_cfg.smtp_username, &server_cfg.smtp_password) {
    (Some(username), Some(password)) => Some(
      SmtpMailer::new(&SmtpConfig {
        relay:    server_cfg.smtp_relay.clone(),
        username: username.clone(),
        password: password.clone(),
      })
      .context("failed to build SMTP mailer")?,
    ),
    _ => {
      tracing::warn!(
        "SMTP credentials not configured; outbound email is disabled"
      );
      None
    }
  };

  let state = AppState::new(store, mailer);
  let app = kringle_api::router(state);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
