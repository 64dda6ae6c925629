//! Error types for `kringle-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("need at least 2 participants to draw assignments, have {count}")]
  InsufficientParticipants { count: usize },

  #[error("assignments have already been emailed; refusing to redraw them")]
  AlreadyNotified,

  #[error("missing required field: {0}")]
  MissingField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
