//! Core types and trait definitions for the Kringle gift-exchange service.
//!
//! This crate is deliberately free of HTTP, SMTP, and database dependencies.
//! Every other crate in the workspace depends on it.

pub mod assignment;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod participant;
pub mod store;

pub use error::{Error, Result};
