//! Core domain + application logic for the results-relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the HTTP
//! surface live behind ports (traits) implemented in adapter crates.

pub mod chunker;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod locale;
pub mod logging;
pub mod ports;
pub mod relay;
pub mod submission;

pub use errors::{Error, Result};
