//! # CalTally Infra
//!
//! Infrastructure adapters behind the core ports:
//! - Google Calendar HTTP client (pagination, token refresh)
//! - Configuration loading (TOML/JSON probing)
//! - CSV report writers

pub mod calendar;
pub mod config;
pub mod report;

pub use calendar::{create_provider, GoogleCalendarProvider, GoogleCredentials};
