//! # CalTally Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The monthly export pipeline (normalize, classify, aggregate)
//! - Port interfaces (traits) for calendar retrieval
//!
//! ## Architecture Principles
//! - Only depends on `caltally-domain`
//! - No HTTP or filesystem code
//! - External collaborators reached via traits
//! - Pure, testable business logic

pub mod aggregate;
pub mod matcher;
pub mod month;
pub mod normalize;
pub mod ports;
pub mod service;
pub mod uncategorized;

// Re-export specific items to avoid ambiguity
pub use aggregate::aggregate_daily;
pub use matcher::{categorize, resolve_category, DEFAULT_CATEGORY};
pub use month::MonthRange;
pub use normalize::{normalize_event, NO_TITLE};
pub use ports::{CalendarProvider, RawCalendarEvent, RawEventTime};
pub use service::ExportService;
pub use uncategorized::extract_uncategorized;
