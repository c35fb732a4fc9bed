//! Calendar provider port
//!
//! Raw event payloads cross this boundary exactly as the provider returns
//! them; normalization into [`caltally_domain::EventRecord`] happens in this
//! crate.

use async_trait::async_trait;
use caltally_domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event boundary as returned by the provider: a timed instant or an
/// all-day date. Well-formed payloads populate exactly one of the two.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
}

impl RawEventTime {
    /// Boundary with a timed RFC 3339 value.
    pub fn timed(value: impl Into<String>) -> Self {
        Self { date_time: Some(value.into()), date: None }
    }

    /// Boundary with a date-only value (all-day events).
    pub fn all_day(value: impl Into<String>) -> Self {
        Self { date_time: None, date: Some(value.into()) }
    }
}

/// Calendar event from the provider API (before parsing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: RawEventTime,
    pub end: RawEventTime,
}

/// Trait for calendar provider operations
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Fetch all events within a half-open time range.
    ///
    /// Implementations follow provider pagination internally; the returned
    /// list is the complete result set for the range.
    async fn fetch_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawCalendarEvent>>;
}
