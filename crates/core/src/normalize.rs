//! Raw event normalization
//!
//! Converts provider payloads (timed or all-day boundaries) into immutable
//! [`EventRecord`] values.

use caltally_domain::{CalTallyError, EventRecord, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::ports::{RawCalendarEvent, RawEventTime};

/// Placeholder title for events without a usable summary
pub const NO_TITLE: &str = "No title";

/// Normalize one raw event into an [`EventRecord`].
///
/// The timed boundary value is preferred; the date-only value (all-day
/// events) is interpreted as midnight UTC, so a one-day all-day event with
/// an exclusive next-day end yields a 24h duration. The record's date is
/// the UTC calendar date of the start instant.
///
/// # Errors
/// - `CalTallyError::Parse` when a boundary is missing or is neither a valid
///   RFC 3339 timestamp nor a `YYYY-MM-DD` date.
/// - `CalTallyError::Data` when the end instant precedes the start.
pub fn normalize_event(raw: &RawCalendarEvent) -> Result<EventRecord> {
    let start = resolve_boundary(&raw.start)?;
    let end = resolve_boundary(&raw.end)?;

    let duration = end - start;
    if duration < Duration::zero() {
        return Err(CalTallyError::Data(format!(
            "event '{}' ends before it starts ({end} < {start})",
            raw.id
        )));
    }

    let title = raw
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| NO_TITLE.to_string(), str::to_owned);

    Ok(EventRecord { date: start.date_naive(), duration, title })
}

fn resolve_boundary(time: &RawEventTime) -> Result<DateTime<Utc>> {
    if let Some(timestamp) = &time.date_time {
        return DateTime::parse_from_rfc3339(timestamp)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| CalTallyError::Parse(format!("invalid timestamp '{timestamp}': {e}")));
    }

    if let Some(day) = &time.date {
        return NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(|parsed| parsed.and_time(NaiveTime::MIN).and_utc())
            .map_err(|e| CalTallyError::Parse(format!("invalid date '{day}': {e}")));
    }

    Err(CalTallyError::Parse("event boundary has neither a timestamp nor a date".to_string()))
}
