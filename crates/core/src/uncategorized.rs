//! Residual extraction of unmatched events

use caltally_domain::{CategorizedEvent, UncategorizedReport, UncategorizedRow};

use crate::matcher::DEFAULT_CATEGORY;

/// Collect events that fell through to the default category.
///
/// Rows are sorted by date for deterministic output; the relative order of
/// same-day events follows the input. Days with no uncategorized events are
/// simply absent — no date completion here.
pub fn extract_uncategorized(events: &[CategorizedEvent]) -> UncategorizedReport {
    let mut rows: Vec<UncategorizedRow> = events
        .iter()
        .filter(|event| event.category == DEFAULT_CATEGORY)
        .map(|event| UncategorizedRow {
            date: event.record.date,
            title: event.record.title.clone(),
            duration: event.record.duration,
        })
        .collect();

    rows.sort_by_key(|row| row.date);

    UncategorizedReport { rows }
}
