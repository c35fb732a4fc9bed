//! Daily per-category aggregation
//!
//! One grouped pass over the categorized events: sum durations by
//! (date, category), reshape into a wide table, then complete the row set
//! against every calendar day of the requested month. Built as a single
//! transformation over an owned event list rather than row-by-row appends.

use std::collections::HashMap;

use caltally_domain::{CategorizedEvent, DailyCategoryMatrix, DailyRow};
use chrono::{Duration, NaiveDate};

use crate::month::MonthRange;

/// Aggregate categorized events into the daily matrix for one month.
///
/// Rows cover exactly the calendar days of `range`, in ascending order,
/// including days with no events. Columns are the categories observed in
/// the input, in first-observed order; a category with no events produces
/// no column at all. An empty input therefore yields a dates-only matrix.
pub fn aggregate_daily(events: &[CategorizedEvent], range: &MonthRange) -> DailyCategoryMatrix {
    let mut categories: Vec<String> = Vec::new();
    let mut totals: HashMap<(NaiveDate, usize), Duration> = HashMap::new();

    for event in events {
        let column = match categories.iter().position(|name| *name == event.category) {
            Some(index) => index,
            None => {
                categories.push(event.category.clone());
                categories.len() - 1
            }
        };

        let bucket = totals.entry((event.record.date, column)).or_insert_with(Duration::zero);
        *bucket = *bucket + event.record.duration;
    }

    let rows = range
        .days()
        .map(|date| DailyRow {
            date,
            cells: (0..categories.len()).map(|column| totals.get(&(date, column)).copied()).collect(),
        })
        .collect();

    DailyCategoryMatrix { categories, rows }
}
