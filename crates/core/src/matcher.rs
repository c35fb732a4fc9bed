//! Title-to-category matching
//!
//! A pure function over the immutable category map. Rules are scanned in
//! declaration order and the first rule containing the title wins, so a
//! title listed under several categories resolves to the earliest rule.
//! The inverted title→category lookup was rejected: it would silently turn
//! duplicated titles into last-write-wins.

use caltally_domain::{CategorizedEvent, CategoryMap, EventRecord};

/// Category assigned to events whose title matches no configured rule
pub const DEFAULT_CATEGORY: &str = "others";

/// Resolve the category for an event title.
///
/// Matching is exact and case-sensitive.
pub fn resolve_category<'a>(categories: &'a CategoryMap, title: &str) -> &'a str {
    categories
        .rules()
        .iter()
        .find(|rule| rule.titles.iter().any(|t| t == title))
        .map_or(DEFAULT_CATEGORY, |rule| rule.name.as_str())
}

/// Attach categories to a batch of records, preserving input order.
pub fn categorize(categories: &CategoryMap, records: Vec<EventRecord>) -> Vec<CategorizedEvent> {
    records
        .into_iter()
        .map(|record| {
            let category = resolve_category(categories, &record.title).to_string();
            CategorizedEvent { record, category }
        })
        .collect()
}
