//! Monthly export service - core business logic

use std::sync::Arc;

use caltally_domain::{CategoryMap, MonthlyExport, Result};
use tracing::{debug, info};

use crate::aggregate::aggregate_daily;
use crate::matcher::categorize;
use crate::month::MonthRange;
use crate::normalize::normalize_event;
use crate::ports::CalendarProvider;
use crate::uncategorized::extract_uncategorized;

/// Export service producing the monthly summary tables
pub struct ExportService {
    provider: Arc<dyn CalendarProvider>,
    categories: CategoryMap,
}

impl ExportService {
    /// Create a new export service
    pub fn new(provider: Arc<dyn CalendarProvider>, categories: CategoryMap) -> Self {
        Self { provider, categories }
    }

    /// Run the full pipeline for one month.
    ///
    /// Fetches every event in the month range, normalizes and classifies
    /// them, and produces the daily matrix plus the uncategorized list.
    /// Either the whole export completes or it fails before producing any
    /// output; a parse failure on a single event aborts the run.
    ///
    /// # Errors
    /// Propagates provider failures and `Parse`/`Data` errors from
    /// normalization.
    pub async fn export_month(&self, range: MonthRange) -> Result<MonthlyExport> {
        info!(year = range.year(), month = range.month(), "starting monthly export");

        let raw_events = self.provider.fetch_events(range.start(), range.end()).await?;
        debug!(count = raw_events.len(), "fetched raw events");

        let records =
            raw_events.iter().map(normalize_event).collect::<Result<Vec<_>>>()?;
        let categorized = categorize(&self.categories, records);

        let matrix = aggregate_daily(&categorized, &range);
        let uncategorized = extract_uncategorized(&categorized);

        info!(
            events = categorized.len(),
            categories = matrix.categories.len(),
            uncategorized = uncategorized.rows.len(),
            "monthly export complete"
        );

        Ok(MonthlyExport { matrix, uncategorized })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{RawCalendarEvent, RawEventTime};
    use async_trait::async_trait;
    use caltally_domain::{CalTallyError, CategoryRule, Result as DomainResult};
    use chrono::{DateTime, Utc};

    /// Mock provider serving a fixed event list
    struct MockProvider {
        events: Vec<RawCalendarEvent>,
    }

    #[async_trait]
    impl CalendarProvider for MockProvider {
        async fn fetch_events(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> DomainResult<Vec<RawCalendarEvent>> {
            Ok(self.events.clone())
        }
    }

    fn raw_event(id: &str, summary: Option<&str>, start: &str, end: &str) -> RawCalendarEvent {
        RawCalendarEvent {
            id: id.to_string(),
            summary: summary.map(str::to_owned),
            start: RawEventTime::timed(start),
            end: RawEventTime::timed(end),
        }
    }

    fn categories() -> CategoryMap {
        CategoryMap::new(vec![CategoryRule {
            name: "work".to_string(),
            titles: vec!["Standup".to_string()],
        }])
    }

    fn service(events: Vec<RawCalendarEvent>) -> ExportService {
        ExportService::new(Arc::new(MockProvider { events }), categories())
    }

    #[tokio::test]
    async fn test_export_produces_both_tables() {
        let svc = service(vec![
            raw_event("a", Some("Standup"), "2024-02-05T09:00:00Z", "2024-02-05T09:30:00Z"),
            raw_event("b", Some("Dentist"), "2024-02-12T14:00:00Z", "2024-02-12T14:45:00Z"),
        ]);

        let export = svc.export_month(MonthRange::new(2024, 2).unwrap()).await.unwrap();

        assert_eq!(export.matrix.rows.len(), 29);
        assert_eq!(export.matrix.categories, vec!["work", "others"]);
        assert_eq!(export.matrix.to_rows()[4][1], "00:30");
        // Feb 12 row, "others" column
        assert_eq!(export.matrix.to_rows()[11][2], "00:45");
        assert_eq!(export.uncategorized.rows.len(), 1);
        assert_eq!(export.uncategorized.rows[0].title, "Dentist");
        assert_eq!(export.uncategorized.to_rows()[0][2], "00:45");
    }

    #[tokio::test]
    async fn test_export_is_idempotent_for_fixed_input() {
        let events = vec![
            raw_event("a", Some("Standup"), "2024-02-05T09:00:00Z", "2024-02-05T09:30:00Z"),
            raw_event("b", Some("Dentist"), "2024-02-12T14:00:00Z", "2024-02-12T14:45:00Z"),
        ];
        let svc = service(events);

        let range = MonthRange::new(2024, 2).unwrap();
        let first = svc.export_month(range).await.unwrap();
        let second = svc.export_month(range).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_month_is_not_an_error() {
        let svc = service(Vec::new());

        let export = svc.export_month(MonthRange::new(2024, 2).unwrap()).await.unwrap();
        assert_eq!(export.matrix.rows.len(), 29);
        assert!(export.matrix.categories.is_empty());
        assert!(export.uncategorized.rows.is_empty());
    }

    #[tokio::test]
    async fn test_single_malformed_event_aborts_the_run() {
        let svc = service(vec![
            raw_event("a", Some("Standup"), "2024-02-05T09:00:00Z", "2024-02-05T09:30:00Z"),
            raw_event("b", Some("Broken"), "garbage", "2024-02-05T10:00:00Z"),
        ]);

        let err = svc.export_month(MonthRange::new(2024, 2).unwrap()).await.unwrap_err();
        assert!(matches!(err, CalTallyError::Parse(_)));
    }
}
