//! Common data types used throughout the application

use chrono::{Duration, NaiveDate};

/// Normalized calendar event: one input row of the export pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub duration: Duration,
    pub title: String,
}

/// Event with its resolved category attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedEvent {
    pub record: EventRecord,
    pub category: String,
}

/// One row of the daily matrix: a calendar day and one cell per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub cells: Vec<Option<Duration>>,
}

/// Date × category table covering every day of the exported month
///
/// `categories` carries the column order; each row in `rows` holds one cell
/// per category, in that order, whether or not any event fell on the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCategoryMatrix {
    pub categories: Vec<String>,
    pub rows: Vec<DailyRow>,
}

impl DailyCategoryMatrix {
    /// Header row: `date` followed by the category columns.
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.categories.len() + 1);
        header.push("date".to_string());
        header.extend(self.categories.iter().cloned());
        header
    }

    /// Render every row with `HH:MM` cells; empty buckets render as `""`.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut out = Vec::with_capacity(row.cells.len() + 1);
                out.push(row.date.to_string());
                out.extend(row.cells.iter().map(|cell| cell.map(format_hh_mm).unwrap_or_default()));
                out
            })
            .collect()
    }
}

/// One event in the residual report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncategorizedRow {
    pub date: NaiveDate,
    pub title: String,
    pub duration: Duration,
}

/// Events that resolved to the default category, sorted by date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UncategorizedReport {
    pub rows: Vec<UncategorizedRow>,
}

impl UncategorizedReport {
    /// Header row for serialized output.
    pub fn header() -> Vec<String> {
        vec!["date".to_string(), "title".to_string(), "duration".to_string()]
    }

    /// Render every row with the duration formatted as `HH:MM`.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![row.date.to_string(), row.title.clone(), format_hh_mm(row.duration)]
            })
            .collect()
    }
}

/// Complete result of one monthly export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExport {
    pub matrix: DailyCategoryMatrix,
    pub uncategorized: UncategorizedReport,
}

/// Format a duration as zero-padded `HH:MM`.
///
/// Hours are unbounded: totals past 24 hours render as e.g. `26:15` rather
/// than wrapping modulo 24. Sub-minute remainders truncate.
pub fn format_hh_mm(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hh_mm_zero_padding() {
        assert_eq!(format_hh_mm(Duration::minutes(0)), "00:00");
        assert_eq!(format_hh_mm(Duration::minutes(5)), "00:05");
        assert_eq!(format_hh_mm(Duration::minutes(30)), "00:30");
    }

    #[test]
    fn test_format_hh_mm_does_not_wrap_past_24_hours() {
        assert_eq!(format_hh_mm(Duration::minutes(70)), "01:10");
        assert_eq!(format_hh_mm(Duration::hours(24)), "24:00");
        assert_eq!(format_hh_mm(Duration::minutes(26 * 60 + 15)), "26:15");
    }

    #[test]
    fn test_format_hh_mm_truncates_seconds() {
        assert_eq!(format_hh_mm(Duration::seconds(90)), "00:01");
        assert_eq!(format_hh_mm(Duration::seconds(59)), "00:00");
    }

    #[test]
    fn test_matrix_rendering_with_empty_cells() {
        let matrix = DailyCategoryMatrix {
            categories: vec!["work".to_string(), "others".to_string()],
            rows: vec![
                DailyRow {
                    date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                    cells: vec![Some(Duration::minutes(30)), None],
                },
                DailyRow {
                    date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
                    cells: vec![None, None],
                },
            ],
        };

        assert_eq!(matrix.header(), vec!["date", "work", "others"]);
        assert_eq!(
            matrix.to_rows(),
            vec![
                vec!["2024-02-05".to_string(), "00:30".to_string(), String::new()],
                vec!["2024-02-06".to_string(), String::new(), String::new()],
            ]
        );
    }

    #[test]
    fn test_uncategorized_report_rendering() {
        let report = UncategorizedReport {
            rows: vec![UncategorizedRow {
                date: NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(),
                title: "Dentist".to_string(),
                duration: Duration::minutes(45),
            }],
        };

        assert_eq!(UncategorizedReport::header(), vec!["date", "title", "duration"]);
        assert_eq!(
            report.to_rows(),
            vec![vec!["2024-02-12".to_string(), "Dentist".to_string(), "00:45".to_string()]]
        );
    }
}
