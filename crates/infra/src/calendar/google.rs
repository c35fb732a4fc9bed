//! Google Calendar provider implementation

use async_trait::async_trait;
use caltally_core::{CalendarProvider, RawCalendarEvent, RawEventTime};
use caltally_domain::{CalTallyError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::token::GoogleCredentials;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar provider fetching events over REST
pub struct GoogleCalendarProvider {
    http: Client,
    credentials: GoogleCredentials,
    calendar_id: String,
    base_url: String,
}

impl GoogleCalendarProvider {
    /// Create a provider for one calendar.
    pub fn new(credentials: GoogleCredentials, calendar_id: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            credentials,
            calendar_id: calendar_id.into(),
            base_url: GOOGLE_CALENDAR_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_page(
        &self,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<GoogleEventsResponse> {
        let url = format!("{}/calendars/{}/events", self.base_url, self.calendar_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| CalTallyError::Network(format!("Google API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CalTallyError::Network(format!(
                "Google API error ({status}): {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CalTallyError::Parse(format!("Failed to parse Google response: {e}")))
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    async fn fetch_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawCalendarEvent>> {
        let access_token = self.credentials.access_token(&self.http).await?;

        let base_query: Vec<(&str, String)> = vec![
            ("timeMin", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("timeMax", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];

        // Follow nextPageToken until the provider reports no further pages.
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = base_query.clone();
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page = self.fetch_page(&access_token, &query).await?;
            debug!(count = page.items.len(), calendar_id = %self.calendar_id, "fetched events page");

            events.extend(page.items.into_iter().map(GoogleCalendarEvent::into_raw));

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleCalendarEvent>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleCalendarEvent {
    id: String,
    summary: Option<String>,
    start: EventDateTime,
    end: EventDateTime,
}

#[derive(Debug, Default, Deserialize)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}

impl GoogleCalendarEvent {
    fn into_raw(self) -> RawCalendarEvent {
        // Blank summaries are treated as absent; normalization supplies the
        // placeholder title.
        let summary = self.summary.filter(|s| !s.trim().is_empty());

        RawCalendarEvent {
            id: self.id,
            summary,
            start: RawEventTime { date_time: self.start.date_time, date: self.start.date },
            end: RawEventTime { date_time: self.end.date_time, date: self.end.date },
        }
    }
}
