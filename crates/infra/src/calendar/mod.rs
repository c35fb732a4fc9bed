//! Google Calendar integration

mod google;
mod token;

use std::sync::Arc;

use caltally_core::CalendarProvider;
use caltally_domain::{CalTallyError, CalendarConfig, Result};

pub use google::GoogleCalendarProvider;
pub use token::GoogleCredentials;

/// Create a calendar provider instance by configured name
pub fn create_provider(
    config: &CalendarConfig,
    credentials: GoogleCredentials,
) -> Result<Arc<dyn CalendarProvider>> {
    match config.provider.as_str() {
        "google" => {
            Ok(Arc::new(GoogleCalendarProvider::new(credentials, config.calendar_id.clone())))
        }
        other => Err(CalTallyError::InvalidInput(format!("unknown provider: {other}"))),
    }
}
