//! Access token resolution for the Google Calendar API
//!
//! A pre-issued access token from the environment wins; otherwise the
//! refresh-token flow against the Google OAuth token endpoint is used.

use caltally_domain::{CalTallyError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// OAuth credentials for the Google Calendar API
#[derive(Debug, Clone, Default)]
pub struct GoogleCredentials {
    access_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    token_url: Option<String>,
}

impl GoogleCredentials {
    /// Read credentials from the environment.
    ///
    /// Recognized variables: `CALTALLY_GOOGLE_ACCESS_TOKEN`,
    /// `CALTALLY_GOOGLE_CLIENT_ID`, `CALTALLY_GOOGLE_CLIENT_SECRET`,
    /// `CALTALLY_GOOGLE_REFRESH_TOKEN`. Missing variables are not an error
    /// here; resolution fails later only if no token path is possible.
    pub fn from_env() -> Self {
        Self {
            access_token: std::env::var("CALTALLY_GOOGLE_ACCESS_TOKEN").ok(),
            client_id: std::env::var("CALTALLY_GOOGLE_CLIENT_ID").ok(),
            client_secret: std::env::var("CALTALLY_GOOGLE_CLIENT_SECRET").ok(),
            refresh_token: std::env::var("CALTALLY_GOOGLE_REFRESH_TOKEN").ok(),
            token_url: None,
        }
    }

    /// Credentials with a pre-issued access token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self { access_token: Some(token.into()), ..Self::default() }
    }

    /// Credentials using the refresh-token flow.
    pub fn with_refresh_token(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: None,
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            refresh_token: Some(refresh_token.into()),
            token_url: None,
        }
    }

    /// Override the token endpoint (used by tests against a local server).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Resolve a usable access token.
    ///
    /// # Errors
    /// Returns `CalTallyError::Auth` when no access token is configured and
    /// the refresh-token flow is incomplete or rejected by the endpoint.
    pub async fn access_token(&self, http: &Client) -> Result<String> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }

        let client_id = self.client_id.as_deref().ok_or_else(|| {
            CalTallyError::Auth("CALTALLY_GOOGLE_CLIENT_ID not set".to_string())
        })?;
        let client_secret = self.client_secret.as_deref().ok_or_else(|| {
            CalTallyError::Auth("CALTALLY_GOOGLE_CLIENT_SECRET not set".to_string())
        })?;
        let refresh_token = self.refresh_token.as_deref().ok_or_else(|| {
            CalTallyError::Auth("CALTALLY_GOOGLE_REFRESH_TOKEN not set".to_string())
        })?;

        let token_url = self.token_url.as_deref().unwrap_or(GOOGLE_TOKEN_URL);
        debug!("refreshing Google access token");

        let response = http
            .post(token_url)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| CalTallyError::Auth(format!("Token refresh request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CalTallyError::Auth(format!(
                "Token refresh failed ({status}): {error_text}"
            )));
        }

        let refresh_response: TokenRefreshResponse = response
            .json()
            .await
            .map_err(|e| CalTallyError::Auth(format!("Failed to parse token response: {e}")))?;

        Ok(refresh_response.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenRefreshResponse {
    access_token: String,
    #[allow(dead_code)]
    expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn test_from_env_reads_access_token() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("CALTALLY_GOOGLE_ACCESS_TOKEN", "env-token");
        let credentials = GoogleCredentials::from_env();
        assert_eq!(credentials.access_token.as_deref(), Some("env-token"));

        std::env::remove_var("CALTALLY_GOOGLE_ACCESS_TOKEN");
        let credentials = GoogleCredentials::from_env();
        assert!(credentials.access_token.is_none());
    }

    #[tokio::test]
    async fn test_pre_issued_token_wins() {
        let credentials = GoogleCredentials::with_access_token("pre-issued");
        let token = credentials.access_token(&Client::new()).await.unwrap();
        assert_eq!(token, "pre-issued");
    }

    #[tokio::test]
    async fn test_missing_credentials_is_an_auth_error() {
        let credentials = GoogleCredentials::default();
        let err = credentials.access_token(&Client::new()).await.unwrap_err();
        assert!(matches!(err, CalTallyError::Auth(_)));
    }

    #[tokio::test]
    async fn test_refresh_flow_posts_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-token",
                "expires_in": 3599,
            })))
            .mount(&server)
            .await;

        let credentials = GoogleCredentials::with_refresh_token("id", "secret", "refresh-1")
            .with_token_url(format!("{}/token", server.uri()));

        let token = credentials.access_token(&Client::new()).await.unwrap();
        assert_eq!(token, "fresh-token");
    }

    #[tokio::test]
    async fn test_rejected_refresh_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let credentials = GoogleCredentials::with_refresh_token("id", "secret", "expired")
            .with_token_url(format!("{}/token", server.uri()));

        let err = credentials.access_token(&Client::new()).await.unwrap_err();
        match err {
            CalTallyError::Auth(message) => {
                assert!(message.contains("400"));
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }
}
