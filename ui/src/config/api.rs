use serde::Deserialize;
use mailroom_server::api::DEFAULT_REQUEST_TIMEOUT;
use mailroom_server::auth::SessionCredentials;
use std::time::Duration;

/// Connection settings for the marketing backend.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiConfig {
    base_url: Option<String>,
    session_token: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or("http://localhost:3000")
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT.as_secs())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs())
    }

    /// Session cookie credentials, when a non-empty token is configured.
    pub fn session(&self) -> Option<SessionCredentials> {
        self.session_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(SessionCredentials::new)
    }
}
