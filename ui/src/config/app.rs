use super::{
    LoggingConfig, api::ApiConfig, limits::*, validation::ConfigValidationError,
};
use crate::components::validation_patterns::PageSizeValidator;
use crate::validation::Validator;
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    page_size: Option<u32>,
    search_debounce_ms: Option<u64>,
    success_close_delay_ms: Option<u64>,
    max_concurrent_requests: Option<usize>,

    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = PageSizeValidator.validate(&self.page_size()) {
            errors.push(ConfigValidationError::PageSize {
                configured: e.configured,
                allowed: e.allowed,
            });
        }

        let debounce_ms = self.search_debounce().as_millis() as u64;
        if debounce_ms > MAX_SEARCH_DEBOUNCE_MS {
            errors.push(ConfigValidationError::SearchDebounce {
                configured: debounce_ms,
                limit: MAX_SEARCH_DEBOUNCE_MS,
            });
        }

        let close_delay_ms = self.success_close_delay().as_millis() as u64;
        if close_delay_ms > MAX_SUCCESS_CLOSE_DELAY_MS {
            errors.push(ConfigValidationError::SuccessCloseDelay {
                configured: close_delay_ms,
                limit: MAX_SUCCESS_CLOSE_DELAY_MS,
            });
        }

        let timeout = self.api.request_timeout_secs();
        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::RequestTimeout {
                configured: timeout,
                min_limit: MIN_REQUEST_TIMEOUT_SECS,
                max_limit: MAX_REQUEST_TIMEOUT_SECS,
            });
        }

        let concurrency = self.max_concurrent_requests();
        if concurrency == 0 || concurrency > MAX_CONCURRENT_REQUESTS {
            errors.push(ConfigValidationError::MaxConcurrentRequests {
                configured: concurrency,
                limit: MAX_CONCURRENT_REQUESTS,
            });
        }

        let base_url = self.api.base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(ConfigValidationError::BaseUrl {
                configured: base_url.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // App-specific configuration accessors
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.unwrap_or(300))
    }

    pub fn success_close_delay(&self) -> Duration {
        Duration::from_millis(self.success_close_delay_ms.unwrap_or(2000))
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests.unwrap_or(4)
    }

    // Configuration section accessors
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}
