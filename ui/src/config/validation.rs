use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid page_size: {configured} (allowed: {allowed:?})")]
    PageSize {
        configured: u32,
        allowed: &'static [u32],
    },
    #[error("Invalid search_debounce_ms: {configured} (limit: {limit})")]
    SearchDebounce { configured: u64, limit: u64 },
    #[error("Invalid success_close_delay_ms: {configured} (limit: {limit})")]
    SuccessCloseDelay { configured: u64, limit: u64 },
    #[error(
        "Invalid api.request_timeout_secs: {configured} (min: {min_limit}, max: {max_limit})"
    )]
    RequestTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid max_concurrent_requests: {configured} (max: {limit})")]
    MaxConcurrentRequests { configured: usize, limit: usize },
    #[error("Invalid api.base_url: {configured}")]
    BaseUrl { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::PageSize {
                configured,
                allowed,
            } => {
                format!(
                    "Page size not supported!\n\n\
                    Your configured value: {configured}\n\
                    Allowed values: {allowed:?}\n\n\
                    Please update page_size in config.toml."
                )
            }
            ConfigValidationError::SearchDebounce { configured, limit } => {
                format!(
                    "Search debounce too long!\n\n\
                    Your configured value: {configured} ms\n\
                    Recommended maximum: {limit} ms\n\n\
                    Please update search_debounce_ms in config.toml."
                )
            }
            ConfigValidationError::SuccessCloseDelay { configured, limit } => {
                format!(
                    "Send dialog close delay too long!\n\n\
                    Your configured value: {configured} ms\n\
                    Recommended maximum: {limit} ms\n\n\
                    Please update success_close_delay_ms in config.toml."
                )
            }
            ConfigValidationError::RequestTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Request timeout out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update request_timeout_secs in the [api] section of config.toml."
                )
            }
            ConfigValidationError::MaxConcurrentRequests { configured, limit } => {
                format!(
                    "Concurrent request limit out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: 1 - {limit}\n\n\
                    Please update max_concurrent_requests in config.toml."
                )
            }
            ConfigValidationError::BaseUrl { configured } => {
                format!(
                    "API base URL is not valid!\n\n\
                    Your configured value: '{configured}'\n\n\
                    The URL must start with http:// or https://. \
                    Please update base_url in the [api] section of config.toml."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}

impl ConfigLoadResult {
    pub fn config(&self) -> Result<&AppConfig, String> {
        match self {
            ConfigLoadResult::Success(config) => Ok(config),
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => {
                Err(msg.clone())
            }
        }
    }
}
