use thiserror::Error;

/// HTTP-related errors with context for backend calls.
///
/// Every request issued by [`MarketingApiClient`](crate::api::MarketingApiClient)
/// that fails below the authentication layer ends up as one of these variants.
/// Each variant carries the URL or the reason so the failure can be logged
/// without leaking it to the user.
///
/// # Error Categories
///
/// - [`ClientCreation`] - HTTP client initialization failures
/// - [`RequestFailed`] - transport failures with URL and reason
/// - [`Timeout`] - request exceeded the configured timeout
/// - [`Status`] - the backend answered with a non-success status
/// - [`InvalidResponse`] - the body could not be decoded
///
/// # Examples
///
/// ```no_run
/// use server::common::errors::HttpError;
///
/// fn log_http_error(error: &HttpError) {
///     match error {
///         HttpError::Timeout { url, seconds } => {
///             log::warn!("HTTP request timeout: url={}, duration={}s", url, seconds);
///         }
///         HttpError::Status { url, status, .. } => {
///             log::error!("HTTP status {} from {}", status, url);
///         }
///         _ => log::error!("HTTP error: {}", error),
///     }
/// }
/// ```
///
/// [`ClientCreation`]: HttpError::ClientCreation
/// [`RequestFailed`]: HttpError::RequestFailed
/// [`Timeout`]: HttpError::Timeout
/// [`Status`]: HttpError::Status
/// [`InvalidResponse`]: HttpError::InvalidResponse
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// HTTP client initialization failed.
    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    /// The request never produced a response.
    ///
    /// # Fields
    /// - `url`: The URL that was being requested
    /// - `reason`: Transport error description
    #[error("Request failed: {url} - {reason}")]
    RequestFailed { url: String, reason: String },

    /// HTTP request timed out.
    #[error("Request timeout after {seconds}s: {url}")]
    Timeout { url: String, seconds: u64 },

    /// The backend responded with a non-success status other than 401/403.
    ///
    /// `reason` is the canonical status text, matching what the backend
    /// would report as `statusText`.
    #[error("API request failed: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// Received response doesn't match expected format.
    #[error("Invalid response: expected {expected}, got {actual}")]
    InvalidResponse { expected: String, actual: String },
}
