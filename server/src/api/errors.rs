use crate::common::errors::HttpError;
use thiserror::Error;

/// Message shown when the backend rejects the session.
pub const AUTHENTICATION_REQUIRED_MESSAGE: &str = "You are not authenticated or authorized to access this website. Please ensure you have a valid authentication token.";

/// Errors returned by the marketing API client.
///
/// Authentication failures are kept apart from every other failure so the
/// caller can latch the application into the authentication-required state
/// instead of showing a per-action error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered 401 or 403.
    #[error("{message}")]
    Authentication { status: u16, message: String },

    /// Transport, status or decoding failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The client was built with unusable settings.
    #[error("API configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn authentication(status: u16) -> Self {
        ApiError::Authentication {
            status,
            message: AUTHENTICATION_REQUIRED_MESSAGE.to_string(),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }
}

/// Maps an HTTP status to the error the client reports for it.
///
/// `reason` is the status text used in the message for generic failures.
pub fn classify_status(url: &str, status: u16, reason: &str) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(ApiError::authentication(status)),
        _ => Err(ApiError::Http(HttpError::Status {
            url: url.to_string(),
            status,
            reason: reason.to_string(),
        })),
    }
}
