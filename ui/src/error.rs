use crate::components::common::{Msg, PopupActivityMsg};
use mailroom_server::api::ApiError;
use std::fmt::Display;
use std::sync::mpsc::Sender;

/// Application-level error for the composer workflow.
///
/// Each variant carries a message that is safe to log. What the user sees is
/// decided by [`ErrorReporter`] through an [`ErrorContext`], never by the raw
/// error text, so backend details do not leak into popups.
///
/// # Error Categories
///
/// - [`Api`] - backend call failed (network, status, decoding)
/// - [`Auth`] - the backend rejected the session
/// - [`Validation`] - user input rejected before any request
/// - [`Config`] - configuration could not be loaded or is invalid
/// - [`Channel`] - the event channel to the main loop is gone
///
/// # Examples
///
/// ```no_run
/// use mailroom::error::{AppError, ErrorReporter};
///
/// fn handle(error: AppError, reporter: &ErrorReporter) {
///     match error {
///         AppError::Auth(_) => { /* the auth latch shows its own screen */ }
///         other => reporter.report_simple(other, "SendDialog", "send"),
///     }
/// }
/// ```
///
/// [`Api`]: AppError::Api
/// [`Auth`]: AppError::Auth
/// [`Validation`]: AppError::Validation
/// [`Config`]: AppError::Config
/// [`Channel`]: AppError::Channel
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Backend call failures other than authentication.
    ///
    /// # Recovery
    /// - Show a generic message and let the user retry
    /// - Rebuild the request from current state on retry
    Api(String),

    /// Authentication and authorization errors.
    ///
    /// # Recovery
    /// - Latch the authentication-required state
    /// - Ask the user to sign in again
    Auth(String),

    /// Input rejected locally; never reaches the network.
    Validation(String),

    /// Configuration loading and validation errors.
    Config(String),

    /// Inter-component communication failures.
    Channel(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Api(msg) => write!(f, "API Error: {msg}"),
            AppError::Auth(msg) => write!(f, "Authentication Error: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Channel(msg) => write!(f, "Channel Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        if err.is_authentication() {
            AppError::Auth(err.to_string())
        } else {
            AppError::Api(err.to_string())
        }
    }
}

/// Context information for errors
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub user_message: String,
    pub technical_details: Option<String>,
}

impl ErrorContext {
    /// Create new error context with component and operation
    /// Uses generic message based on component. Use .with_message() for custom messages.
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            user_message: Self::generate_fallback_message(component),
            technical_details: None,
        }
    }

    fn generate_fallback_message(component: &str) -> String {
        format!("An error occurred in {component}. Please try again.")
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.user_message = message.to_string();
        self
    }

    pub fn with_technical_details(mut self, details: &str) -> Self {
        self.technical_details = Some(details.to_string());
        self
    }
}

/// Contextual error with rich information
#[derive(Debug, Clone)]
pub struct ContextualError {
    pub error: AppError,
    pub context: ErrorContext,
}

impl ContextualError {
    pub fn new(error: AppError, context: ErrorContext) -> Self {
        Self { error, context }
    }
}

impl Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.context.user_message, self.error)
    }
}

/// Central error reporting system
///
/// Logs every report with its context and posts a popup message to the main
/// loop. Technical details go to the log only.
#[derive(Clone)]
pub struct ErrorReporter {
    tx: Sender<Msg>,
}

impl ErrorReporter {
    pub fn new(tx: Sender<Msg>) -> Self {
        Self { tx }
    }

    /// Report a simple error with basic context
    pub fn report_simple(&self, error: AppError, component: &str, operation: &str) {
        let context =
            ErrorContext::new(component, operation).with_technical_details(&error.to_string());
        self.report(error, context);
    }

    /// Report error with full context
    pub fn report(&self, error: AppError, context: ErrorContext) {
        let contextual_error = ContextualError::new(error.clone(), context.clone());

        log::error!(
            "[{}:{}] {} {}",
            context.component,
            context.operation,
            contextual_error,
            self.format_additional_context(&context)
        );

        let popup_msg =
            Msg::PopupActivity(PopupActivityMsg::ShowError(self.user_facing_error(&error, &context)));
        if let Err(e) = self.tx.send(popup_msg) {
            log::error!("Failed to send popup message: {e}");
        }
    }

    fn format_additional_context(&self, context: &ErrorContext) -> String {
        match context.technical_details {
            Some(ref technical_details) => format!("\nTechnical: {technical_details}"),
            None => String::new(),
        }
    }

    /// Same variant as `error`, carrying only the user-facing text.
    fn user_facing_error(&self, error: &AppError, context: &ErrorContext) -> AppError {
        let message = context.user_message.clone();
        match error {
            AppError::Api(_) => AppError::Api(message),
            AppError::Auth(_) => AppError::Auth(message),
            AppError::Validation(_) => AppError::Validation(message),
            AppError::Config(_) => AppError::Config(message),
            AppError::Channel(_) => AppError::Channel(message),
        }
    }

    // ========== Helper Methods for Common Error Patterns ==========

    /// Report message sending errors (mpsc channel errors)
    pub fn report_send_error(&self, context: &str, error: impl Display) {
        let app_error = AppError::Channel(format!("Failed to send {context}: {error}"));
        self.report_simple(app_error, "MessageChannel", "send_message");
    }

    /// Report a failed backend call with the message the user should see
    pub fn report_api_error(&self, operation: &str, user_message: &str, error: impl Display) {
        let context = ErrorContext::new("MarketingApi", operation)
            .with_message(user_message)
            .with_technical_details(&error.to_string());

        let app_error = AppError::Api(error.to_string());
        self.report(app_error, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailroom_server::common::HttpError;
    use std::sync::mpsc;

    #[test]
    fn test_error_context_creation() {
        let context = ErrorContext::new("TestComponent", "test_operation");
        assert_eq!(context.component, "TestComponent");
        assert_eq!(context.operation, "test_operation");
        assert_eq!(
            context.user_message,
            "An error occurred in TestComponent. Please try again."
        );
    }

    #[test]
    fn test_api_error_conversion_separates_auth() {
        let auth: AppError = ApiError::authentication(403).into();
        assert!(matches!(auth, AppError::Auth(_)));

        let other: AppError = ApiError::Http(HttpError::Timeout {
            url: "u".to_string(),
            seconds: 5,
        })
        .into();
        assert!(matches!(other, AppError::Api(_)));
    }

    #[test]
    fn test_report_simple_uses_component_fallback_message() {
        let (tx, rx) = mpsc::channel();
        let reporter = ErrorReporter::new(tx);

        reporter.report_simple(
            AppError::Channel("receiver dropped".to_string()),
            "TaskManager",
            "async_operation",
        );

        let msg = rx.recv().expect("Should receive error message");
        assert_eq!(
            msg,
            Msg::PopupActivity(PopupActivityMsg::ShowError(AppError::Channel(
                "An error occurred in TaskManager. Please try again.".to_string()
            )))
        );
    }

    #[test]
    fn test_api_error_popup_hides_technical_details() {
        let (tx, rx) = mpsc::channel();
        let reporter = ErrorReporter::new(tx);

        reporter.report_api_error(
            "send_emails",
            "Failed to send email. Please try again.",
            "Request failed: http://internal:8080 - connection refused",
        );

        match rx.recv().unwrap() {
            Msg::PopupActivity(PopupActivityMsg::ShowError(AppError::Api(message))) => {
                assert_eq!(message, "Failed to send email. Please try again.");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_error_context_builder_pattern() {
        let context = ErrorContext::new("TestComponent", "test_operation")
            .with_message("Custom message")
            .with_technical_details("Technical information");

        assert_eq!(context.user_message, "Custom message");
        assert_eq!(
            context.technical_details,
            Some("Technical information".to_string())
        );
    }

    #[test]
    fn test_contextual_error_display() {
        let error = AppError::Config("Test error".to_string());
        let context = ErrorContext::new("TestComponent", "test_operation");

        let contextual = ContextualError::new(error, context);
        let display_str = format!("{contextual}");

        assert!(display_str.contains("TestComponent"));
        assert!(display_str.contains("Test error"));
    }

    #[test]
    fn test_format_additional_context() {
        let (tx, _rx) = mpsc::channel();
        let reporter = ErrorReporter::new(tx);

        let context = ErrorContext::new("TestComponent", "test_operation")
            .with_technical_details("Technical error details");

        let formatted = reporter.format_additional_context(&context);

        assert_eq!(formatted, "\nTechnical: Technical error details");
    }
}
