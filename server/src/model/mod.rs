//! Wire models for the marketing email API.
//!
//! Every type here mirrors a JSON body exchanged with the backend. Field names
//! are camelCase on the wire and optional fields are omitted when absent.

pub mod document;

pub use document::EditorDocument;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user eligible to receive a marketing email.
///
/// Recipients are immutable once fetched; identity is the opaque `id`.
///
/// # Examples
///
/// ```no_run
/// use server::model::Recipient;
///
/// let recipient = Recipient::new("u-1", "Ana", "ana@example.com")
///     .with_language("bg")
///     .with_country("BG");
/// assert_eq!(recipient.display_label(), "Ana (ana@example.com)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl Recipient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            preferred_language: None,
            country_code: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.preferred_language = Some(language.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country_code = Some(country.into());
        self
    }

    /// Label used for selected-recipient chips: `name (email)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

/// Parameters for one page of `GET /marketing/users/search`.
///
/// The endpoint is offset based and returns no total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearchParams {
    pub query: String,
    pub limit: u32,
    pub offset: u32,
}

impl UserSearchParams {
    /// Builds parameters for a zero-based page of the given size.
    pub fn for_page(query: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            query: query.into(),
            limit: page_size,
            offset: page.saturating_mul(page_size),
        }
    }
}

/// A saved email template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub configuration: EditorDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /marketing/emails/templates`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailTemplateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub configuration: EditorDocument,
}

/// Body of `PUT /marketing/emails/templates`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailTemplateRequest {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub configuration: EditorDocument,
}

/// Body of `POST /marketing/emails/send`.
///
/// Built fresh for every submission attempt and never persisted. The backend
/// accepts a single `countryCode` even though several countries may be
/// selected in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub html: String,
    pub subject: String,
    pub user_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Lifecycle of a send batch as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BatchStatus::Pending => "PENDING",
            BatchStatus::Processing => "PROCESSING",
            BatchStatus::Completed => "COMPLETED",
            BatchStatus::Failed => "FAILED",
        };
        write!(f, "{label}")
    }
}

/// Outcome of one send invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub batch_id: String,
    pub total_requested: u64,
    pub total_sent: u64,
    pub total_failed: u64,
    pub status: BatchStatus,
}

impl SendEmailResponse {
    /// Summary line shown to the user after a successful send.
    pub fn summary(&self) -> String {
        format!(
            "Email sent! Batch ID: {}, Sent: {}, Failed: {}",
            self.batch_id, self.total_sent, self.total_failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipient_deserializes_camel_case_with_missing_optionals() {
        let recipient: Recipient = serde_json::from_value(json!({
            "id": "42",
            "name": "Ivan",
            "email": "ivan@example.com",
            "countryCode": "BG"
        }))
        .unwrap();

        assert_eq!(recipient.id, "42");
        assert_eq!(recipient.preferred_language, None);
        assert_eq!(recipient.country_code.as_deref(), Some("BG"));
    }

    #[test]
    fn test_send_request_omits_absent_filters() {
        let request = SendEmailRequest {
            html: "<p>hi</p>".to_string(),
            subject: "Hello".to_string(),
            user_ids: vec!["a".to_string()],
            preferred_language: None,
            country_code: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"html": "<p>hi</p>", "subject": "Hello", "userIds": ["a"]})
        );
    }

    #[test]
    fn test_send_request_includes_filters_when_set() {
        let request = SendEmailRequest {
            html: "<p>hi</p>".to_string(),
            subject: "Hello".to_string(),
            user_ids: vec![],
            preferred_language: Some("de".to_string()),
            country_code: Some("DE".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["preferredLanguage"], "de");
        assert_eq!(value["countryCode"], "DE");
    }

    #[test]
    fn test_send_response_summary() {
        let response: SendEmailResponse = serde_json::from_value(json!({
            "batchId": "b-7",
            "totalRequested": 3,
            "totalSent": 2,
            "totalFailed": 1,
            "status": "COMPLETED"
        }))
        .unwrap();

        assert_eq!(response.status, BatchStatus::Completed);
        assert_eq!(response.summary(), "Email sent! Batch ID: b-7, Sent: 2, Failed: 1");
    }

    #[test]
    fn test_search_params_offset_from_page() {
        let params = UserSearchParams::for_page("ana", 3, 20);
        assert_eq!(params.limit, 20);
        assert_eq!(params.offset, 60);
    }

    #[test]
    fn test_template_round_trips_configuration() {
        let template: EmailTemplate = serde_json::from_value(json!({
            "id": 5,
            "name": "Welcome",
            "description": null,
            "configuration": {"root": {"type": "EmailLayout", "data": {"childrenIds": []}}},
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(template.id, 5);
        assert!(template.description.is_none());
        assert!(template.configuration.root_block().is_some());
    }
}
