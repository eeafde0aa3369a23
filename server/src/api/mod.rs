//! Client side of the marketing REST backend.
//!
//! [`MarketingApi`] is the seam the workflow code depends on;
//! [`MarketingApiClient`] is the reqwest implementation.

pub mod client;
pub mod errors;

pub use client::{DEFAULT_REQUEST_TIMEOUT, MarketingApiClient};
pub use errors::{AUTHENTICATION_REQUIRED_MESSAGE, ApiError, classify_status};

use crate::model::{
    CreateEmailTemplateRequest, EmailTemplate, Recipient, SendEmailRequest, SendEmailResponse,
    UpdateEmailTemplateRequest, UserSearchParams,
};
use async_trait::async_trait;

pub const TEMPLATES_PATH: &str = "/marketing/emails/templates";
pub const USER_SEARCH_PATH: &str = "/marketing/users/search";
pub const SEND_PATH: &str = "/marketing/emails/send";

/// Operations offered by the marketing backend.
///
/// Implementations never retry; every call maps to exactly one request.
#[async_trait]
pub trait MarketingApi: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<EmailTemplate>, ApiError>;

    async fn create_template(
        &self,
        request: &CreateEmailTemplateRequest,
    ) -> Result<EmailTemplate, ApiError>;

    async fn update_template(
        &self,
        request: &UpdateEmailTemplateRequest,
    ) -> Result<EmailTemplate, ApiError>;

    /// Fetches one page of users matching `params.query`.
    async fn search_users(&self, params: &UserSearchParams) -> Result<Vec<Recipient>, ApiError>;

    async fn send_emails(&self, request: &SendEmailRequest)
    -> Result<SendEmailResponse, ApiError>;
}
