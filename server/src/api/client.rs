use super::errors::{ApiError, classify_status};
use super::{MarketingApi, SEND_PATH, TEMPLATES_PATH, USER_SEARCH_PATH};
use crate::auth::SessionCredentials;
use crate::common::errors::HttpError;
use crate::model::{
    CreateEmailTemplateRequest, EmailTemplate, Recipient, SendEmailRequest, SendEmailResponse,
    UpdateEmailTemplateRequest, UserSearchParams,
};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed [`MarketingApi`].
///
/// Every request carries `Content-Type: application/json` and, when session
/// credentials are configured, the session cookie.
///
/// # Examples
///
/// ```no_run
/// use server::api::{MarketingApi, MarketingApiClient, DEFAULT_REQUEST_TIMEOUT};
/// use server::auth::SessionCredentials;
///
/// # async fn run() -> Result<(), server::api::ApiError> {
/// let client = MarketingApiClient::new("http://localhost:3000", DEFAULT_REQUEST_TIMEOUT)?
///     .with_session(SessionCredentials::new("token"));
/// let templates = client.list_templates().await?;
/// println!("{} templates", templates.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MarketingApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Option<SessionCredentials>,
    timeout: Duration,
}

impl MarketingApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ApiError::Configuration(
                "API base URL is not configured".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::ClientCreation {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            session: None,
            timeout,
        })
    }

    pub fn with_session(mut self, session: SessionCredentials) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(session) = &self.session {
            builder = builder.header(COOKIE, session.cookie_header());
        }
        builder
    }

    async fn get<T>(&self, url: String) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let builder = self.builder(Method::GET, &url);
        self.execute(builder, url).await
    }

    async fn send_body<T, B>(&self, method: Method, url: String, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.builder(method, &url).json(body);
        self.execute(builder, url).await
    }

    async fn execute<T>(&self, builder: RequestBuilder, url: String) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        log::debug!("API request: {url}");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout {
                    url: url.clone(),
                    seconds: self.timeout.as_secs(),
                }
            } else {
                HttpError::RequestFailed {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if let Err(error) = classify_status(
            &url,
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
        ) {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("API request to {url} failed with {status}: {error_text}");
            return Err(error);
        }

        response.json::<T>().await.map_err(|e| {
            ApiError::from(HttpError::InvalidResponse {
                expected: std::any::type_name::<T>().to_string(),
                actual: e.to_string(),
            })
        })
    }
}

/// Query string for a user search, `q` percent-encoded.
pub(crate) fn search_query(params: &UserSearchParams) -> String {
    format!(
        "q={}&limit={}&offset={}",
        urlencoding::encode(&params.query),
        params.limit,
        params.offset
    )
}

#[async_trait]
impl MarketingApi for MarketingApiClient {
    async fn list_templates(&self) -> Result<Vec<EmailTemplate>, ApiError> {
        self.get(self.url_for(TEMPLATES_PATH)).await
    }

    async fn create_template(
        &self,
        request: &CreateEmailTemplateRequest,
    ) -> Result<EmailTemplate, ApiError> {
        self.send_body(Method::POST, self.url_for(TEMPLATES_PATH), request)
            .await
    }

    async fn update_template(
        &self,
        request: &UpdateEmailTemplateRequest,
    ) -> Result<EmailTemplate, ApiError> {
        self.send_body(Method::PUT, self.url_for(TEMPLATES_PATH), request)
            .await
    }

    async fn search_users(&self, params: &UserSearchParams) -> Result<Vec<Recipient>, ApiError> {
        let url = format!("{}?{}", self.url_for(USER_SEARCH_PATH), search_query(params));
        self.get(url).await
    }

    async fn send_emails(
        &self,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, ApiError> {
        log::info!(
            "Sending email '{}' to {} selected users",
            request.subject,
            request.user_ids.len()
        );
        self.send_body(Method::POST, self.url_for(SEND_PATH), request)
            .await
    }
}
