#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use mailroom_server::api::{ApiError, MarketingApi};
use mailroom_server::common::HttpError;
use mailroom_server::model::{
    BatchStatus, CreateEmailTemplateRequest, EditorDocument, EmailTemplate, Recipient, SendEmailRequest,
    SendEmailResponse, UpdateEmailTemplateRequest, UserSearchParams,
};
use std::sync::Mutex;
use std::time::Duration;

/// How long a stalled send hangs before answering.
pub const STALL: Duration = Duration::from_secs(600);

/// How the fake answers a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    ServerError,
    Unauthorized,
}

impl Behavior {
    fn check(self, path: &str) -> Result<(), ApiError> {
        match self {
            Behavior::Succeed => Ok(()),
            Behavior::ServerError => Err(ApiError::Http(HttpError::Status {
                url: format!("http://backend.internal{path}"),
                status: 500,
                reason: "Internal Server Error".to_string(),
            })),
            Behavior::Unauthorized => Err(ApiError::authentication(401)),
        }
    }
}

/// In-memory marketing backend recording every call.
pub struct FakeApi {
    pub users: Vec<Recipient>,
    pub templates: Mutex<Vec<EmailTemplate>>,
    pub sent: Mutex<Vec<SendEmailRequest>>,
    pub searches: Mutex<Vec<UserSearchParams>>,
    pub list_calls: Mutex<usize>,
    pub stalled_sends: Mutex<u32>,
    pub send_behavior: Behavior,
    pub template_behavior: Behavior,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            users: (1..=45)
                .map(|i| {
                    Recipient::new(
                        format!("u{i}"),
                        format!("User {i}"),
                        format!("user{i}@example.com"),
                    )
                })
                .collect(),
            templates: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
            stalled_sends: Mutex::new(0),
            send_behavior: Behavior::Succeed,
            template_behavior: Behavior::Succeed,
        }
    }

    pub fn with_templates(self, templates: Vec<EmailTemplate>) -> Self {
        *self.templates.lock().unwrap() = templates;
        self
    }

    pub fn with_send_behavior(mut self, behavior: Behavior) -> Self {
        self.send_behavior = behavior;
        self
    }

    /// The next `count` sends hang for [`STALL`] before answering.
    pub fn with_stalled_sends(self, count: u32) -> Self {
        *self.stalled_sends.lock().unwrap() = count;
        self
    }

    pub fn with_template_behavior(mut self, behavior: Behavior) -> Self {
        self.template_behavior = behavior;
        self
    }

    pub fn sent(&self) -> Vec<SendEmailRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<UserSearchParams> {
        self.searches.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    fn store(
        &self,
        name: String,
        description: Option<String>,
        request_id: Option<i64>,
        configuration: EditorDocument,
    ) -> EmailTemplate {
        let mut templates = self.templates.lock().unwrap();
        let id = request_id.unwrap_or(templates.len() as i64 + 1);
        let template = EmailTemplate {
            id,
            name,
            description,
            configuration,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        match templates.iter_mut().find(|t| t.id == id) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        template
    }
}

pub fn template(id: i64, name: &str) -> EmailTemplate {
    EmailTemplate {
        id,
        name: name.to_string(),
        description: None,
        configuration: EditorDocument::heading_and_text(name, "body"),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl MarketingApi for FakeApi {
    async fn list_templates(&self) -> Result<Vec<EmailTemplate>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        self.template_behavior.check("/marketing/emails/templates")?;
        Ok(self.templates.lock().unwrap().clone())
    }

    async fn create_template(
        &self,
        request: &CreateEmailTemplateRequest,
    ) -> Result<EmailTemplate, ApiError> {
        self.template_behavior.check("/marketing/emails/templates")?;
        Ok(self.store(
            request.name.clone(),
            request.description.clone(),
            None,
            request.configuration.clone(),
        ))
    }

    async fn update_template(
        &self,
        request: &UpdateEmailTemplateRequest,
    ) -> Result<EmailTemplate, ApiError> {
        self.template_behavior.check("/marketing/emails/templates")?;
        Ok(self.store(
            request.name.clone(),
            request.description.clone(),
            Some(request.id),
            request.configuration.clone(),
        ))
    }

    async fn search_users(&self, params: &UserSearchParams) -> Result<Vec<Recipient>, ApiError> {
        self.searches.lock().unwrap().push(params.clone());
        let query = params.query.to_lowercase();
        Ok(self
            .users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&query))
            .skip(params.offset as usize)
            .take(params.limit as usize)
            .cloned()
            .collect())
    }

    async fn send_emails(&self, request: &SendEmailRequest) -> Result<SendEmailResponse, ApiError> {
        self.sent.lock().unwrap().push(request.clone());
        let stall = {
            let mut remaining = self.stalled_sends.lock().unwrap();
            let stall = *remaining > 0;
            *remaining = remaining.saturating_sub(1);
            stall
        };
        if stall {
            tokio::time::sleep(STALL).await;
        }
        self.send_behavior.check("/marketing/emails/send")?;
        let total = request.user_ids.len() as u64;
        Ok(SendEmailResponse {
            batch_id: format!("batch-{}", self.sent.lock().unwrap().len()),
            total_requested: total,
            total_sent: total,
            total_failed: 0,
            status: BatchStatus::Completed,
        })
    }
}
