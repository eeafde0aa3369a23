use async_trait::async_trait;
use chrono::Utc;
use server::api::{ApiError, MarketingApi};
use server::common::HttpError;
use server::model::{
    CreateEmailTemplateRequest, EmailTemplate, Recipient, SendEmailRequest, SendEmailResponse,
    UpdateEmailTemplateRequest, UserSearchParams,
};
use server::seed::{sample_templates, seed_templates};
use std::sync::Mutex;

// Helper module for seeding against an in-memory backend
mod seed_helpers {
    use super::*;

    /// Backend that stores created templates and rejects configured names
    pub struct RecordingApi {
        pub rejected_names: Vec<&'static str>,
        pub created: Mutex<Vec<CreateEmailTemplateRequest>>,
    }

    impl RecordingApi {
        pub fn rejecting(rejected_names: Vec<&'static str>) -> Self {
            Self {
                rejected_names,
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MarketingApi for RecordingApi {
        async fn list_templates(&self) -> Result<Vec<EmailTemplate>, ApiError> {
            Ok(Vec::new())
        }

        async fn create_template(
            &self,
            request: &CreateEmailTemplateRequest,
        ) -> Result<EmailTemplate, ApiError> {
            if self.rejected_names.contains(&request.name.as_str()) {
                return Err(ApiError::Http(HttpError::Status {
                    url: "/marketing/emails/templates".to_string(),
                    status: 409,
                    reason: "Conflict".to_string(),
                }));
            }
            let mut created = self.created.lock().unwrap();
            created.push(request.clone());
            Ok(EmailTemplate {
                id: created.len() as i64,
                name: request.name.clone(),
                description: request.description.clone(),
                configuration: request.configuration.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn update_template(
            &self,
            _request: &UpdateEmailTemplateRequest,
        ) -> Result<EmailTemplate, ApiError> {
            unimplemented!("not used by seeding")
        }

        async fn search_users(
            &self,
            _params: &UserSearchParams,
        ) -> Result<Vec<Recipient>, ApiError> {
            unimplemented!("not used by seeding")
        }

        async fn send_emails(
            &self,
            _request: &SendEmailRequest,
        ) -> Result<SendEmailResponse, ApiError> {
            unimplemented!("not used by seeding")
        }
    }
}

use seed_helpers::RecordingApi;

#[tokio::test]
async fn test_seed_creates_every_sample() {
    let api = RecordingApi::rejecting(vec![]);

    let report = seed_templates(&api).await;

    assert_eq!(report.created.len(), sample_templates().len());
    assert!(report.failed.is_empty());
    let names: Vec<String> = api
        .created
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("Welcome"));
    assert_eq!(names.last().map(String::as_str), Some("Subscription receipt"));
}

#[tokio::test]
async fn test_seed_skips_rejected_samples() {
    let api = RecordingApi::rejecting(vec!["Welcome", "Reset password"]);

    let report = seed_templates(&api).await;

    assert_eq!(report.created.len(), 6);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, "Welcome");
    assert!(!report.authentication_failed());
}
