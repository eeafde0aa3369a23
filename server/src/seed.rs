//! Sample templates created when the backend has none yet.

use crate::api::{ApiError, MarketingApi};
use crate::model::{CreateEmailTemplateRequest, EditorDocument, EmailTemplate};

/// A sample template before it has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

impl SampleTemplate {
    pub fn to_request(&self) -> CreateEmailTemplateRequest {
        CreateEmailTemplateRequest {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            configuration: EditorDocument::heading_and_text(self.heading, self.body),
        }
    }
}

const SAMPLES: [SampleTemplate; 8] = [
    SampleTemplate {
        name: "Welcome",
        description: "Welcome new users",
        heading: "Welcome aboard!",
        body: "Thanks for signing up. We are glad to have you with us.",
    },
    SampleTemplate {
        name: "One-time passcode",
        description: "OTP / verification code email",
        heading: "Your verification code",
        body: "Use the code below to finish signing in. It expires in 10 minutes.",
    },
    SampleTemplate {
        name: "Order confirmation",
        description: "E-commerce order receipt",
        heading: "Thanks for your order",
        body: "We have received your order and will let you know when it ships.",
    },
    SampleTemplate {
        name: "Post metrics report",
        description: "Metrics summary report",
        heading: "Your weekly metrics",
        body: "Here is how your posts performed over the last seven days.",
    },
    SampleTemplate {
        name: "Reservation reminder",
        description: "Remind about upcoming reservation",
        heading: "Your reservation is coming up",
        body: "This is a friendly reminder about your upcoming reservation.",
    },
    SampleTemplate {
        name: "Reset password",
        description: "Password reset link",
        heading: "Reset your password",
        body: "Follow the link below to choose a new password.",
    },
    SampleTemplate {
        name: "Respond to message",
        description: "Reply to user message",
        heading: "You have a new message",
        body: "Someone replied to your conversation. Open the app to respond.",
    },
    SampleTemplate {
        name: "Subscription receipt",
        description: "Subscription payment receipt",
        heading: "Payment received",
        body: "Thanks for renewing your subscription. Your receipt is below.",
    },
];

pub fn sample_templates() -> &'static [SampleTemplate] {
    &SAMPLES
}

/// Outcome of a seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub created: Vec<EmailTemplate>,
    pub failed: Vec<(String, ApiError)>,
}

impl SeedReport {
    pub fn authentication_failed(&self) -> bool {
        self.failed.iter().any(|(_, e)| e.is_authentication())
    }
}

/// Creates every sample template, skipping the ones the backend rejects.
///
/// Failures (duplicate names, network errors) are logged and collected; they
/// never abort the run.
pub async fn seed_templates(api: &dyn MarketingApi) -> SeedReport {
    let mut report = SeedReport::default();

    for sample in sample_templates() {
        match api.create_template(&sample.to_request()).await {
            Ok(template) => {
                log::debug!("Seeded sample template '{}'", template.name);
                report.created.push(template);
            }
            Err(e) => {
                log::warn!("Failed to seed template \"{}\": {}", sample.name, e);
                report.failed.push((sample.name.to_string(), e));
            }
        }
    }

    log::info!(
        "Seeded {} sample templates ({} failed)",
        report.created.len(),
        report.failed.len()
    );
    report
}
