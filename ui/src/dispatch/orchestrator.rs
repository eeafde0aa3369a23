use super::renderer::{DocumentRenderer, render_or_empty};
use crate::components::validation_patterns::{TextFieldError, TextFieldValidator};
use crate::recipients::{FilterState, SelectionLedger};
use crate::validation::Validator;
use mailroom_server::api::{ApiError, MarketingApi, SEND_PATH};
use mailroom_server::auth::AuthStateManager;
use mailroom_server::common::HttpError;
use mailroom_server::model::{EditorDocument, SendEmailRequest, SendEmailResponse};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_SUCCESS_CLOSE_DELAY: Duration = Duration::from_millis(2000);
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email. Please try again.";

/// Local reasons a submission does not reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Subject(#[from] TextFieldError),
    #[error("Please select at least one user or apply filters")]
    NoTargeting,
    #[error("Failed to generate email HTML")]
    EmptyHtml,
    #[error("An email is already being sent")]
    AlreadySubmitting,
    #[error("No email is being sent")]
    NotSubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded {
        response: SendEmailResponse,
        close_at: Instant,
    },
    Failed {
        message: String,
    },
}

/// How a completed send should be surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent(SendEmailResponse),
    Failed(String),
    /// The session was rejected; the app-wide latch takes over
    AuthenticationRequired(String),
}

/// Read-only view of the send form.
#[derive(Debug, Clone, Copy)]
pub struct DispatchForm<'a> {
    pub subject: &'a str,
    pub ledger: &'a SelectionLedger,
    pub filters: &'a FilterState,
}

impl DispatchForm<'_> {
    pub fn has_targeting(&self) -> bool {
        !self.ledger.is_empty() || self.filters.is_active()
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        TextFieldValidator::subject().validate(self.subject)?;
        if !self.has_targeting() {
            return Err(DispatchError::NoTargeting);
        }
        Ok(())
    }
}

/// Builds the send body from the form and rendered markup.
///
/// Only the first selected country is sent; the endpoint accepts one.
pub fn build_payload(form: &DispatchForm<'_>, html: String) -> SendEmailRequest {
    SendEmailRequest {
        html,
        subject: form.subject.trim().to_string(),
        user_ids: form.ledger.selected_ids().to_vec(),
        preferred_language: form.filters.language().map(str::to_string),
        country_code: form.filters.primary_country().map(str::to_string),
    }
}

/// Drives one send dialog from validation to outcome.
///
/// Phases move `Idle -> Validating -> Submitting -> Succeeded | Failed`.
/// Only one submission can be in flight; a second submit while
/// `Submitting` is rejected. A failed send returns to `Idle` on dismissal
/// with the form untouched, and every retry rebuilds the payload.
#[derive(Debug, Clone)]
pub struct DispatchOrchestrator {
    phase: DispatchPhase,
    close_delay: Duration,
    inline_error: Option<DispatchError>,
}

impl DispatchOrchestrator {
    pub fn new(close_delay: Duration) -> Self {
        Self {
            phase: DispatchPhase::Idle,
            close_delay,
            inline_error: None,
        }
    }

    pub fn phase(&self) -> &DispatchPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, DispatchPhase::Submitting)
    }

    /// Validation message from the last rejected submit.
    pub fn inline_error(&self) -> Option<&DispatchError> {
        self.inline_error.as_ref()
    }

    /// Mirrors the send button's enabled state.
    pub fn can_submit(&self, form: &DispatchForm<'_>) -> bool {
        !self.is_submitting()
            && TextFieldValidator::subject().validate(form.subject).is_ok()
            && form.has_targeting()
    }

    /// Validates the form, renders the markup and claims the submission slot.
    ///
    /// On success the phase is `Submitting` and the returned payload must be
    /// sent exactly once, followed by [`complete`](Self::complete).
    pub fn begin_submit(
        &mut self,
        form: &DispatchForm<'_>,
        renderer: &dyn DocumentRenderer,
        document: &EditorDocument,
    ) -> Result<SendEmailRequest, DispatchError> {
        if self.is_submitting() {
            log::warn!("Send requested while another send is in flight");
            return Err(DispatchError::AlreadySubmitting);
        }

        self.phase = DispatchPhase::Validating;
        self.inline_error = None;

        let validated = form.validate().and_then(|()| {
            let html = render_or_empty(renderer, document);
            if html.is_empty() {
                Err(DispatchError::EmptyHtml)
            } else {
                Ok(html)
            }
        });

        match validated {
            Ok(html) => {
                let payload = build_payload(form, html);
                log::info!(
                    "Submitting send: {} users, country={:?}, language={:?}",
                    payload.user_ids.len(),
                    payload.country_code,
                    payload.preferred_language
                );
                self.phase = DispatchPhase::Submitting;
                Ok(payload)
            }
            Err(e) => {
                log::debug!("Send rejected before submission: {e}");
                self.phase = DispatchPhase::Idle;
                self.inline_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Records the backend's answer for the in-flight submission.
    pub fn complete(
        &mut self,
        result: Result<SendEmailResponse, ApiError>,
        now: Instant,
    ) -> Result<DispatchOutcome, DispatchError> {
        if !self.is_submitting() {
            return Err(DispatchError::NotSubmitting);
        }

        let outcome = match result {
            Ok(response) => {
                log::info!(
                    "Send batch {} finished with status {}: sent={}, failed={}",
                    response.batch_id,
                    response.status,
                    response.total_sent,
                    response.total_failed
                );
                self.phase = DispatchPhase::Succeeded {
                    response: response.clone(),
                    close_at: now + self.close_delay,
                };
                DispatchOutcome::Sent(response)
            }
            Err(e) if e.is_authentication() => {
                log::warn!("Send rejected by authentication: {e}");
                self.phase = DispatchPhase::Idle;
                DispatchOutcome::AuthenticationRequired(e.to_string())
            }
            Err(e) => {
                log::error!("Send failed: {e}");
                self.phase = DispatchPhase::Failed {
                    message: SEND_FAILED_MESSAGE.to_string(),
                };
                DispatchOutcome::Failed(SEND_FAILED_MESSAGE.to_string())
            }
        };
        Ok(outcome)
    }

    /// Validates, sends and records the outcome in one call.
    ///
    /// Authentication failures latch `auth` instead of producing a
    /// per-action failure message.
    pub async fn submit(
        &mut self,
        form: &DispatchForm<'_>,
        renderer: &dyn DocumentRenderer,
        document: &EditorDocument,
        api: &dyn MarketingApi,
        auth: &AuthStateManager,
    ) -> Result<DispatchOutcome, DispatchError> {
        let payload = self.begin_submit(form, renderer, document)?;
        let result = api.send_emails(&payload).await;
        auth.observe(&result).await;
        self.complete(result, Instant::now())
    }

    /// Clears a failure so the user can edit and retry.
    pub fn dismiss_failure(&mut self) {
        if matches!(self.phase, DispatchPhase::Failed { .. }) {
            self.phase = DispatchPhase::Idle;
        }
    }

    /// True once a successful send has been shown for the close delay.
    pub fn should_auto_close(&self, now: Instant) -> bool {
        matches!(&self.phase, DispatchPhase::Succeeded { close_at, .. } if now >= *close_at)
    }

    /// Success summary or failure text for the dialog banner.
    pub fn message(&self) -> Option<String> {
        match &self.phase {
            DispatchPhase::Succeeded { response, .. } => Some(response.summary()),
            DispatchPhase::Failed { message } => Some(message.clone()),
            _ => self.inline_error.as_ref().map(ToString::to_string),
        }
    }
}

/// Sends `payload`, giving up with [`HttpError::Timeout`] after `deadline`.
///
/// The caller always gets a result back, so the submission slot can be
/// released and the send retried.
pub async fn send_within(
    api: &dyn MarketingApi,
    payload: &SendEmailRequest,
    deadline: Duration,
) -> Result<SendEmailResponse, ApiError> {
    match tokio::time::timeout(deadline, api.send_emails(payload)).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("Send did not finish within {deadline:?}");
            Err(ApiError::Http(HttpError::Timeout {
                url: SEND_PATH.to_string(),
                seconds: deadline.as_secs(),
            }))
        }
    }
}

impl Default for DispatchOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_CLOSE_DELAY)
    }
}
