use super::observe_and_notify;
use crate::app::model::Model;
use crate::components::common::{DispatchActivityMsg, Msg, PopupActivityMsg};
use crate::dispatch::{DispatchError, DispatchOutcome, SendDialog, send_within};
use crate::error::AppError;
use mailroom_server::api::ApiError;
use mailroom_server::model::SendEmailResponse;
use std::time::{Duration, Instant};

/// Headroom between the send deadline and the task manager's own timeout.
const SEND_DEADLINE_MARGIN: Duration = Duration::from_secs(5);

impl Model {
    pub fn update_dispatch(&mut self, msg: DispatchActivityMsg) -> Option<Msg> {
        match msg {
            DispatchActivityMsg::OpenDialog => self.open_send_dialog(),
            DispatchActivityMsg::CloseDialog => {
                if self.send_dialog.take().is_some() {
                    log::debug!("Send dialog closed");
                }
                None
            }
            DispatchActivityMsg::SubjectChanged(subject) => {
                if let Some(dialog) = self.send_dialog.as_mut() {
                    dialog.set_subject(subject);
                }
                None
            }
            DispatchActivityMsg::CountriesChanged(codes) => {
                let dialog = self.send_dialog.as_mut()?;
                dialog
                    .set_countries(codes.as_slice())
                    .err()
                    .map(|e| Msg::PopupActivity(PopupActivityMsg::ShowWarning(e.to_string())))
            }
            DispatchActivityMsg::LanguageChanged(code) => {
                let dialog = self.send_dialog.as_mut()?;
                dialog
                    .set_language(code.as_deref())
                    .err()
                    .map(|e| Msg::PopupActivity(PopupActivityMsg::ShowWarning(e.to_string())))
            }
            DispatchActivityMsg::Submit => self.submit_send(),
            DispatchActivityMsg::SendCompleted(result) => self.complete_send(result),
            DispatchActivityMsg::DismissFailure => {
                if let Some(dialog) = self.send_dialog.as_mut() {
                    dialog.orchestrator_mut().dismiss_failure();
                }
                None
            }
        }
    }

    fn open_send_dialog(&mut self) -> Option<Msg> {
        if self.is_latched() {
            log::debug!("Not opening send dialog while authentication is required");
            return None;
        }
        self.send_dialog = Some(SendDialog::new(
            self.config.page_size(),
            self.config.search_debounce(),
            self.config.success_close_delay(),
        ));
        None
    }

    fn submit_send(&mut self) -> Option<Msg> {
        if self.is_latched() {
            return None;
        }
        let dialog = self.send_dialog.as_mut()?;
        if let Some(error) = dialog.filter_error() {
            log::debug!("Send blocked by filter: {error}");
            return Some(Msg::PopupActivity(PopupActivityMsg::ShowWarning(
                error.to_string(),
            )));
        }
        let (form, orchestrator) = dialog.form_and_orchestrator();

        let payload = match orchestrator.begin_submit(
            &form,
            self.renderer.as_ref(),
            self.templates.document(),
        ) {
            Ok(payload) => payload,
            Err(DispatchError::AlreadySubmitting) => return None,
            Err(e) => {
                log::debug!("Send blocked: {e}");
                return None;
            }
        };

        let deadline = self.send_deadline();
        let api = self.api.clone();
        let auth = self.auth.clone();
        let tx = self.tx_to_main.clone();

        self.task_manager.execute("Sending email...", async move {
            let result = send_within(api.as_ref(), &payload, deadline).await;
            observe_and_notify(&auth, &tx, &result).await;
            tx.send(Msg::DispatchActivity(DispatchActivityMsg::SendCompleted(
                result,
            )))
            .map_err(|e| AppError::Channel(e.to_string()))
        });
        None
    }

    /// Request timeout, capped so the send answers before the task manager gives up.
    fn send_deadline(&self) -> Duration {
        let cap = self
            .task_manager
            .operation_timeout()
            .saturating_sub(SEND_DEADLINE_MARGIN);
        self.config.api().request_timeout().min(cap)
    }

    fn complete_send(&mut self, result: Result<SendEmailResponse, ApiError>) -> Option<Msg> {
        let Some(dialog) = self.send_dialog.as_mut() else {
            match result {
                Ok(response) => log::info!("Send finished after dialog closed: {}", response.summary()),
                Err(e) => log::warn!("Send failed after dialog closed: {e}"),
            }
            return None;
        };

        match dialog.orchestrator_mut().complete(result, Instant::now()) {
            Ok(DispatchOutcome::Sent(_)) | Ok(DispatchOutcome::Failed(_)) => None,
            Ok(DispatchOutcome::AuthenticationRequired(message)) => {
                log::debug!("Send rejected by authentication: {message}");
                None
            }
            Err(e) => {
                log::warn!("Unexpected send completion: {e}");
                None
            }
        }
    }
}
