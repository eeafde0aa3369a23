use super::observe_and_notify;
use crate::app::model::Model;
use crate::components::common::{AuthActivityMsg, Msg, PopupActivityMsg, TemplateActivityMsg};
use crate::error::AppError;
use crate::templates::{TemplateError, TemplateNotice};
use mailroom_server::api::AUTHENTICATION_REQUIRED_MESSAGE;
use mailroom_server::seed::seed_templates;

impl Model {
    pub fn update_templates(&mut self, msg: TemplateActivityMsg) -> Option<Msg> {
        match msg {
            TemplateActivityMsg::Load => {
                self.load_templates();
                None
            }
            TemplateActivityMsg::TemplatesLoaded(Ok(templates)) => {
                if self.templates.set_templates(templates) {
                    self.seed_sample_templates();
                } else {
                    let requested = self.requested_template.take();
                    self.templates.select_initial(requested.as_deref());
                }
                None
            }
            TemplateActivityMsg::TemplatesLoaded(Err(e)) => {
                if !e.is_authentication() {
                    self.error_reporter
                        .report_api_error("list_templates", "Failed to load templates", &e);
                }
                None
            }
            TemplateActivityMsg::SeedCompleted { created, failed } => {
                log::info!("Sample templates created: {created}, failed: {failed}");
                Some(Msg::TemplateActivity(TemplateActivityMsg::Load))
            }
            TemplateActivityMsg::Select(id) => match self.templates.select(id) {
                Ok(()) => None,
                Err(e) => Some(template_error_popup(e)),
            },
            TemplateActivityMsg::NewEmail => {
                self.templates.new_email();
                None
            }
            TemplateActivityMsg::SaveAsNew { name, description } => {
                self.save_as_new(&name, &description)
            }
            TemplateActivityMsg::Saved(result) => {
                let notice = self.templates.apply_saved(result);
                notice_popup(notice)
            }
            TemplateActivityMsg::UpdateCurrent => self.update_current(),
            TemplateActivityMsg::Updated(result) => {
                let notice = self.templates.apply_updated(result);
                notice_popup(notice)
            }
        }
    }

    fn load_templates(&self) {
        if self.is_latched() {
            return;
        }
        let api = self.api.clone();
        let auth = self.auth.clone();
        let tx = self.tx_to_main.clone();

        self.task_manager.execute("Loading templates...", async move {
            let result = api.list_templates().await;
            observe_and_notify(&auth, &tx, &result).await;
            tx.send(Msg::TemplateActivity(TemplateActivityMsg::TemplatesLoaded(
                result,
            )))
            .map_err(|e| AppError::Channel(e.to_string()))
        });
    }

    fn seed_sample_templates(&self) {
        let api = self.api.clone();
        let auth = self.auth.clone();
        let tx = self.tx_to_main.clone();

        self.task_manager
            .execute("Creating sample templates...", async move {
                let report = seed_templates(api.as_ref()).await;
                if report.authentication_failed()
                    && auth
                        .mark_authentication_required(AUTHENTICATION_REQUIRED_MESSAGE)
                        .await
                {
                    tx.send(Msg::AuthActivity(AuthActivityMsg::AuthenticationRequired(
                        AUTHENTICATION_REQUIRED_MESSAGE.to_string(),
                    )))
                    .map_err(|e| AppError::Channel(e.to_string()))?;
                }
                tx.send(Msg::TemplateActivity(TemplateActivityMsg::SeedCompleted {
                    created: report.created.len(),
                    failed: report.failed.len(),
                }))
                .map_err(|e| AppError::Channel(e.to_string()))
            });
    }

    fn save_as_new(&self, name: &str, description: &str) -> Option<Msg> {
        if self.is_latched() {
            return None;
        }
        let request = match self.templates.prepare_save_as_new(name, description) {
            Ok(request) => request,
            Err(e) => return Some(template_error_popup(e)),
        };

        let api = self.api.clone();
        let auth = self.auth.clone();
        let tx = self.tx_to_main.clone();

        self.task_manager.execute("Saving template...", async move {
            let result = api.create_template(&request).await;
            observe_and_notify(&auth, &tx, &result).await;
            tx.send(Msg::TemplateActivity(TemplateActivityMsg::Saved(result)))
                .map_err(|e| AppError::Channel(e.to_string()))
        });
        None
    }

    fn update_current(&self) -> Option<Msg> {
        if self.is_latched() {
            return None;
        }
        let request = match self.templates.prepare_update() {
            Ok(request) => request,
            Err(TemplateError::NoCurrentTemplate) => {
                log::debug!("Update requested with no template loaded");
                return None;
            }
            Err(e) => return Some(template_error_popup(e)),
        };

        let api = self.api.clone();
        let auth = self.auth.clone();
        let tx = self.tx_to_main.clone();

        self.task_manager.execute("Updating template...", async move {
            let result = api.update_template(&request).await;
            observe_and_notify(&auth, &tx, &result).await;
            tx.send(Msg::TemplateActivity(TemplateActivityMsg::Updated(result)))
                .map_err(|e| AppError::Channel(e.to_string()))
        });
        None
    }
}

fn notice_popup(notice: TemplateNotice) -> Option<Msg> {
    match notice {
        TemplateNotice::Success(message) => {
            Some(Msg::PopupActivity(PopupActivityMsg::ShowSuccess(message)))
        }
        TemplateNotice::Failure(message) => Some(Msg::PopupActivity(
            PopupActivityMsg::ShowError(AppError::Api(message)),
        )),
        TemplateNotice::AuthenticationRequired(_) => None,
    }
}

fn template_error_popup(error: TemplateError) -> Msg {
    match error {
        TemplateError::Name(e) => Msg::PopupActivity(PopupActivityMsg::ShowWarning(e.to_string())),
        other => Msg::PopupActivity(PopupActivityMsg::ShowError(AppError::Validation(
            other.to_string(),
        ))),
    }
}
