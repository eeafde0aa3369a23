use crate::app::model::Model;
use crate::components::common::{DispatchActivityMsg, Msg};
use std::time::Instant;

impl Model {
    pub fn update(&mut self, msg: Msg) -> Option<Msg> {
        match msg {
            Msg::AppClose => {
                log::info!("Closing application");
                self.quit = true;
                None
            }
            Msg::Tick => self.tick_at(Instant::now()),
            Msg::SearchActivity(msg) => self.update_search(msg),
            Msg::SelectionActivity(msg) => self.update_selection(msg),
            Msg::DispatchActivity(msg) => self.update_dispatch(msg),
            Msg::TemplateActivity(msg) => self.update_templates(msg),
            Msg::LoadingActivity(msg) => self.update_loading(msg),
            Msg::PopupActivity(msg) => self.update_popup(msg),
            Msg::AuthActivity(msg) => self.update_auth(msg),
            Msg::Error(error) => {
                self.error_reporter.report_simple(error, "Model", "update");
                None
            }
        }
    }

    /// Advances time-based state: dialog auto-close and search debounce.
    pub fn tick_at(&mut self, now: Instant) -> Option<Msg> {
        let dialog = self.send_dialog.as_mut()?;

        if dialog.orchestrator().should_auto_close(now) {
            log::debug!("Closing send dialog after successful send");
            return Some(Msg::DispatchActivity(DispatchActivityMsg::CloseDialog));
        }

        if let Some(key) = dialog.search_mut().poll(now) {
            self.fetch_users(key);
        }
        None
    }

    pub(crate) fn is_latched(&self) -> bool {
        self.auth_required.is_some()
    }
}
