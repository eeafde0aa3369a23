use crate::app::model::{Model, Popup};
use crate::components::common::{Msg, PopupActivityMsg};

impl Model {
    pub fn update_popup(&mut self, msg: PopupActivityMsg) -> Option<Msg> {
        if self.is_latched() && !matches!(msg, PopupActivityMsg::Close) {
            log::debug!("Suppressing popup while authentication is required");
            return None;
        }
        self.popup = match msg {
            PopupActivityMsg::ShowError(error) => Some(Popup::Error(error)),
            PopupActivityMsg::ShowWarning(message) => Some(Popup::Warning(message)),
            PopupActivityMsg::ShowSuccess(message) => Some(Popup::Success(message)),
            PopupActivityMsg::Close => None,
        };
        None
    }
}
