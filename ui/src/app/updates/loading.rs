use crate::app::model::Model;
use crate::components::common::{LoadingActivityMsg, Msg};

impl Model {
    pub fn update_loading(&mut self, msg: LoadingActivityMsg) -> Option<Msg> {
        match msg {
            LoadingActivityMsg::Start(message) => {
                log::debug!("Starting loading: {message}");
                self.loading_message = Some(message);
                None
            }
            LoadingActivityMsg::Stop => {
                log::debug!("Stopping loading");
                self.loading_message = None;
                None
            }
        }
    }
}
