use crate::app::model::Model;
use crate::components::common::{AuthActivityMsg, Msg};
use mailroom_server::api::ApiError;
use mailroom_server::auth::AuthStateManager;
use std::sync::mpsc::Sender;

/// Feeds a backend result to the latch and tells the main loop on the first trip.
pub(crate) async fn observe_and_notify<T>(
    auth: &AuthStateManager,
    tx: &Sender<Msg>,
    result: &Result<T, ApiError>,
) {
    let Err(error) = result else {
        return;
    };
    if auth.observe(result).await {
        let msg = Msg::AuthActivity(AuthActivityMsg::AuthenticationRequired(error.to_string()));
        if let Err(e) = tx.send(msg) {
            log::error!("Failed to report authentication failure: {e}");
        }
    }
}

impl Model {
    pub fn update_auth(&mut self, msg: AuthActivityMsg) -> Option<Msg> {
        match msg {
            AuthActivityMsg::AuthenticationRequired(message) => {
                if self.auth_required.is_none() {
                    log::warn!("Authentication required: {message}");
                    self.auth_required = Some(message);
                }
                self.send_dialog = None;
                self.popup = None;
                self.loading_message = None;
                None
            }
        }
    }
}
