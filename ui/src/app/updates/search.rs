use super::observe_and_notify;
use crate::app::model::Model;
use crate::components::common::{Msg, PopupActivityMsg, SearchActivityMsg, SelectionActivityMsg};
use crate::error::AppError;
use crate::recipients::SearchKey;
use std::time::Instant;

impl Model {
    pub fn update_search(&mut self, msg: SearchActivityMsg) -> Option<Msg> {
        let Some(dialog) = self.send_dialog.as_mut() else {
            log::debug!("Ignoring search message with no open dialog");
            return None;
        };

        match msg {
            SearchActivityMsg::QueryChanged(text) => {
                dialog.search_mut().set_query(text, Instant::now());
                None
            }
            SearchActivityMsg::PageChanged(page) => {
                if let Some(key) = dialog.search_mut().set_page(page) {
                    self.fetch_users(key);
                }
                None
            }
            SearchActivityMsg::PageSizeChanged(page_size) => {
                match dialog.search_mut().set_page_size(page_size) {
                    Ok(Some(key)) => {
                        self.fetch_users(key);
                        None
                    }
                    Ok(None) => None,
                    Err(e) => Some(Msg::PopupActivity(PopupActivityMsg::ShowWarning(
                        e.to_string(),
                    ))),
                }
            }
            SearchActivityMsg::ResultsLoaded { key, result } => {
                dialog.search_mut().apply_response(&key, result);
                None
            }
        }
    }

    pub fn update_selection(&mut self, msg: SelectionActivityMsg) -> Option<Msg> {
        let dialog = self.send_dialog.as_mut()?;
        match msg {
            SelectionActivityMsg::RecipientToggled(recipient) => {
                dialog.toggle_recipient(&recipient)
            }
            SelectionActivityMsg::PageToggled(checked) => dialog.toggle_page(checked),
            SelectionActivityMsg::RecipientRemoved(id) => dialog.remove_recipient(&id),
        }
        None
    }

    /// Fetches one page of users; the response is matched against `key`.
    pub(crate) fn fetch_users(&self, key: SearchKey) {
        if self.is_latched() {
            return;
        }
        log::debug!(
            "Searching users: query={:?}, page={}, generation={}",
            key.query,
            key.page,
            key.generation
        );

        let api = self.api.clone();
        let auth = self.auth.clone();
        let tx = self.tx_to_main.clone();

        self.task_manager.execute_background(async move {
            let result = api.search_users(&key.params()).await;
            observe_and_notify(&auth, &tx, &result).await;
            tx.send(Msg::SearchActivity(SearchActivityMsg::ResultsLoaded {
                key,
                result,
            }))
            .map_err(|e| AppError::Channel(e.to_string()))
        });
    }
}
