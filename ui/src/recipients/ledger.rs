use mailroom_server::model::Recipient;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Header checkbox state for the visible page, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerInvariantError {
    #[error("selected id {0} has no detail record")]
    MissingDetail(String),
    #[error("detail record {0} is not selected")]
    OrphanDetail(String),
    #[error("id {0} is selected more than once")]
    DuplicateId(String),
}

/// Recipients chosen for a send, across every search page visited.
///
/// Keeps the selection order and a detail record per selected id, so a
/// recipient stays displayable after its page scrolls away. Every selected id
/// has exactly one detail record and removal drops both.
#[derive(Debug, Clone, Default)]
pub struct SelectionLedger {
    selected_ids: Vec<String>,
    details: HashMap<String, Recipient>,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.details.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Selected ids in the order they were first selected.
    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    /// Flips one recipient: removes it when selected, appends it otherwise.
    pub fn toggle(&mut self, recipient: &Recipient) {
        if self.is_selected(&recipient.id) {
            self.remove(&recipient.id);
        } else {
            self.selected_ids.push(recipient.id.clone());
            self.details
                .insert(recipient.id.clone(), recipient.clone());
            log::debug!("Selected recipient {}", recipient.id);
        }
    }

    /// Selects or deselects every row of a page.
    ///
    /// Selecting keeps the existing order and appends rows not yet selected,
    /// refreshing detail records for the rest. Deselecting removes exactly the
    /// page's rows and leaves selections from other pages alone.
    pub fn set_page_selection(&mut self, page: &[Recipient], checked: bool) {
        if checked {
            for recipient in page {
                if !self.details.contains_key(&recipient.id) {
                    self.selected_ids.push(recipient.id.clone());
                }
                self.details
                    .insert(recipient.id.clone(), recipient.clone());
            }
        } else {
            let page_ids: HashSet<&str> = page.iter().map(|r| r.id.as_str()).collect();
            self.selected_ids
                .retain(|id| !page_ids.contains(id.as_str()));
            self.details.retain(|id, _| !page_ids.contains(id.as_str()));
        }
        log::debug!(
            "Page selection set to {checked} for {} rows, {} selected in total",
            page.len(),
            self.len()
        );
    }

    /// Removes one id; no-op when it is not selected.
    pub fn remove(&mut self, id: &str) {
        if self.details.remove(id).is_some() {
            self.selected_ids.retain(|selected| selected != id);
            log::debug!("Removed recipient {id}");
        }
    }

    pub fn clear(&mut self) {
        self.selected_ids.clear();
        self.details.clear();
    }

    /// Detail records in selection order, for the selected-recipient chips.
    pub fn visible_selected_details(&self) -> Vec<&Recipient> {
        self.selected_ids
            .iter()
            .filter_map(|id| self.details.get(id))
            .collect()
    }

    pub fn page_checkbox(&self, page: &[Recipient]) -> PageCheckState {
        let selected = page.iter().filter(|r| self.is_selected(&r.id)).count();
        match selected {
            0 => PageCheckState::Unchecked,
            n if n == page.len() => PageCheckState::Checked,
            _ => PageCheckState::Indeterminate,
        }
    }

    pub fn check_invariants(&self) -> Result<(), LedgerInvariantError> {
        let mut seen = HashSet::with_capacity(self.selected_ids.len());
        for id in &self.selected_ids {
            if !seen.insert(id.as_str()) {
                return Err(LedgerInvariantError::DuplicateId(id.clone()));
            }
            if !self.details.contains_key(id) {
                return Err(LedgerInvariantError::MissingDetail(id.clone()));
            }
        }
        if let Some(orphan) = self.details.keys().find(|id| !seen.contains(id.as_str())) {
            return Err(LedgerInvariantError::OrphanDetail(orphan.clone()));
        }
        Ok(())
    }
}
