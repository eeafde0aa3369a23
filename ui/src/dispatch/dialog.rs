use super::orchestrator::{DispatchForm, DispatchOrchestrator};
use crate::catalog;
use crate::components::validation_patterns::{TextFieldError, TextFieldValidator};
use crate::recipients::{FilterError, FilterState, PageCheckState, SearchController, SelectionLedger};
use crate::validation::Validator;
use mailroom_server::model::Recipient;
use std::time::Duration;

/// Everything the send dialog holds while it is open.
///
/// Opening the dialog creates a fresh value and closing drops it, so subject,
/// selection, filters and messages never survive a close.
#[derive(Debug, Clone)]
pub struct SendDialog {
    subject: String,
    subject_error: Option<TextFieldError>,
    ledger: SelectionLedger,
    filters: FilterState,
    country_error: Option<FilterError>,
    language_error: Option<FilterError>,
    search: SearchController,
    orchestrator: DispatchOrchestrator,
}

impl SendDialog {
    pub fn new(page_size: u32, search_debounce: Duration, close_delay: Duration) -> Self {
        Self {
            subject: String::new(),
            subject_error: None,
            ledger: SelectionLedger::new(),
            filters: FilterState::new(),
            country_error: None,
            language_error: None,
            search: SearchController::new(page_size, search_debounce),
            orchestrator: DispatchOrchestrator::new(close_delay),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Updates the subject and revalidates it as the user types.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
        self.subject_error = TextFieldValidator::subject()
            .validate(self.subject.as_str())
            .err();
    }

    pub fn subject_error(&self) -> Option<&TextFieldError> {
        self.subject_error.as_ref()
    }

    pub fn ledger(&self) -> &SelectionLedger {
        &self.ledger
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchController {
        &mut self.search
    }

    pub fn orchestrator(&self) -> &DispatchOrchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut DispatchOrchestrator {
        &mut self.orchestrator
    }

    pub fn toggle_recipient(&mut self, recipient: &Recipient) {
        self.ledger.toggle(recipient);
    }

    /// Header checkbox: selects or clears every row of the visible page.
    pub fn toggle_page(&mut self, checked: bool) {
        let rows = self.search.rows().to_vec();
        self.ledger.set_page_selection(&rows, checked);
    }

    pub fn page_checkbox(&self) -> PageCheckState {
        self.ledger.page_checkbox(self.search.rows())
    }

    pub fn remove_recipient(&mut self, id: &str) {
        self.ledger.remove(id);
    }

    /// Replaces the country filter.
    ///
    /// A rejected code leaves the previous filter in place and blocks sending
    /// until a valid selection replaces it.
    pub fn set_countries<S: AsRef<str>>(&mut self, codes: &[S]) -> Result<(), FilterError> {
        let result = self.filters.set_countries(codes);
        self.country_error = result.as_ref().err().cloned();
        result
    }

    pub fn set_language(&mut self, code: Option<&str>) -> Result<(), FilterError> {
        let result = self.filters.set_language(code);
        self.language_error = result.as_ref().err().cloned();
        result
    }

    /// Last rejected filter input, if it has not been corrected since.
    pub fn filter_error(&self) -> Option<&FilterError> {
        self.country_error.as_ref().or(self.language_error.as_ref())
    }

    pub fn form(&self) -> DispatchForm<'_> {
        DispatchForm {
            subject: &self.subject,
            ledger: &self.ledger,
            filters: &self.filters,
        }
    }

    /// Splits the dialog into the form view and the orchestrator that drives it.
    pub fn form_and_orchestrator(&mut self) -> (DispatchForm<'_>, &mut DispatchOrchestrator) {
        (
            DispatchForm {
                subject: &self.subject,
                ledger: &self.ledger,
                filters: &self.filters,
            },
            &mut self.orchestrator,
        )
    }

    pub fn can_send(&self) -> bool {
        self.filter_error().is_none() && self.orchestrator.can_submit(&self.form())
    }

    /// Notice shown when more countries are selected than the send uses.
    pub fn multi_country_notice(&self) -> Option<String> {
        if !self.filters.has_multiple_countries() {
            return None;
        }
        let primary = self.filters.primary_country()?;
        Some(format!(
            "Only the first selected country ({}) will be used for this send",
            catalog::country_name(primary)
        ))
    }

    /// Label for the "Send" button.
    pub fn send_button_label(&self) -> String {
        if self.orchestrator.is_submitting() {
            "Sending...".to_string()
        } else if self.ledger.is_empty() {
            "Send".to_string()
        } else {
            format!("Send to {} users", self.ledger.len())
        }
    }
}

impl Default for SendDialog {
    fn default() -> Self {
        Self::new(
            crate::config::limits::DEFAULT_PAGE_SIZE,
            crate::recipients::search::DEFAULT_SEARCH_DEBOUNCE,
            super::orchestrator::DEFAULT_SUCCESS_CLOSE_DELAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;

    #[test]
    fn test_subject_error_is_live() {
        let mut dialog = SendDialog::default();
        dialog.set_subject("   ");
        assert_eq!(
            dialog.subject_error().map(ToString::to_string).as_deref(),
            Some("Subject is required")
        );

        dialog.set_subject("Hello");
        assert!(dialog.subject_error().is_none());

        dialog.set_subject("x".repeat(256));
        assert_eq!(
            dialog.subject_error().map(ToString::to_string).as_deref(),
            Some("Subject is too long (max 255 characters)")
        );
    }

    #[test]
    fn test_rejected_filter_blocks_until_corrected() {
        let mut dialog = SendDialog::default();
        dialog.set_subject("Hi");
        dialog.toggle_recipient(&Recipient::new("u1", "Ana", "ana@example.com"));
        assert!(dialog.can_send());

        assert!(dialog.set_countries(&["XX"]).is_err());
        assert_eq!(
            dialog.filter_error(),
            Some(&FilterError::UnknownCountry("XX".to_string()))
        );
        assert!(dialog.filters().countries().is_empty());
        assert!(!dialog.can_send());

        assert_ok!(dialog.set_language(Some("de")));
        assert!(!dialog.can_send());

        assert_ok!(dialog.set_countries(&["DE"]));
        assert!(dialog.filter_error().is_none());
        assert!(dialog.can_send());
    }

    #[test]
    fn test_multi_country_notice_names_primary() {
        let mut dialog = SendDialog::default();
        assert_ok!(dialog.set_countries(&["DE"]));
        assert!(dialog.multi_country_notice().is_none());

        assert_ok!(dialog.set_countries(&["DE", "FR"]));
        assert_eq!(
            dialog.multi_country_notice().as_deref(),
            Some("Only the first selected country (Germany) will be used for this send")
        );
    }

    #[test]
    fn test_send_button_label_counts_selection() {
        let mut dialog = SendDialog::default();
        assert_eq!(dialog.send_button_label(), "Send");

        dialog.toggle_recipient(&Recipient::new("1", "Ana", "ana@x.io"));
        dialog.toggle_recipient(&Recipient::new("2", "Bo", "bo@x.io"));
        assert_eq!(dialog.send_button_label(), "Send to 2 users");
    }

    #[test]
    fn test_can_send_needs_subject_and_targeting() {
        let mut dialog = SendDialog::default();
        dialog.set_subject("Hi");
        assert!(!dialog.can_send());

        dialog.toggle_recipient(&Recipient::new("1", "Ana", "ana@x.io"));
        assert!(dialog.can_send());
    }
}
