use crate::catalog;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

/// Recipient filters chosen in the send dialog.
///
/// Countries form an insertion-ordered set; the language is optional. Only
/// codes from the fixed catalogs are accepted. The backend is still expected
/// to reject anything it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    countries: Vec<String>,
    language: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Adds a country at the end; already present codes keep their place.
    pub fn add_country(&mut self, code: &str) -> Result<(), FilterError> {
        if !catalog::is_known_country(code) {
            return Err(FilterError::UnknownCountry(code.to_string()));
        }
        if !self.countries.iter().any(|c| c == code) {
            self.countries.push(code.to_string());
        }
        Ok(())
    }

    pub fn remove_country(&mut self, code: &str) {
        self.countries.retain(|c| c != code);
    }

    /// Replaces the country list, keeping first occurrences in order.
    ///
    /// Nothing changes when any code is unknown.
    pub fn set_countries<S: AsRef<str>>(&mut self, codes: &[S]) -> Result<(), FilterError> {
        if let Some(unknown) = codes
            .iter()
            .map(AsRef::as_ref)
            .find(|code| !catalog::is_known_country(code))
        {
            return Err(FilterError::UnknownCountry(unknown.to_string()));
        }

        let mut countries: Vec<String> = Vec::with_capacity(codes.len());
        for code in codes.iter().map(AsRef::as_ref) {
            if !countries.iter().any(|c| c == code) {
                countries.push(code.to_string());
            }
        }
        self.countries = countries;
        Ok(())
    }

    /// Sets or clears the preferred language.
    pub fn set_language(&mut self, code: Option<&str>) -> Result<(), FilterError> {
        match code {
            Some(code) if !catalog::is_known_language(code) => {
                Err(FilterError::UnknownLanguage(code.to_string()))
            }
            Some(code) => {
                self.language = Some(code.to_string());
                Ok(())
            }
            None => {
                self.language = None;
                Ok(())
            }
        }
    }

    /// The only country the send endpoint receives.
    pub fn primary_country(&self) -> Option<&str> {
        self.countries.first().map(String::as_str)
    }

    /// True when countries beyond the first will be ignored by a send.
    pub fn has_multiple_countries(&self) -> bool {
        self.countries.len() > 1
    }

    /// True when any filter narrows the audience.
    pub fn is_active(&self) -> bool {
        !self.countries.is_empty() || self.language.is_some()
    }

    pub fn clear(&mut self) {
        self.countries.clear();
        self.language = None;
    }
}
