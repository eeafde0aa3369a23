use crate::config::limits::{MAX_SUBJECT_LENGTH, MAX_TEMPLATE_NAME_LENGTH, PAGE_SIZE_OPTIONS};
use crate::validation::Validator;

/// Inline validation errors for free-text fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextFieldError {
    #[error("{field_name} is required")]
    Required { field_name: String },
    #[error("{field_name} is too long (max {max_length} characters)")]
    TooLong {
        field_name: String,
        max_length: usize,
        actual_length: usize,
    },
}

/// Required single-line text with a character limit.
///
/// Emptiness is judged on the trimmed value; the limit applies to the raw
/// input, counted in characters.
#[derive(Debug, Clone)]
pub struct TextFieldValidator {
    field_name: &'static str,
    max_length: usize,
}

impl TextFieldValidator {
    pub const fn new(field_name: &'static str, max_length: usize) -> Self {
        Self {
            field_name,
            max_length,
        }
    }

    pub const fn subject() -> Self {
        Self::new("Subject", MAX_SUBJECT_LENGTH)
    }

    pub const fn template_name() -> Self {
        Self::new("Name", MAX_TEMPLATE_NAME_LENGTH)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Validator<str> for TextFieldValidator {
    type Error = TextFieldError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            return Err(TextFieldError::Required {
                field_name: self.field_name.to_string(),
            });
        }

        let actual_length = input.chars().count();
        if actual_length > self.max_length {
            return Err(TextFieldError::TooLong {
                field_name: self.field_name.to_string(),
                max_length: self.max_length,
                actual_length,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Page size {configured} is not one of {allowed:?}")]
pub struct PageSizeError {
    pub configured: u32,
    pub allowed: &'static [u32],
}

/// Accepts only the page sizes offered by the search table.
#[derive(Debug, Clone, Default)]
pub struct PageSizeValidator;

impl Validator<u32> for PageSizeValidator {
    type Error = PageSizeError;

    fn validate(&self, input: &u32) -> Result<(), Self::Error> {
        if PAGE_SIZE_OPTIONS.contains(input) {
            Ok(())
        } else {
            Err(PageSizeError {
                configured: *input,
                allowed: &PAGE_SIZE_OPTIONS,
            })
        }
    }
}
