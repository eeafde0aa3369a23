use crate::components::validation_patterns::{TextFieldError, TextFieldValidator};
use crate::validation::Validator;
use mailroom_server::api::{ApiError, MarketingApi};
use mailroom_server::auth::AuthStateManager;
use mailroom_server::model::{
    CreateEmailTemplateRequest, EditorDocument, EmailTemplate, UpdateEmailTemplateRequest,
};
use mailroom_server::seed::{SeedReport, seed_templates};
use thiserror::Error;

pub const SAVED_MESSAGE: &str = "Template saved successfully";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save template";
pub const UPDATED_MESSAGE: &str = "Template updated successfully";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update template";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Name(#[from] TextFieldError),
    #[error("No template is currently loaded")]
    NoCurrentTemplate,
    #[error("Template not found")]
    NotFound(i64),
}

/// Result of a template action as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNotice {
    Success(String),
    Failure(String),
    AuthenticationRequired(String),
}

impl TemplateNotice {
    fn from_result<T>(result: &Result<T, ApiError>, success: &str, failure: &str) -> Self {
        match result {
            Ok(_) => TemplateNotice::Success(success.to_string()),
            Err(e) if e.is_authentication() => TemplateNotice::AuthenticationRequired(e.to_string()),
            Err(e) => {
                log::error!("{failure}: {e}");
                TemplateNotice::Failure(failure.to_string())
            }
        }
    }
}

/// Picks the startup template parameter; `template` wins over `templateId`.
pub fn requested_template_param<'a>(
    template: Option<&'a str>,
    template_id: Option<&'a str>,
) -> Option<&'a str> {
    template
        .filter(|value| !value.is_empty())
        .or(template_id.filter(|value| !value.is_empty()))
}

/// The document being edited and the template it came from.
///
/// Owned by the app shell. Saving as a new template never changes the
/// current template id; only loading or starting a new email does.
#[derive(Debug, Clone, Default)]
pub struct TemplateSession {
    document: EditorDocument,
    current_template_id: Option<i64>,
    templates: Vec<EmailTemplate>,
    seeded: bool,
    initial_selection_done: bool,
}

impl TemplateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    /// Replaces the document after an edit in the external editor.
    pub fn set_document(&mut self, document: EditorDocument) {
        self.document = document;
    }

    pub fn current_template_id(&self) -> Option<i64> {
        self.current_template_id
    }

    pub fn templates(&self) -> &[EmailTemplate] {
        &self.templates
    }

    pub fn find(&self, id: i64) -> Option<&EmailTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn current_template(&self) -> Option<&EmailTemplate> {
        self.current_template_id.and_then(|id| self.find(id))
    }

    pub fn load_template(&mut self, template: &EmailTemplate) {
        log::info!("Loading template {} ({})", template.id, template.name);
        self.document = template.configuration.clone();
        self.current_template_id = Some(template.id);
    }

    /// Loads a template from the fetched list by id.
    pub fn select(&mut self, id: i64) -> Result<(), TemplateError> {
        let template = self.find(id).cloned().ok_or(TemplateError::NotFound(id))?;
        self.load_template(&template);
        Ok(())
    }

    pub fn new_email(&mut self) {
        log::info!("Starting a new email");
        self.document = EditorDocument::empty();
        self.current_template_id = None;
    }

    /// Stores a fetched template list.
    ///
    /// Returns `true` when the list is empty and sample templates have not
    /// been seeded yet in this session; the flag is consumed.
    pub fn set_templates(&mut self, templates: Vec<EmailTemplate>) -> bool {
        log::debug!("Template list updated: {} templates", templates.len());
        self.templates = templates;
        if self.templates.is_empty() && !self.seeded {
            self.seeded = true;
            return true;
        }
        false
    }

    /// Applies the startup template request once the list is known.
    ///
    /// Runs only once per session. A missing, non-numeric or unknown id
    /// leaves the session untouched. Returns the loaded id.
    pub fn select_initial(&mut self, requested: Option<&str>) -> Option<i64> {
        if self.initial_selection_done {
            return None;
        }
        self.initial_selection_done = true;

        let raw = requested?;
        let Ok(id) = raw.trim().parse::<i64>() else {
            log::warn!("Ignoring non-numeric startup template id: {raw}");
            return None;
        };
        match self.select(id) {
            Ok(()) => Some(id),
            Err(e) => {
                log::warn!("Startup template {id} not loaded: {e}");
                None
            }
        }
    }

    /// Validates the name and builds the create request from the current document.
    pub fn prepare_save_as_new(
        &self,
        name: &str,
        description: &str,
    ) -> Result<CreateEmailTemplateRequest, TemplateError> {
        TextFieldValidator::template_name().validate(name)?;
        let description = description.trim();
        Ok(CreateEmailTemplateRequest {
            name: name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            configuration: self.document.clone(),
        })
    }

    /// Builds the update request for the current template.
    ///
    /// Name and description are taken from the fetched list; only the
    /// document changes.
    pub fn prepare_update(&self) -> Result<UpdateEmailTemplateRequest, TemplateError> {
        let id = self
            .current_template_id
            .ok_or(TemplateError::NoCurrentTemplate)?;
        let template = self.find(id).ok_or(TemplateError::NotFound(id))?;
        Ok(UpdateEmailTemplateRequest {
            id,
            name: template.name.clone(),
            description: template.description.clone().filter(|d| !d.is_empty()),
            configuration: self.document.clone(),
        })
    }

    pub fn apply_saved(&mut self, result: Result<EmailTemplate, ApiError>) -> TemplateNotice {
        let notice = TemplateNotice::from_result(&result, SAVED_MESSAGE, SAVE_FAILED_MESSAGE);
        if let Ok(template) = result {
            log::info!("Saved template {} ({})", template.id, template.name);
            self.templates.push(template);
        }
        notice
    }

    pub fn apply_updated(&mut self, result: Result<EmailTemplate, ApiError>) -> TemplateNotice {
        let notice = TemplateNotice::from_result(&result, UPDATED_MESSAGE, UPDATE_FAILED_MESSAGE);
        if let Ok(template) = result {
            log::info!("Updated template {}", template.id);
            match self.templates.iter_mut().find(|t| t.id == template.id) {
                Some(existing) => *existing = template,
                None => self.templates.push(template),
            }
        }
        notice
    }

    /// Fetches the template list, seeding samples once if it comes back empty.
    pub async fn refresh(
        &mut self,
        api: &dyn MarketingApi,
        auth: &AuthStateManager,
    ) -> Result<Option<SeedReport>, ApiError> {
        let result = api.list_templates().await;
        auth.observe(&result).await;
        if !self.set_templates(result?) {
            return Ok(None);
        }

        log::info!("No templates found, creating samples");
        let report = seed_templates(api).await;
        if report.authentication_failed() {
            auth.mark_authentication_required(mailroom_server::api::AUTHENTICATION_REQUIRED_MESSAGE)
                .await;
        }

        let result = api.list_templates().await;
        auth.observe(&result).await;
        self.set_templates(result?);
        Ok(Some(report))
    }

    pub async fn save_as_new(
        &mut self,
        name: &str,
        description: &str,
        api: &dyn MarketingApi,
        auth: &AuthStateManager,
    ) -> Result<TemplateNotice, TemplateError> {
        let request = self.prepare_save_as_new(name, description)?;
        let result = api.create_template(&request).await;
        auth.observe(&result).await;
        Ok(self.apply_saved(result))
    }

    pub async fn update_current(
        &mut self,
        api: &dyn MarketingApi,
        auth: &AuthStateManager,
    ) -> Result<TemplateNotice, TemplateError> {
        let request = self.prepare_update()?;
        let result = api.update_template(&request).await;
        auth.observe(&result).await;
        Ok(self.apply_updated(result))
    }
}
