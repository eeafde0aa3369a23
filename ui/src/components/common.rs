use mailroom_server::api::ApiError;
use mailroom_server::model::{EmailTemplate, Recipient, SendEmailResponse};

use crate::error::AppError;
use crate::recipients::search::SearchKey;

#[derive(Debug, PartialEq)]
pub enum Msg {
    AppClose,
    /// Drives time-based state: search debounce and dialog auto-close
    Tick,
    SearchActivity(SearchActivityMsg),
    SelectionActivity(SelectionActivityMsg),
    DispatchActivity(DispatchActivityMsg),
    TemplateActivity(TemplateActivityMsg),
    LoadingActivity(LoadingActivityMsg),
    PopupActivity(PopupActivityMsg),
    AuthActivity(AuthActivityMsg),
    Error(AppError),
}

#[derive(Debug, PartialEq)]
pub enum SearchActivityMsg {
    QueryChanged(String),
    PageChanged(u32),
    PageSizeChanged(u32),
    ResultsLoaded {
        key: SearchKey,
        result: Result<Vec<Recipient>, ApiError>,
    },
}

#[derive(Debug, PartialEq)]
pub enum SelectionActivityMsg {
    RecipientToggled(Recipient),
    /// Header checkbox of the current page
    PageToggled(bool),
    RecipientRemoved(String),
}

#[derive(Debug, PartialEq)]
pub enum DispatchActivityMsg {
    OpenDialog,
    CloseDialog,
    SubjectChanged(String),
    CountriesChanged(Vec<String>),
    LanguageChanged(Option<String>),
    Submit,
    SendCompleted(Result<SendEmailResponse, ApiError>),
    DismissFailure,
}

#[derive(Debug, PartialEq)]
pub enum TemplateActivityMsg {
    Load,
    TemplatesLoaded(Result<Vec<EmailTemplate>, ApiError>),
    SeedCompleted { created: usize, failed: usize },
    Select(i64),
    NewEmail,
    SaveAsNew {
        name: String,
        description: String,
    },
    Saved(Result<EmailTemplate, ApiError>),
    UpdateCurrent,
    Updated(Result<EmailTemplate, ApiError>),
}

#[derive(Debug, PartialEq)]
pub enum LoadingActivityMsg {
    Start(String),
    Stop,
}

#[derive(Debug, PartialEq)]
pub enum PopupActivityMsg {
    ShowError(AppError),
    ShowWarning(String),
    ShowSuccess(String),
    Close,
}

#[derive(Debug, PartialEq)]
pub enum AuthActivityMsg {
    AuthenticationRequired(String),
}

impl Default for Msg {
    fn default() -> Self {
        Self::AppClose
    }
}
