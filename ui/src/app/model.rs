use crate::app::task_manager::TaskManager;
use crate::components::common::Msg;
use crate::config::AppConfig;
use crate::dispatch::{DocumentRenderer, SendDialog};
use crate::error::{AppError, ErrorReporter};
use crate::templates::TemplateSession;
use mailroom_server::api::{MarketingApi, MarketingApiClient};
use mailroom_server::auth::AuthStateManager;
use mailroom_server::taskpool::TaskPool;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Transient notification shown over the main view.
#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Error(AppError),
    Warning(String),
    Success(String),
}

/// Application state for the composer.
///
/// The model owns everything the workflow needs: the API seam, the
/// authentication latch, the template session and, while it is open, the
/// send dialog. Background operations report back through `tx_to_main`;
/// [`process_pending`](Self::process_pending) drains and applies them.
pub struct Model {
    pub(crate) config: AppConfig,
    pub(crate) api: Arc<dyn MarketingApi>,
    pub(crate) renderer: Arc<dyn DocumentRenderer>,
    pub(crate) auth: AuthStateManager,
    pub(crate) task_manager: TaskManager,
    pub(crate) error_reporter: ErrorReporter,
    pub(crate) tx_to_main: Sender<Msg>,
    rx_to_main: Receiver<Msg>,
    pub(crate) templates: TemplateSession,
    pub(crate) requested_template: Option<String>,
    pub(crate) send_dialog: Option<SendDialog>,
    pub(crate) loading_message: Option<String>,
    pub(crate) popup: Option<Popup>,
    pub(crate) auth_required: Option<String>,
    pub(crate) quit: bool,
}

impl Model {
    /// Builds a model around an existing API implementation.
    ///
    /// Must be called inside a tokio runtime; background work is spawned on it.
    pub fn new(
        config: AppConfig,
        api: Arc<dyn MarketingApi>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        let (tx_to_main, rx_to_main) = mpsc::channel();
        let error_reporter = ErrorReporter::new(tx_to_main.clone());
        let taskpool = TaskPool::new(config.max_concurrent_requests());
        let task_manager = TaskManager::new(taskpool, tx_to_main.clone(), error_reporter.clone());

        Self {
            config,
            api,
            renderer,
            auth: AuthStateManager::new(),
            task_manager,
            error_reporter,
            tx_to_main,
            rx_to_main,
            templates: TemplateSession::new(),
            requested_template: None,
            send_dialog: None,
            loading_message: None,
            popup: None,
            auth_required: None,
            quit: false,
        }
    }

    /// Builds a model talking to the configured backend.
    pub fn from_config(
        config: AppConfig,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Result<Self, AppError> {
        let api_config = config.api();
        let mut client =
            MarketingApiClient::new(api_config.base_url(), api_config.request_timeout())
                .map_err(|e| AppError::Config(e.to_string()))?;
        if let Some(session) = api_config.session() {
            client = client.with_session(session);
        } else {
            log::warn!("No session token configured; requests will be unauthenticated");
        }
        log::info!("Using marketing API at {}", client.base_url());
        Ok(Self::new(config, Arc::new(client), renderer))
    }

    /// Template to open once the list has loaded (`template` or `templateId`).
    pub fn with_requested_template(mut self, requested: Option<String>) -> Self {
        self.requested_template = requested;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateSession {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateSession {
        &mut self.templates
    }

    pub fn send_dialog(&self) -> Option<&SendDialog> {
        self.send_dialog.as_ref()
    }

    pub fn loading_message(&self) -> Option<&str> {
        self.loading_message.as_deref()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Set once the backend has rejected the session; never cleared.
    pub fn auth_required(&self) -> Option<&str> {
        self.auth_required.as_deref()
    }

    pub fn auth(&self) -> &AuthStateManager {
        &self.auth
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn sender(&self) -> Sender<Msg> {
        self.tx_to_main.clone()
    }

    /// Applies every message posted by background work so far.
    ///
    /// Returns how many messages were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx_to_main.try_recv() {
            self.handle(msg);
            handled += 1;
        }
        handled
    }

    /// Applies a message and any follow-ups it produces.
    pub fn handle(&mut self, msg: Msg) {
        let mut next = Some(msg);
        while let Some(msg) = next {
            next = self.update(msg);
        }
    }

    pub(crate) fn send_to_main(&self, msg: Msg) {
        TaskManager::send_message_or_report_error(
            &self.tx_to_main,
            msg,
            "message to main loop",
            &self.error_reporter,
        );
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        self.task_manager.shutdown();
    }
}
