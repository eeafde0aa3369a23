//! # Mailroom
//!
//! Workflow core for an email-template composer and bulk sender: choosing
//! recipients across paginated search results, combining them with country
//! and language filters, guarding the send submission, and keeping the
//! current template in sync with the backend.
//!
//! ## Modules
//!
//! - [`app`] - application model, message loop and background tasks
//! - [`catalog`] - supported countries and languages
//! - [`components`] - message types and shared validation patterns
//! - [`config`] - configuration loading and validation
//! - [`dispatch`] - the send dialog and its submission state machine
//! - [`error`] - error types and centralized error reporting
//! - [`logger`] - logging setup
//! - [`recipients`] - filters, selection ledger and user search
//! - [`templates`] - current document and template list
//! - [`validation`] - the validation trait
//!
//! Rendering documents to HTML and the backend itself live elsewhere; this
//! crate talks to them through [`dispatch::DocumentRenderer`] and
//! [`mailroom_server::api::MarketingApi`].

pub mod app;
pub mod catalog;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod recipients;
pub mod templates;
pub mod validation;

// Re-export commonly used types for easier access in tests
pub use error::AppError;

pub use components::common::Msg;

pub use validation::Validator;
