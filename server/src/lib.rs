//! # Mailroom Server Library
//!
//! Client library for the marketing email backend: wire models, the HTTP
//! client, the authentication latch and sample template seeding.
//!
//! ## Modules
//!
//! - [`api`] - `MarketingApi` trait and its reqwest implementation
//! - [`auth`] - Session credentials and the authentication-required latch
//! - [`model`] - Wire models for templates, recipients and send batches
//! - [`seed`] - Sample templates for an empty backend
//! - [`taskpool`] - Task pool for managing concurrent operations
//! - [`common`] - Shared error types

pub mod api;
pub mod auth;
pub mod common;
pub mod model;
pub mod seed;
pub mod taskpool;
