//! # Application Module
//!
//! The application model and the message loop around it.
//!
//! Messages flow one way: user actions and background results arrive as
//! [`Msg`](crate::components::common::Msg) values, [`model::Model::update`]
//! applies them and may return a follow-up message. Backend calls run on the
//! task pool through [`task_manager::TaskManager`] and post their results
//! back to the same channel.
//!
//! - [`application_lifecycle`] - driving the loop until a condition holds
//! - [`model`] - application state
//! - [`task_manager`] - background operations with loading indicators
//! - `updates` - per-activity message handlers

/// Driving the message loop
pub mod application_lifecycle;
/// Core application model and state structures
pub mod model;
/// Background task management and coordination
pub mod task_manager;
mod update;
/// Message processing and state update logic
mod updates;
