//! The send dialog: form state, validation and submission.

pub mod dialog;
pub mod orchestrator;
pub mod renderer;

pub use dialog::SendDialog;
pub use orchestrator::{
    DispatchError, DispatchForm, DispatchOrchestrator, DispatchOutcome, DispatchPhase,
    SEND_FAILED_MESSAGE, build_payload, send_within,
};
pub use renderer::{DocumentRenderer, PrerenderedHtml, RenderError, render_or_empty};
