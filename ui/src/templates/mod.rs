//! Current document, current template and the template list.

pub mod session;

pub use session::{
    TemplateError, TemplateNotice, TemplateSession, requested_template_param,
};
