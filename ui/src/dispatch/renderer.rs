use mailroom_server::model::EditorDocument;
use mailroom_server::model::document::ROOT_BLOCK_ID;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to render document: {0}")]
pub struct RenderError(pub String);

/// Turns an editor document into email markup.
///
/// Rendering is owned by the external editor; the workflow only needs the
/// resulting HTML string.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &EditorDocument, root_block_id: &str)
    -> Result<String, RenderError>;
}

/// Markup produced ahead of time, e.g. exported from the editor to a file.
#[derive(Debug, Clone)]
pub struct PrerenderedHtml(String);

impl PrerenderedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }
}

impl DocumentRenderer for PrerenderedHtml {
    fn render(
        &self,
        _document: &EditorDocument,
        _root_block_id: &str,
    ) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}

/// Renders from the root block, treating a renderer failure as empty markup.
pub fn render_or_empty(renderer: &dyn DocumentRenderer, document: &EditorDocument) -> String {
    match renderer.render(document, ROOT_BLOCK_ID) {
        Ok(html) => html,
        Err(e) => {
            log::error!("Failed to generate HTML: {e}");
            String::new()
        }
    }
}
