use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Identifier of the layout block every editor document starts from.
pub const ROOT_BLOCK_ID: &str = "root";

/// Opaque editor document as produced by the visual email editor.
///
/// The document is a map of block id to block definition. This crate never
/// interprets the blocks beyond locating the root; rendering belongs to the
/// external editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EditorDocument(Value);

impl EditorDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The blank document used when starting a new email.
    pub fn empty() -> Self {
        Self(json!({
            ROOT_BLOCK_ID: {
                "type": "EmailLayout",
                "data": {
                    "backdropColor": "#F5F5F5",
                    "canvasColor": "#FFFFFF",
                    "textColor": "#262626",
                    "fontFamily": "MODERN_SANS",
                    "childrenIds": []
                }
            }
        }))
    }

    /// A single heading plus one paragraph, used for sample templates.
    pub fn heading_and_text(heading: &str, text: &str) -> Self {
        Self(json!({
            ROOT_BLOCK_ID: {
                "type": "EmailLayout",
                "data": {
                    "backdropColor": "#F5F5F5",
                    "canvasColor": "#FFFFFF",
                    "textColor": "#262626",
                    "fontFamily": "MODERN_SANS",
                    "childrenIds": ["block-heading", "block-text"]
                }
            },
            "block-heading": {
                "type": "Heading",
                "data": {
                    "props": { "text": heading, "level": "h2" },
                    "style": { "padding": { "top": 24, "bottom": 8, "left": 24, "right": 24 } }
                }
            },
            "block-text": {
                "type": "Text",
                "data": {
                    "props": { "text": text },
                    "style": { "padding": { "top": 8, "bottom": 24, "left": 24, "right": 24 } }
                }
            }
        }))
    }

    pub fn root_block(&self) -> Option<&Value> {
        self.0.get(ROOT_BLOCK_ID)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for EditorDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for EditorDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
