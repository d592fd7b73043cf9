//! Render options controlling the document wrapper and block edge cases.

use crate::MdlineError;
use serde::Deserialize;

/// Options accepted by [`crate::Converter`].
///
/// Deserializes from JSON with every field optional, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Container element wrapped around the document. `None` or an empty
    /// name renders a bare fragment.
    pub wrapper: Option<String>,
    /// Emit the missing closing tag for a block still open at end of input.
    #[serde(alias = "closeOpenBlocks")]
    pub close_open_blocks: bool,
    /// Run list item content through the inline transformer.
    #[serde(alias = "inlineListItems")]
    pub inline_list_items: bool,
    /// Turn a fence info string into `class="language-*"` on `<code>`.
    #[serde(alias = "fenceLanguageClass")]
    pub fence_language_class: bool,
}

impl RenderOptions {
    /// Defaults: `<div>` wrapper, open blocks closed at end of input.
    pub fn new() -> Self {
        Self {
            wrapper: Some("div".to_string()),
            close_open_blocks: true,
            inline_list_items: false,
            fence_language_class: false,
        }
    }

    /// Options reproducing the historical output exactly: blocks left open
    /// at end of input stay open.
    pub fn legacy() -> Self {
        Self {
            close_open_blocks: false,
            ..Self::new()
        }
    }

    /// Parse options from a JSON document.
    pub fn from_json(input: &str) -> Result<Self, MdlineError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Wrapper element name, if any.
    pub fn wrapper_tag(&self) -> Option<&str> {
        self.wrapper
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}
