//! Request and option types for the completion API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Schema;

/// Tuning knobs for a [`CompletionEngine`](crate::CompletionEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Also accept candidates where the prefix starts an inner word of the
    /// label (`na` for `first_name`), ranked after starts-with matches. When
    /// false only starts-with matches pass.
    pub allow_substring_match: bool,

    /// Upper bound on the number of candidates returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    /// Offer operator candidates outside relationship navigation.
    pub include_operators: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            allow_substring_match: true,
            max_items: None,
            include_operators: true,
        }
    }
}

/// A self-contained completion request, as sent by editor integrations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Formula source text
    pub text: String,

    /// Byte offset of the cursor in `text`
    pub cursor_offset: usize,

    /// Table the formula is evaluated against
    pub current_table: String,

    /// Serialize candidates in the rich editor-widget shape
    #[serde(default)]
    pub use_extended_format: bool,

    /// Schema to complete against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<EngineOptions>,
}
