//! Common types shared between the schema model, completions and diagnostics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Machine-readable codes attached to [`Issue`]s.
pub mod issue_codes {
    pub const UNKNOWN_TABLE: &str = "UNKNOWN_TABLE";
    pub const UNKNOWN_FIELD: &str = "UNKNOWN_FIELD";
    pub const UNKNOWN_FUNCTION: &str = "UNKNOWN_FUNCTION";
    pub const UNRESOLVED_RELATIONSHIP: &str = "UNRESOLVED_RELATIONSHIP";
    pub const INVALID_NAVIGATION: &str = "INVALID_NAVIGATION";
    pub const UNTERMINATED_STRING: &str = "UNTERMINATED_STRING";
    pub const UNBALANCED_PARENTHESES: &str = "UNBALANCED_PARENTHESES";

    // Schema validation
    pub const DANGLING_RELATIONSHIP_TARGET: &str = "DANGLING_RELATIONSHIP_TARGET";
    pub const DUPLICATE_COLUMN: &str = "DUPLICATE_COLUMN";
    pub const MIXED_RELATIONSHIP_SHAPES: &str = "MIXED_RELATIONSHIP_SHAPES";
    pub const NON_IDENTIFIER_NAME: &str = "NON_IDENTIFIER_NAME";
}

/// An issue found in a formula or a schema (error, warning, or info).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Severity level
    pub severity: Severity,

    /// Machine-readable issue code
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Optional: location in the formula source where the issue occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,

    /// Optional: table the issue relates to (schema validation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl Issue {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            span: None,
            table: None,
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            span: None,
            table: None,
        }
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: code.into(),
            message: message.into(),
            span: None,
            table: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A byte range in the formula source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Byte offset from start of the text (inclusive)
    pub start: usize,
    /// Byte offset from start of the text (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` touches this span (both ends inclusive, matching
    /// how an editor cursor sits at either edge of a word).
    pub fn touches(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}
