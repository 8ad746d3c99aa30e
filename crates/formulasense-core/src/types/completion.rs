use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Span;

/// A trailing run of `<name>_rel.` segments parsed from formula text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipChain {
    /// The matched text, from the first segment to the end of the input.
    pub raw: String,
    /// Relationship names with the `_rel` suffix stripped, earliest first.
    pub hops: Vec<String>,
    /// True when the chain text ends exactly on a `.`.
    pub is_complete: bool,
    /// Byte range of `raw` within the parsed text.
    pub span: Span,
}

/// What kind of position the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContextKind {
    /// Nothing but whitespace before the cursor.
    #[default]
    Empty,
    /// Typing (or about to type) a bare name.
    Identifier,
    /// Inside the argument list of a function call.
    FunctionArgument,
    /// Directly after one or more `<name>_rel.` segments.
    RelationshipNavigation,
    /// After a `.` that does not follow a relationship token.
    MemberAccess,
    /// Inside an unterminated string literal.
    StringLiteral,
}

/// The innermost unclosed function call around the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallContext {
    pub name: String,
    /// Zero-based index of the argument the cursor is in.
    pub argument_index: usize,
}

/// Classification of the cursor position, computed from raw text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub text_before_cursor: String,
    pub text_after_cursor: String,
    /// Trailing run of identifier characters before the cursor.
    pub prefix: String,
    pub expecting_identifier: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_chain: Option<RelationshipChain>,
    pub kind: ContextKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCallContext>,
    /// Byte range accepting a candidate replaces (the prefix).
    pub replace_span: Span,
    /// Cursor offset after clamping to the text.
    pub cursor_offset: usize,
}

/// Category of a completion candidate.
///
/// The declaration order is the ranking order used to sort completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CandidateKind {
    Function,
    Keyword,
    Field,
    Relationship,
    Literal,
    Operator,
}

impl CandidateKind {
    /// Fixed sort precedence: functions, keywords, fields, relationships,
    /// literals, operators.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Function => 0,
            Self::Keyword => 1,
            Self::Field => 2,
            Self::Relationship => 3,
            Self::Literal => 4,
            Self::Operator => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Keyword => "keyword",
            Self::Field => "field",
            Self::Relationship => "relationship",
            Self::Literal => "literal",
            Self::Operator => "operator",
        }
    }

    /// Numeric kind understood by Monaco-style editor widgets
    /// (`monaco.languages.CompletionItemKind`).
    pub const fn editor_kind(self) -> u32 {
        match self {
            Self::Function => 1,
            Self::Field => 3,
            Self::Operator => 11,
            Self::Literal => 14,
            Self::Keyword => 17,
            Self::Relationship => 21,
        }
    }
}

/// A single completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCandidate {
    pub label: String,
    pub kind: CandidateKind,
    pub detail: String,
    pub documentation: String,
    pub insert_text: String,
    /// Lexicographically sortable rank; lower sorts first.
    pub sort_rank: String,
}

/// Candidate serialization consumed by rich editor widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedCompletionItem {
    pub label: String,
    pub kind: u32,
    pub detail: String,
    pub documentation: String,
    pub insert_text: String,
    pub sort_text: String,
}

/// Plain string-keyed candidate serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlainCompletionItem {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub detail: String,
    pub info: String,
    pub apply: String,
    pub boost: i32,
}

/// Hover contents for the identifier under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoverInfo {
    /// Markdown
    pub contents: String,
    pub span: Span,
}

/// Signature of the function call surrounding the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignatureHelp {
    pub label: String,
    pub documentation: String,
    pub parameters: Vec<String>,
    pub active_parameter: usize,
}

impl Context {
    /// A context with every field empty, positioned at `cursor_offset`.
    pub fn empty(cursor_offset: usize) -> Self {
        Self {
            replace_span: Span::new(cursor_offset, cursor_offset),
            cursor_offset,
            ..Self::default()
        }
    }
}
