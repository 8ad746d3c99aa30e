//! Types for the formula completion API.
//!
//! This module defines the schema input document, the transient values the
//! analyzer and navigator produce, and the completion, hover and diagnostic
//! results handed back to editor integrations.

mod common;
mod completion;
mod request;
mod schema;

pub use common::{issue_codes, Issue, Severity, Span};
pub use completion::{
    CandidateKind, CompletionCandidate, Context, ContextKind, ExtendedCompletionItem,
    FunctionCallContext, HoverInfo, PlainCompletionItem, RelationshipChain, SignatureHelp,
};
pub use request::{CompletionRequest, EngineOptions};
pub use schema::{
    ColumnSchema, RelationshipRecord, ReverseRelationshipRecord, Schema, TableDescription,
    TableSchema,
};
