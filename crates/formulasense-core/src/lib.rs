mod api_schema;
pub mod completion;
pub mod diagnostics;
mod engine;
pub mod error;
pub mod hover;
pub mod lexer;
mod schema;
pub mod types;

// Re-export main types and functions
pub use api_schema::api_schema;
pub use completion::{
    analyze_context, assemble_completions, find_relationship_in_table, parse_relationship_chain,
    resolve_target_table, CompletionFormat, CompletionItem, CompletionList,
};
pub use diagnostics::diagnostics;
pub use engine::{completion_items, CompletionEngine};
pub use error::SchemaError;
pub use hover::{hover, signature_help};

// Re-export types explicitly
pub use types::{
    // Issue codes
    issue_codes,
    CandidateKind,
    ColumnSchema,
    CompletionCandidate,
    // Request types
    CompletionRequest,
    Context,
    ContextKind,
    EngineOptions,
    ExtendedCompletionItem,
    FunctionCallContext,
    HoverInfo,
    Issue,
    PlainCompletionItem,
    RelationshipChain,
    RelationshipRecord,
    ReverseRelationshipRecord,
    // Schema model
    Schema,
    Severity,
    SignatureHelp,
    Span,
    TableDescription,
    TableSchema,
};
