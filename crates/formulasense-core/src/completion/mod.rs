//! Formula completion.
//!
//! Pipeline: context analysis, relationship-chain resolution, then candidate
//! assembly from the static registries and the schema.

mod assembler;
mod context;
mod format;
pub mod functions;
pub mod keywords;
pub mod navigator;

pub use assembler::assemble_completions;
pub use context::analyze_context;
pub(crate) use context::{clamp_offset, enclosing_call};
pub use format::{CompletionFormat, CompletionItem, CompletionList};
pub use functions::{get_function_signature, FunctionCategory, FunctionSignature};
pub use navigator::{
    find_relationship_in_table, parse_relationship_chain, resolve_hops, resolve_target_table,
    UnresolvedHop, RELATIONSHIP_SUFFIX,
};
