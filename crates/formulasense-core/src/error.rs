//! Error types.
//!
//! # Error Handling Strategy
//!
//! The completion entry points never fail: malformed text, unknown tables and
//! broken relationship chains all degrade to empty or partial results.
//!
//! Loading a schema document is the one fallible operation. [`SchemaError`]
//! covers documents that cannot be used at all (invalid JSON, unnamed tables
//! or columns). Problems that still leave a usable schema are reported as
//! [`crate::types::Issue`] values by [`crate::Schema::validate`].

use thiserror::Error;

/// Error encountered while loading a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or does not match the schema shape.
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// A table key is empty or whitespace.
    #[error("table name must not be empty")]
    InvalidTableName,

    /// A column in `table` has an empty name.
    #[error("column name must not be empty (table `{table}`)")]
    InvalidColumnName { table: String },
}
