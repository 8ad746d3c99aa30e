//! Relationship navigation: `<name>_rel.` chains.
//!
//! A formula navigates from the current table through an outgoing
//! relationship by writing the relationship name with a `_rel` suffix followed
//! by a dot. Chains compose: `assigned_rep_id_rel.manager_id_rel.name` reads
//! `name` from the manager of the assigned rep.
//!
//! Parsing is a backward scan from the end of the text, one segment at a
//! time, so each hop can be tested on its own. Resolution walks the hops
//! against the schema and either reaches a table for every hop or fails as a
//! whole.

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::lexer::is_identifier_char;
use crate::types::{RelationshipChain, RelationshipRecord, Schema, Span};

/// Suffix that marks an identifier as a relationship token.
pub const RELATIONSHIP_SUFFIX: &str = "_rel";

fn is_identifier_byte(byte: u8) -> bool {
    is_identifier_char(byte as char)
}

/// Start of the identifier run ending at `end`.
fn identifier_start(bytes: &[u8], end: usize) -> usize {
    let mut start = end;
    while start > 0 && is_identifier_byte(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// Strips the `_rel` suffix, returning the relationship base name.
///
/// `_rel` on its own has no base name and is not a relationship token.
pub fn relationship_base_name(identifier: &str) -> Option<&str> {
    identifier
        .strip_suffix(RELATIONSHIP_SUFFIX)
        .filter(|base| !base.is_empty())
}

/// Renders a relationship name as it is written in formulas.
pub fn relationship_token(relationship_name: &str) -> String {
    format!("{relationship_name}{RELATIONSHIP_SUFFIX}")
}

/// Parses the trailing relationship chain of `text`.
///
/// Only the longest contiguous run of `<identifier>_rel.` segments that ends
/// at the end of `text` counts; scanning stops at the first segment that is
/// not a relationship token or at any other character. A trailing partial
/// identifier after the last dot is allowed and leaves the chain incomplete.
///
/// Returns `None` when no complete segment precedes the end of the text,
/// which includes a last segment without its trailing dot
/// (`assigned_rep_id_rel`).
///
/// # Examples
/// - `"assigned_rep_id_rel."` → hops `["assigned_rep_id"]`, complete
/// - `"a_rel.b_rel.na"` → hops `["a", "b"]`, incomplete
/// - `"x + owner_rel."` → hops `["owner"]`
/// - `"account.owner_rel."` → hops `["owner"]` (`account.` is not a hop)
pub fn parse_relationship_chain(text: &str) -> Option<RelationshipChain> {
    let bytes = text.as_bytes();

    let fragment_start = identifier_start(bytes, bytes.len());
    let mut cursor = fragment_start;
    let mut chain_start = fragment_start;
    let mut hops = Vec::new();

    while cursor > 0 && bytes[cursor - 1] == b'.' {
        let dot = cursor - 1;
        let start = identifier_start(bytes, dot);
        match relationship_base_name(&text[start..dot]) {
            Some(base) => {
                hops.push(base.to_string());
                chain_start = start;
                cursor = start;
            }
            None => break,
        }
    }

    if hops.is_empty() {
        return None;
    }
    hops.reverse();

    Some(RelationshipChain {
        raw: text[chain_start..].to_string(),
        hops,
        is_complete: fragment_start == bytes.len(),
        span: Span::new(chain_start, text.len()),
    })
}

/// A hop that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedHop {
    /// Index into the chain's hops.
    pub index: usize,
    /// Table the hop was looked up on.
    pub table: String,
}

/// Walks `hops` from `starting_table`, returning the table every hop leads to.
///
/// Fails on the first hop that is not an outgoing relationship of the table
/// reached so far; partial progress is never returned as success.
pub fn resolve_hops<S: AsRef<str>>(
    schema: &Schema,
    hops: &[S],
    starting_table: &str,
) -> Result<String, UnresolvedHop> {
    let mut current = starting_table.to_string();

    for (index, hop) in hops.iter().enumerate() {
        let hop = hop.as_ref();
        match find_relationship_in_table(schema, &current, hop) {
            Some(record) => {
                #[cfg(feature = "tracing")]
                trace!(hop, from = %current, to = %record.target_table_name, "resolved hop");
                current = record.target_table_name.clone();
            }
            None => {
                #[cfg(feature = "tracing")]
                debug!(hop, table = %current, index, "unresolved relationship hop");
                return Err(UnresolvedHop {
                    index,
                    table: current,
                });
            }
        }
    }

    Ok(current)
}

/// Resolves `chain` from `starting_table` to its target table name.
///
/// Self-referential relationships resolve like any other: the current table
/// simply stays the same and the next hop is looked up on it again.
pub fn resolve_target_table(
    schema: &Schema,
    chain: &RelationshipChain,
    starting_table: &str,
) -> Option<String> {
    if chain.hops.is_empty() {
        return None;
    }
    resolve_hops(schema, chain.hops.as_slice(), starting_table).ok()
}

/// Finds an outgoing relationship by name on a table.
///
/// Shares the `directRelationships`/`relationships` precedence of
/// [`crate::types::TableSchema::outgoing_relationships`].
pub fn find_relationship_in_table<'a>(
    schema: &'a Schema,
    table_name: &str,
    relationship_name: &str,
) -> Option<&'a RelationshipRecord> {
    schema.find_relationship_in_table(table_name, relationship_name)
}
