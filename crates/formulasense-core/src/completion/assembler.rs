//! Candidate assembly: source merging, prefix filtering, dedup and ranking.

use std::collections::HashSet;

use crate::types::{
    CandidateKind, ColumnSchema, CompletionCandidate, Context, ContextKind, EngineOptions,
    RelationshipRecord, Schema,
};

use super::functions::function_candidates;
use super::keywords::{keyword_candidates, literal_candidates, operator_candidates};
use super::navigator::{relationship_token, resolve_target_table};

/// Byte offsets where an inner word of `label` starts: after an underscore
/// or at a lower-to-upper case change.
fn inner_word_starts(label: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = label.as_bytes();
    (1..bytes.len()).filter(move |&idx| {
        let (prev, cur) = (bytes[idx - 1], bytes[idx]);
        (prev == b'_' && cur != b'_') || (prev.is_ascii_lowercase() && cur.is_ascii_uppercase())
    })
}

/// How a label matched the typed prefix. Lower ranks sort first.
///
/// Rank 0 is a case-insensitive starts-with match. Rank 1 is a match inside
/// the label, counted only where the prefix lines up with an inner word
/// (`na` matches `first_name`, `n` does not match `region`).
fn match_rank(label: &str, prefix: &str, allow_substring: bool) -> Option<u8> {
    if prefix.is_empty() {
        return Some(0);
    }
    let lowered = label.to_ascii_lowercase();
    let prefix = prefix.to_ascii_lowercase();
    if lowered.starts_with(&prefix) {
        Some(0)
    } else if allow_substring
        && inner_word_starts(label).any(|idx| lowered[idx..].starts_with(&prefix))
    {
        Some(1)
    } else {
        None
    }
}

pub(crate) fn field_candidate(table: &str, column: &ColumnSchema) -> CompletionCandidate {
    CompletionCandidate {
        label: column.name.clone(),
        kind: CandidateKind::Field,
        detail: column
            .data_type
            .clone()
            .unwrap_or_else(|| CandidateKind::Field.as_str().to_string()),
        documentation: format!("Column of `{table}`"),
        insert_text: column.name.clone(),
        sort_rank: String::new(),
    }
}

pub(crate) fn relationship_candidate(record: &RelationshipRecord) -> CompletionCandidate {
    let token = relationship_token(&record.relationship_name);
    let documentation = match &record.join_column {
        Some(join) => format!(
            "Navigate to `{}` through `{join}`",
            record.target_table_name
        ),
        None => format!("Navigate to `{}`", record.target_table_name),
    };
    CompletionCandidate {
        insert_text: format!("{token}."),
        label: token,
        kind: CandidateKind::Relationship,
        detail: format!("→ {}", record.target_table_name),
        documentation,
        sort_rank: String::new(),
    }
}

/// Fields and outgoing relationships of `table`, in schema order.
fn table_candidates(schema: &Schema, table: &str) -> Vec<CompletionCandidate> {
    let Some((name, entry)) = schema.table_entry(table) else {
        return Vec::new();
    };
    entry
        .columns
        .iter()
        .map(|column| field_candidate(name, column))
        .chain(
            entry
                .outgoing_relationships()
                .unwrap_or_default()
                .iter()
                .map(relationship_candidate),
        )
        .collect()
}

/// Everything in scope when no relationship chain is active.
fn default_pool(schema: &Schema, table: &str, options: &EngineOptions) -> Vec<CompletionCandidate> {
    let mut pool: Vec<CompletionCandidate> = function_candidates().to_vec();
    pool.extend(keyword_candidates());
    pool.extend(literal_candidates());
    if options.include_operators {
        pool.extend(operator_candidates());
    }
    pool.extend(table_candidates(schema, table));
    pool
}

/// Builds the ranked candidate list for `context`.
///
/// With a relationship chain in the context, candidates come only from the
/// table the chain resolves to; an unresolvable chain yields no candidates.
/// Otherwise functions, keywords, literals, operators and the current
/// table's fields and relationships are all in scope.
///
/// Ordering is by kind ([`CandidateKind::rank`]), then starts-with before
/// inner-word matches, then declaration order. The resulting position is encoded in
/// each candidate's `sort_rank`.
pub fn assemble_completions(
    schema: &Schema,
    context: &Context,
    current_table: &str,
    options: &EngineOptions,
) -> Vec<CompletionCandidate> {
    if matches!(
        context.kind,
        ContextKind::StringLiteral | ContextKind::MemberAccess
    ) {
        return Vec::new();
    }

    let pool = match &context.relationship_chain {
        Some(chain) if chain.is_complete || context.expecting_identifier => {
            match resolve_target_table(schema, chain, current_table) {
                Some(target) => table_candidates(schema, &target),
                None => return Vec::new(),
            }
        }
        Some(_) => return Vec::new(),
        None => default_pool(schema, current_table, options),
    };

    let mut seen = HashSet::new();
    let mut ranked: Vec<(u8, u8, usize, CompletionCandidate)> = pool
        .into_iter()
        .enumerate()
        .filter_map(|(ordinal, candidate)| {
            let rank = match_rank(
                &candidate.label,
                &context.prefix,
                options.allow_substring_match,
            )?;
            Some((candidate.kind.rank(), rank, ordinal, candidate))
        })
        .filter(|(_, _, _, candidate)| seen.insert((candidate.label.clone(), candidate.kind)))
        .collect();

    ranked.sort_by_key(|(kind, rank, ordinal, _)| (*kind, *rank, *ordinal));
    if let Some(max) = options.max_items {
        ranked.truncate(max);
    }

    ranked
        .into_iter()
        .map(|(kind, rank, ordinal, mut candidate)| {
            candidate.sort_rank = format!("{kind}{rank}{ordinal:05}");
            candidate
        })
        .collect()
}
