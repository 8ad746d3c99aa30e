//! Keyword, literal and operator tables.

use crate::types::{CandidateKind, CompletionCandidate};

/// `(label, documentation)`
pub const KEYWORDS: &[(&str, &str)] = &[
    ("AND", "Logical conjunction."),
    ("OR", "Logical disjunction."),
    ("NOT", "Logical negation."),
    ("IN", "Membership test against a list of values."),
    ("IS", "Null test: `value IS NULL`."),
    ("BETWEEN", "Inclusive range test."),
];

pub const LITERALS: &[(&str, &str)] = &[
    ("TRUE", "Boolean true."),
    ("FALSE", "Boolean false."),
    ("NULL", "The absence of a value."),
];

pub const OPERATORS: &[(&str, &str)] = &[
    ("+", "Addition"),
    ("-", "Subtraction"),
    ("*", "Multiplication"),
    ("/", "Division"),
    ("%", "Remainder"),
    ("&", "Text concatenation"),
    ("=", "Equal to"),
    ("!=", "Not equal to"),
    ("<>", "Not equal to"),
    ("<", "Less than"),
    ("<=", "Less than or equal to"),
    (">", "Greater than"),
    (">=", "Greater than or equal to"),
];

fn candidates(
    table: &'static [(&'static str, &'static str)],
    kind: CandidateKind,
) -> impl Iterator<Item = CompletionCandidate> {
    table.iter().map(move |(label, documentation)| CompletionCandidate {
        label: (*label).to_string(),
        kind,
        detail: kind.as_str().to_string(),
        documentation: (*documentation).to_string(),
        insert_text: (*label).to_string(),
        sort_rank: String::new(),
    })
}

pub fn keyword_candidates() -> impl Iterator<Item = CompletionCandidate> {
    candidates(KEYWORDS, CandidateKind::Keyword)
}

pub fn literal_candidates() -> impl Iterator<Item = CompletionCandidate> {
    candidates(LITERALS, CandidateKind::Literal)
}

pub fn operator_candidates() -> impl Iterator<Item = CompletionCandidate> {
    candidates(OPERATORS, CandidateKind::Operator)
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|(label, _)| label.eq_ignore_ascii_case(word))
}

pub fn is_literal(word: &str) -> bool {
    LITERALS.iter().any(|(label, _)| label.eq_ignore_ascii_case(word))
}

pub fn keyword_documentation(word: &str) -> Option<(&'static str, &'static str)> {
    KEYWORDS
        .iter()
        .chain(LITERALS)
        .find(|(label, _)| label.eq_ignore_ascii_case(word))
        .copied()
}
