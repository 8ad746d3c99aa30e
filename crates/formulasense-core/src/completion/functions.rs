//! Built-in formula functions.
//!
//! # Performance
//!
//! Function completion candidates are pre-computed once using `LazyLock`. On
//! each completion request the cached candidates are filtered and cloned
//! instead of re-formatting signatures.

use std::sync::LazyLock;

use crate::types::{CandidateKind, CompletionCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCategory {
    Logical,
    Text,
    Math,
    Date,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: &'static str,
    pub parameters: &'static [&'static str],
    pub return_type: &'static str,
    pub category: FunctionCategory,
    pub description: &'static str,
}

impl FunctionSignature {
    /// `NAME(param, ...) → type`
    pub fn format_signature(&self) -> String {
        format!(
            "{}({}) → {}",
            self.name,
            self.parameters.join(", "),
            self.return_type
        )
    }

    fn takes_arguments(&self) -> bool {
        !self.parameters.is_empty()
    }
}

macro_rules! function {
    ($name:literal, [$($param:literal),*], $ret:literal, $category:ident, $doc:literal) => {
        FunctionSignature {
            name: $name,
            parameters: &[$($param),*],
            return_type: $ret,
            category: FunctionCategory::$category,
            description: $doc,
        }
    };
}

/// Registry order is the completion order among functions.
pub const FUNCTIONS: &[FunctionSignature] = &[
    function!("IF", ["condition", "then", "else"], "any", Logical, "Returns `then` when `condition` is true, otherwise `else`."),
    function!("AND", ["a", "b"], "boolean", Logical, "True when both arguments are true."),
    function!("OR", ["a", "b"], "boolean", Logical, "True when either argument is true."),
    function!("NOT", ["value"], "boolean", Logical, "Negates a boolean."),
    function!("COALESCE", ["value", "fallback"], "any", Null, "First argument that is not null."),
    function!("ISNULL", ["value"], "boolean", Null, "True when the value is null."),
    function!("CONCAT", ["text", "text"], "text", Text, "Joins text values."),
    function!("UPPER", ["text"], "text", Text, "Converts text to upper case."),
    function!("LOWER", ["text"], "text", Text, "Converts text to lower case."),
    function!("TRIM", ["text"], "text", Text, "Removes leading and trailing whitespace."),
    function!("LEN", ["text"], "number", Text, "Number of characters in the text."),
    function!("LEFT", ["text", "count"], "text", Text, "First `count` characters."),
    function!("RIGHT", ["text", "count"], "text", Text, "Last `count` characters."),
    function!("SUBSTR", ["text", "start", "length"], "text", Text, "Substring starting at `start` (1-based)."),
    function!("REPLACE", ["text", "search", "replacement"], "text", Text, "Replaces every occurrence of `search`."),
    function!("TEXT", ["value"], "text", Text, "Converts a value to text."),
    function!("NUMBER", ["text"], "number", Math, "Parses text as a number."),
    function!("ROUND", ["value", "digits"], "number", Math, "Rounds to `digits` decimal places."),
    function!("ABS", ["value"], "number", Math, "Absolute value."),
    function!("FLOOR", ["value"], "number", Math, "Largest integer not greater than the value."),
    function!("CEIL", ["value"], "number", Math, "Smallest integer not less than the value."),
    function!("MIN", ["a", "b"], "number", Math, "Smaller of two values."),
    function!("MAX", ["a", "b"], "number", Math, "Larger of two values."),
    function!("MOD", ["value", "divisor"], "number", Math, "Remainder after division."),
    function!("POWER", ["base", "exponent"], "number", Math, "`base` raised to `exponent`."),
    function!("NOW", [], "datetime", Date, "Current date and time."),
    function!("TODAY", [], "date", Date, "Current date."),
    function!("YEAR", ["date"], "number", Date, "Year component of a date."),
    function!("MONTH", ["date"], "number", Date, "Month component of a date (1-12)."),
    function!("DAY", ["date"], "number", Date, "Day-of-month component of a date."),
    function!("DATEADD", ["date", "amount", "unit"], "date", Date, "Adds `amount` units to a date."),
    function!("DATEDIFF", ["start", "end", "unit"], "number", Date, "Difference between two dates in `unit`s."),
];

static FUNCTION_COMPLETION_CACHE: LazyLock<Vec<CompletionCandidate>> =
    LazyLock::new(|| FUNCTIONS.iter().map(function_to_candidate).collect());

/// Looks up a function by name, ignoring case.
pub fn get_function_signature(name: &str) -> Option<&'static FunctionSignature> {
    FUNCTIONS
        .iter()
        .find(|signature| signature.name.eq_ignore_ascii_case(name))
}

pub fn function_to_candidate(signature: &FunctionSignature) -> CompletionCandidate {
    CompletionCandidate {
        label: signature.name.to_string(),
        kind: CandidateKind::Function,
        detail: signature.format_signature(),
        documentation: signature.description.to_string(),
        insert_text: if signature.takes_arguments() {
            format!("{}(", signature.name)
        } else {
            format!("{}()", signature.name)
        },
        sort_rank: String::new(),
    }
}

/// All function candidates in registry order (unscored).
pub fn function_candidates() -> &'static [CompletionCandidate] {
    FUNCTION_COMPLETION_CACHE.as_slice()
}
