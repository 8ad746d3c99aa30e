//! Formula diagnostics.
//!
//! A token-level pass; no AST is built. Identifier paths (`a_rel.b_rel.c`) are
//! recognised by span contiguity, so `a_rel . b` is three separate pieces and
//! is not navigated.

use crate::completion::navigator::relationship_base_name;
use crate::completion::{get_function_signature, keywords};
use crate::lexer::{significant_tokens, Token, TokenKind};
use crate::types::{issue_codes, Issue, Schema};

fn adjacent(left: &Token, right: &Token) -> bool {
    left.span.end == right.span.start
}

/// A run of identifiers joined by directly adjacent periods.
struct Path<'t> {
    segments: Vec<&'t Token>,
    /// Ends on a `.` with nothing typed after it.
    trailing_dot: bool,
    /// Directly followed by `(`.
    called: bool,
}

/// Splits the significant tokens into identifier paths.
fn paths(tokens: &[Token]) -> Vec<Path<'_>> {
    let mut paths = Vec::new();
    let mut idx = 0;

    while idx < tokens.len() {
        if tokens[idx].kind != TokenKind::Identifier {
            idx += 1;
            continue;
        }

        let mut segments = vec![&tokens[idx]];
        let mut trailing_dot = false;
        idx += 1;
        while let Some(period) = tokens.get(idx) {
            let last = segments[segments.len() - 1];
            if period.kind != TokenKind::Period || !adjacent(last, period) {
                break;
            }
            match tokens.get(idx + 1) {
                Some(next) if next.kind == TokenKind::Identifier && adjacent(period, next) => {
                    segments.push(next);
                    idx += 2;
                }
                _ => {
                    trailing_dot = true;
                    idx += 1;
                    break;
                }
            }
        }

        let last = segments[segments.len() - 1];
        let called = !trailing_dot
            && tokens
                .get(idx)
                .is_some_and(|next| next.kind == TokenKind::LParen && adjacent(last, next));

        paths.push(Path {
            segments,
            trailing_dot,
            called,
        });
    }

    paths
}

fn lexical_issues(tokens: &[Token], issues: &mut Vec<Issue>) {
    let mut open = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::String { terminated: false } => issues.push(
                Issue::error(
                    issue_codes::UNTERMINATED_STRING,
                    "Unterminated string literal",
                )
                .with_span(token.span),
            ),
            TokenKind::LParen => open.push(token.span),
            TokenKind::RParen => {
                if open.pop().is_none() {
                    issues.push(
                        Issue::error(issue_codes::UNBALANCED_PARENTHESES, "Unmatched `)`")
                            .with_span(token.span),
                    );
                }
            }
            _ => {}
        }
    }

    for span in open {
        issues.push(
            Issue::error(issue_codes::UNBALANCED_PARENTHESES, "Unclosed `(`").with_span(span),
        );
    }
}

fn check_path(
    schema: &Schema,
    source: &str,
    path: &Path<'_>,
    current_table: Option<&str>,
    issues: &mut Vec<Issue>,
) {
    let hop_count = if path.trailing_dot {
        path.segments.len()
    } else {
        path.segments.len() - 1
    };

    let mut table = current_table.map(str::to_string);
    for segment in &path.segments[..hop_count] {
        let name = segment.text(source);
        let Some(base) = relationship_base_name(name) else {
            issues.push(
                Issue::warning(
                    issue_codes::INVALID_NAVIGATION,
                    format!("`{name}` is not a relationship; navigate with `{name}_rel.`"),
                )
                .with_span(segment.span),
            );
            return;
        };
        let Some(from) = table.take() else {
            return;
        };
        match schema.find_relationship_in_table(&from, base) {
            Some(record) => table = Some(record.target_table_name.clone()),
            None => {
                issues.push(
                    Issue::error(
                        issue_codes::UNRESOLVED_RELATIONSHIP,
                        format!("Table `{from}` has no relationship `{base}`"),
                    )
                    .with_span(segment.span)
                    .with_table(from),
                );
                return;
            }
        }
    }

    if path.trailing_dot {
        return;
    }

    let terminal = path.segments[path.segments.len() - 1];
    let name = terminal.text(source);

    if path.called {
        if get_function_signature(name).is_none() {
            issues.push(
                Issue::error(
                    issue_codes::UNKNOWN_FUNCTION,
                    format!("Unknown function `{name}`"),
                )
                .with_span(terminal.span),
            );
        }
        return;
    }

    let bare = path.segments.len() == 1;
    if bare && (keywords::is_keyword(name) || keywords::is_literal(name)) {
        return;
    }
    let Some(table) = table else {
        return;
    };
    let known_column = schema
        .table(&table)
        .is_some_and(|entry| entry.column(name).is_some());
    let known_relationship = relationship_base_name(name)
        .is_some_and(|base| schema.find_relationship_in_table(&table, base).is_some());

    if !known_column && !known_relationship {
        issues.push(
            Issue::warning(
                issue_codes::UNKNOWN_FIELD,
                format!("Table `{table}` has no field `{name}`"),
            )
            .with_span(terminal.span)
            .with_table(table),
        );
    }
}

/// Checks `source` as a formula evaluated against `current_table`.
///
/// Lexical problems come first, then an unknown current table, then name
/// resolution problems in source order. Field checks are skipped when the
/// current table is unknown.
#[must_use]
pub fn diagnostics(schema: &Schema, source: &str, current_table: &str) -> Vec<Issue> {
    let tokens = significant_tokens(source);
    let mut issues = Vec::new();

    lexical_issues(&tokens, &mut issues);

    let table = schema.table_entry(current_table).map(|(name, _)| name);
    if table.is_none() {
        issues.push(
            Issue::error(
                issue_codes::UNKNOWN_TABLE,
                format!("Table `{current_table}` is not in the schema"),
            )
            .with_table(current_table),
        );
    }

    for path in paths(&tokens) {
        check_path(schema, source, &path, table, &mut issues);
    }

    issues
}
