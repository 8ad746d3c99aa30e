//! Cursor context classification.
//!
//! Works on raw, usually half-typed text. Nothing here builds an AST: the
//! prefix and chain come from backward byte scans, the enclosing call from a
//! bracket-depth pass over the token stream.

use crate::lexer::{is_identifier_char, is_operator_char, significant_tokens, TokenKind};
use crate::types::{Context, ContextKind, FunctionCallContext, Span};

use super::navigator::parse_relationship_chain;

/// Clamps `offset` into `text`, backing off to the nearest char boundary.
pub(crate) fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Byte offset where the trailing identifier run of `text` starts.
pub(crate) fn prefix_start(text: &str) -> usize {
    text.char_indices()
        .rev()
        .take_while(|(_, ch)| is_identifier_char(*ch))
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Whether a name can start right after `previous`.
fn is_identifier_position(previous: Option<char>) -> bool {
    match previous {
        None => true,
        Some(ch) => ch.is_whitespace() || ch == '(' || ch == ',' || is_operator_char(ch),
    }
}

/// Innermost unclosed call in `text`, if it is a named call.
///
/// A bare grouping paren `(a + b` shadows any call outside it, so the
/// result is `None` there.
pub(crate) fn enclosing_call(text: &str) -> Option<FunctionCallContext> {
    let tokens = significant_tokens(text);
    let mut frames: Vec<(Option<String>, usize)> = Vec::new();
    let mut previous: Option<usize> = None;

    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => {
                let name = previous
                    .map(|prev| &tokens[prev])
                    .filter(|prev| prev.kind == TokenKind::Identifier)
                    .map(|prev| prev.text(text).to_string());
                frames.push((name, 0));
            }
            TokenKind::RParen => {
                frames.pop();
            }
            TokenKind::Comma => {
                if let Some(frame) = frames.last_mut() {
                    frame.1 += 1;
                }
            }
            _ => {}
        }
        previous = Some(idx);
    }

    let (name, argument_index) = frames.pop()?;
    name.map(|name| FunctionCallContext {
        name,
        argument_index,
    })
}

fn inside_open_string(text: &str) -> bool {
    significant_tokens(text)
        .last()
        .is_some_and(|token| token.kind == TokenKind::String { terminated: false })
}

/// Classifies the cursor position in `text`.
///
/// Out-of-range offsets are clamped to the end of the text; an offset inside
/// a multi-byte character moves back to the start of that character.
pub fn analyze_context(text: &str, cursor_offset: usize) -> Context {
    let cursor = clamp_offset(text, cursor_offset);
    let before = &text[..cursor];
    let after = &text[cursor..];
    let function_call = enclosing_call(before);

    if inside_open_string(before) {
        return Context {
            text_before_cursor: before.to_string(),
            text_after_cursor: after.to_string(),
            kind: ContextKind::StringLiteral,
            function_call,
            ..Context::empty(cursor)
        };
    }

    let start = prefix_start(before);
    let prefix = &before[start..];
    let head = &before[..start];
    let previous = head.chars().next_back();
    let relationship_chain = parse_relationship_chain(head);

    let kind = if relationship_chain.is_some() {
        ContextKind::RelationshipNavigation
    } else if previous == Some('.') {
        ContextKind::MemberAccess
    } else if function_call.is_some() {
        ContextKind::FunctionArgument
    } else if before.trim().is_empty() {
        ContextKind::Empty
    } else {
        ContextKind::Identifier
    };

    Context {
        text_before_cursor: before.to_string(),
        text_after_cursor: after.to_string(),
        prefix: prefix.to_string(),
        expecting_identifier: is_identifier_position(previous),
        relationship_chain,
        kind,
        function_call,
        replace_span: Span::new(start, cursor),
        cursor_offset: cursor,
    }
}
