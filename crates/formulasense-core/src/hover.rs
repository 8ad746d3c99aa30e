//! Hover and signature help.

use crate::completion::keywords::keyword_documentation;
use crate::completion::navigator::relationship_base_name;
use crate::completion::{clamp_offset, enclosing_call, get_function_signature, resolve_hops};
use crate::lexer::{significant_tokens, Token, TokenKind};
use crate::types::{HoverInfo, Schema, SignatureHelp};

fn function_markdown(name: &str) -> Option<String> {
    let signature = get_function_signature(name)?;
    Some(format!(
        "```\n{}\n```\n{}",
        signature.format_signature(),
        signature.description
    ))
}

/// Index of the first segment of the identifier path ending at `idx`.
fn path_start(tokens: &[Token], idx: usize) -> usize {
    let mut start = idx;
    while start >= 2 {
        let (ident, period) = (&tokens[start - 2], &tokens[start - 1]);
        let contiguous = ident.kind == TokenKind::Identifier
            && period.kind == TokenKind::Period
            && ident.span.end == period.span.start
            && period.span.end == tokens[start].span.start;
        if !contiguous {
            break;
        }
        start -= 2;
    }
    start
}

/// Describes the identifier touching `offset`.
///
/// Segments of a relationship chain before the identifier are resolved
/// first, so `assigned_rep_id_rel.name` describes `name` on the related
/// table. Returns `None` when nothing is known about the identifier or the
/// chain before it does not resolve.
#[must_use]
pub fn hover(schema: &Schema, text: &str, offset: usize, current_table: &str) -> Option<HoverInfo> {
    let offset = clamp_offset(text, offset);
    let tokens = significant_tokens(text);
    let idx = tokens
        .iter()
        .position(|token| token.kind == TokenKind::Identifier && token.span.touches(offset))?;
    let token = &tokens[idx];
    let word = token.text(text);

    let start = path_start(&tokens, idx);
    let hops = tokens[start..idx]
        .iter()
        .step_by(2)
        .map(|segment| relationship_base_name(segment.text(text)))
        .collect::<Option<Vec<_>>>()?;
    let table = resolve_hops(schema, hops.as_slice(), current_table).ok()?;
    let bare = hops.is_empty();

    let called = tokens
        .get(idx + 1)
        .is_some_and(|next| next.kind == TokenKind::LParen);

    let contents = if bare && called {
        function_markdown(word)?
    } else if let Some(record) = relationship_base_name(word)
        .and_then(|base| schema.find_relationship_in_table(&table, base))
    {
        let mut contents = format!("`{word}` → `{}`", record.target_table_name);
        if let Some(join) = &record.join_column {
            contents.push_str(&format!("\n\nJoined on `{join}`"));
        }
        contents
    } else if let Some((canonical, column)) = schema
        .table_entry(&table)
        .and_then(|(name, entry)| entry.column(word).map(|column| (name, column)))
    {
        match &column.data_type {
            Some(data_type) => format!("`{}`: {data_type} (table `{canonical}`)", column.name),
            None => format!("`{}` (table `{canonical}`)", column.name),
        }
    } else if bare {
        // `AND` is both a keyword and a function; uncalled, it is the keyword.
        match keyword_documentation(word) {
            Some((label, doc)) => format!("`{label}`\n\n{doc}"),
            None => function_markdown(word)?,
        }
    } else {
        return None;
    };

    Some(HoverInfo {
        contents,
        span: token.span,
    })
}

/// Signature of the innermost function call around `offset`.
#[must_use]
pub fn signature_help(text: &str, offset: usize) -> Option<SignatureHelp> {
    let offset = clamp_offset(text, offset);
    let call = enclosing_call(&text[..offset])?;
    let signature = get_function_signature(&call.name)?;

    Some(SignatureHelp {
        label: signature.format_signature(),
        documentation: signature.description.to_string(),
        parameters: signature.parameters.iter().map(ToString::to_string).collect(),
        active_parameter: call
            .argument_index
            .min(signature.parameters.len().saturating_sub(1)),
    })
}
