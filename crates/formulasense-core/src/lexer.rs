//! Tokenizer for formula surface syntax.
//!
//! The lexer is total: every byte of the input ends up in exactly one token,
//! and malformed input (unterminated strings, stray characters) produces
//! tokens flagged accordingly instead of an error. Completion runs on every
//! keystroke, so half-typed formulas are the normal case.

use crate::types::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Identifier,
    /// Starts with a digit; may carry a fractional part.
    Number,
    /// Quoted with `"` or `'`.
    String { terminated: bool },
    Operator,
    LParen,
    RParen,
    Comma,
    Period,
    Whitespace,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or_default()
    }

    pub fn is_trivia(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

/// Characters allowed inside an identifier.
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Characters that start an operator.
pub fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '%' | '&' | '|' | '=' | '!' | '<' | '>' | '^')
}

const TWO_CHAR_OPERATORS: &[&str] = &["!=", "<>", "<=", ">=", "&&", "||", "=="];

pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let kind = if ch.is_whitespace() {
            while chars.next_if(|(_, next)| next.is_whitespace()).is_some() {}
            TokenKind::Whitespace
        } else if ch.is_ascii_digit() {
            while chars.next_if(|(_, next)| next.is_ascii_digit()).is_some() {}
            // Fractional part only when a digit follows the dot; `1.` stays a
            // number followed by a period.
            let mut lookahead = chars.clone();
            if let (Some((_, '.')), Some((_, digit))) = (lookahead.next(), lookahead.next()) {
                if digit.is_ascii_digit() {
                    chars.next();
                    while chars.next_if(|(_, next)| next.is_ascii_digit()).is_some() {}
                }
            }
            // Identifier characters glued to a number (`12abc`) belong to it.
            while chars.next_if(|(_, next)| is_identifier_char(*next)).is_some() {}
            TokenKind::Number
        } else if is_identifier_char(ch) {
            while chars.next_if(|(_, next)| is_identifier_char(*next)).is_some() {}
            TokenKind::Identifier
        } else if ch == '"' || ch == '\'' {
            let mut terminated = false;
            while let Some((_, next)) = chars.next() {
                if next == '\\' {
                    chars.next();
                } else if next == ch {
                    terminated = true;
                    break;
                }
            }
            TokenKind::String { terminated }
        } else if is_operator_char(ch) {
            if let Some(&(_, next)) = chars.peek() {
                let mut pair = String::with_capacity(2);
                pair.push(ch);
                pair.push(next);
                if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                    chars.next();
                }
            }
            TokenKind::Operator
        } else {
            match ch {
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Period,
                _ => TokenKind::Unknown,
            }
        };

        let end = chars.peek().map(|(idx, _)| *idx).unwrap_or(source.len());
        tokens.push(Token {
            kind,
            span: Span::new(start, end),
        });
    }

    tokens
}

/// Tokens with whitespace removed.
pub fn significant_tokens(source: &str) -> Vec<Token> {
    tokenize(source)
        .into_iter()
        .filter(|token| !token.is_trivia())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        significant_tokens(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_identifiers_and_punctuation() {
        assert_eq!(
            kinds("ROUND(a_rel.b, 2)"),
            vec![
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::Period,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let source = "1.5 + 2.";
        let tokens = significant_tokens(source);
        assert_eq!(tokens[0].text(source), "1.5");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
        assert_eq!(tokens[2].text(source), "2");
        assert_eq!(tokens[3].kind, TokenKind::Period);
    }

    #[test]
    fn test_strings() {
        let source = r#"CONCAT("a\"b", 'open"#;
        let tokens = significant_tokens(source);
        assert_eq!(tokens[2].kind, TokenKind::String { terminated: true });
        assert_eq!(tokens[2].text(source), r#""a\"b""#);
        assert_eq!(tokens[4].kind, TokenKind::String { terminated: false });
        assert_eq!(tokens[4].span.end, source.len());
    }

    #[test]
    fn test_two_char_operators() {
        let source = "a<=b!=c<>d";
        let ops: Vec<&str> = significant_tokens(source)
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text(source))
            .collect();
        assert_eq!(ops, vec!["<=", "!=", "<>"]);
    }

    #[test]
    fn test_spans_cover_input() {
        let source = "é + x";
        let tokens = tokenize(source);
        assert_eq!(tokens.first().unwrap().span.start, 0);
        assert_eq!(tokens.last().unwrap().span.end, source.len());
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].span.end, pair[1].span.start);
        }
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
    }
}
