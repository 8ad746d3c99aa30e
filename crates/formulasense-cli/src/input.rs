//! Formula input: argument or stdin, plus cursor placement.

use anyhow::{bail, Context, Result};
use std::io::{self, Read};

/// Marks the cursor in a formula given on the command line.
pub const CURSOR_MARKER: char = '|';

/// Formula text with the cursor placed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaInput {
    pub text: String,
    pub cursor: usize,
}

/// Returns the formula argument, or reads the formula from stdin.
///
/// One trailing newline is dropped from stdin input.
pub fn read_formula(formula: Option<&str>) -> Result<String> {
    if let Some(formula) = formula {
        return Ok(formula.to_string());
    }

    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read formula from stdin")?;
    Ok(strip_trailing_newline(content))
}

fn strip_trailing_newline(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    content
}

/// Places the cursor.
///
/// An explicit `cursor` is used as-is and must land on a character boundary.
/// Otherwise a single `|` marks the cursor and is removed from the text; with
/// no marker the cursor sits at the end. Formulas using the `||` operator need
/// an explicit cursor.
pub fn locate_cursor(text: &str, cursor: Option<usize>) -> Result<FormulaInput> {
    if let Some(cursor) = cursor {
        if cursor > text.len() {
            bail!(
                "cursor offset {cursor} is past the end of the formula ({} bytes)",
                text.len()
            );
        }
        if !text.is_char_boundary(cursor) {
            bail!("cursor offset {cursor} is not on a character boundary");
        }
        return Ok(FormulaInput {
            text: text.to_string(),
            cursor,
        });
    }

    let mut markers = text.match_indices(CURSOR_MARKER);
    match (markers.next(), markers.next()) {
        (None, _) => Ok(FormulaInput {
            text: text.to_string(),
            cursor: text.len(),
        }),
        (Some((offset, _)), None) => Ok(FormulaInput {
            text: text.replacen(CURSOR_MARKER, "", 1),
            cursor: offset,
        }),
        (Some(_), Some(_)) => {
            bail!("formula contains more than one `|`; pass --cursor to place the cursor")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker() {
        let input = locate_cursor("assigned_rep_id_rel.|", None).unwrap();
        assert_eq!(input.text, "assigned_rep_id_rel.");
        assert_eq!(input.cursor, 20);
    }

    #[test]
    fn test_no_marker_puts_cursor_at_end() {
        let input = locate_cursor("ROUND(", None).unwrap();
        assert_eq!(input.cursor, 6);
    }

    #[test]
    fn test_explicit_cursor_keeps_pipes() {
        let input = locate_cursor("a || b", Some(2)).unwrap();
        assert_eq!(input.text, "a || b");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_rejects_bad_cursor() {
        assert!(locate_cursor("abc", Some(4)).is_err());
        assert!(locate_cursor("é", Some(1)).is_err());
        assert!(locate_cursor("a || b", None).is_err());
    }

    #[test]
    fn test_strip_trailing_newline() {
        assert_eq!(strip_trailing_newline("id\r\n".to_string()), "id");
        assert_eq!(strip_trailing_newline("id\n\n".to_string()), "id\n");
        assert_eq!(strip_trailing_newline("id".to_string()), "id");
    }
}
