//! Offset conversion between JavaScript (UTF-16) and Rust (UTF-8) strings.
//!
//! Editors running in the browser report cursor positions in UTF-16 code
//! units. The core works in byte offsets, so requests are converted on the
//! way in and spans on the way out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How offsets in a request (and spans in its response) are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 byte offsets
    #[default]
    Utf8,
    /// UTF-16 code units, as JavaScript strings count them
    Utf16,
}

impl Encoding {
    /// Converts an incoming cursor offset to a byte offset into `text`.
    pub fn to_byte_offset(self, text: &str, offset: usize) -> Result<usize, String> {
        match self {
            Encoding::Utf8 => Ok(offset),
            Encoding::Utf16 => utf16_to_utf8_offset(text, offset),
        }
    }

    /// Converts an outgoing byte offset back to this encoding.
    ///
    /// Offsets that do not land on a character boundary are returned as-is.
    pub fn from_byte_offset(self, text: &str, offset: usize) -> usize {
        match self {
            Encoding::Utf8 => offset,
            Encoding::Utf16 => utf8_to_utf16_offset(text, offset).unwrap_or(offset),
        }
    }
}

/// Byte offset of the position `utf16_offset` code units into `text`.
///
/// Offsets past the end clamp to the end of the text, matching how the core
/// treats byte offsets. Fails only when the offset splits a surrogate pair.
pub fn utf16_to_utf8_offset(text: &str, utf16_offset: usize) -> Result<usize, String> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == utf16_offset {
            return Ok(byte);
        }
        units += ch.len_utf16();
        if units > utf16_offset {
            return Err(format!(
                "UTF-16 offset {utf16_offset} falls inside a surrogate pair"
            ));
        }
    }

    Ok(text.len())
}

/// UTF-16 code unit offset of byte `utf8_offset` in `text`.
pub fn utf8_to_utf16_offset(text: &str, utf8_offset: usize) -> Result<usize, String> {
    if utf8_offset > text.len() {
        return Err(format!(
            "UTF-8 offset {utf8_offset} exceeds text length {}",
            text.len()
        ));
    }
    if !text.is_char_boundary(utf8_offset) {
        return Err(format!(
            "UTF-8 offset {utf8_offset} does not land on a character boundary"
        ));
    }

    Ok(text[..utf8_offset].chars().map(char::len_utf16).sum())
}

/// Rewrites every `{ "start": n, "end": m }` object in `value` from byte
/// offsets to UTF-16 code units. Offsets that fail to convert are kept.
pub fn convert_spans_to_utf16(text: &str, value: &mut Value) {
    match value {
        Value::Object(map) => {
            let span = map
                .get("start")
                .and_then(Value::as_u64)
                .zip(map.get("end").and_then(Value::as_u64));

            if let Some((start, end)) = span {
                for (key, offset) in [("start", start), ("end", end)] {
                    if let Ok(converted) = utf8_to_utf16_offset(text, offset as usize) {
                        map.insert(key.to_string(), Value::from(converted));
                    }
                }
            }

            for child in map.values_mut() {
                convert_spans_to_utf16(text, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                convert_spans_to_utf16(text, item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_unchanged() {
        let text = "assigned_rep_id_rel.name";
        assert_eq!(utf16_to_utf8_offset(text, 0).unwrap(), 0);
        assert_eq!(utf16_to_utf8_offset(text, 20).unwrap(), 20);
        assert_eq!(utf8_to_utf16_offset(text, 24).unwrap(), 24);
    }

    #[test]
    fn test_multibyte_text() {
        // 'é' is 2 UTF-8 bytes and 1 UTF-16 unit
        let text = "CONCAT(\"é\", na";
        assert_eq!(utf16_to_utf8_offset(text, 9).unwrap(), 10);
        assert_eq!(utf16_to_utf8_offset(text, 14).unwrap(), 15);
        assert_eq!(utf8_to_utf16_offset(text, 15).unwrap(), 14);
    }

    #[test]
    fn test_surrogate_pairs() {
        // '😀' is 4 UTF-8 bytes and 2 UTF-16 units
        let text = "\"😀\" & name";
        assert_eq!(utf16_to_utf8_offset(text, 3).unwrap(), 5);
        assert!(utf16_to_utf8_offset(text, 2).is_err());
        assert_eq!(utf8_to_utf16_offset(text, 5).unwrap(), 3);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(utf16_to_utf8_offset("name", 5).unwrap(), 4);
        assert_eq!(utf16_to_utf8_offset("\"é\"", 99).unwrap(), 4);
        assert!(utf8_to_utf16_offset("name", 5).is_err());
        assert!(utf8_to_utf16_offset("é", 1).is_err());
    }

    #[test]
    fn test_encoding_round_trip() {
        let text = "\"日本😀\" & region";
        for offset in [0, 1, 4, 7, 11, 12, text.len()] {
            let utf16 = Encoding::Utf16.from_byte_offset(text, offset);
            assert_eq!(Encoding::Utf16.to_byte_offset(text, utf16).unwrap(), offset);
        }
        assert_eq!(Encoding::Utf8.to_byte_offset(text, 3).unwrap(), 3);
    }

    #[test]
    fn test_convert_nested_spans() {
        let text = "\"é\" & nope";
        let mut json = serde_json::json!({
            "issues": [{ "code": "UNKNOWN_FIELD", "span": { "start": 7, "end": 11 } }],
            "hover": { "contents": "x", "span": { "start": 0, "end": 4 } }
        });

        convert_spans_to_utf16(text, &mut json);

        assert_eq!(json["issues"][0]["span"]["start"], 6);
        assert_eq!(json["issues"][0]["span"]["end"], 10);
        assert_eq!(json["hover"]["span"]["end"], 3);
        assert_eq!(json["issues"][0]["code"], "UNKNOWN_FIELD");
    }
}
