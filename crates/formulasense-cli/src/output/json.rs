//! JSON output formatting.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a report as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json<T: Serialize>(report: &T, compact: bool) -> Result<String> {
    if compact {
        serde_json::to_string(report).context("Failed to serialize output")
    } else {
        serde_json::to_string_pretty(report).context("Failed to serialize output")
    }
}
