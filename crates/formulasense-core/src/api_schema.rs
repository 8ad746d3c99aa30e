//! JSON Schema for the documents callers hand to the engine.

use schemars::generate::SchemaSettings;
use serde_json::json;

use crate::types::{CompletionRequest, Schema};

/// Draft-07 JSON Schema of the schema document and of a completion request.
pub fn api_schema() -> serde_json::Value {
    let generator = SchemaSettings::draft07().into_generator();
    json!({
        "Schema": generator.clone().into_root_schema_for::<Schema>(),
        "CompletionRequest": generator.into_root_schema_for::<CompletionRequest>(),
    })
}
