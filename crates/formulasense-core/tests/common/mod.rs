#![allow(dead_code)]

use formulasense_core::{CompletionEngine, CompletionRequest, Schema};

/// The customer/rep schema: `customer.assigned_rep_id` points at `rep`, and
/// `rep.manager_id` points back at `rep`.
pub const SAMPLE_SCHEMA_JSON: &str = r#"{
  "customer": {
    "columns": [
      { "name": "id", "dataType": "integer" },
      { "name": "first_name", "dataType": "text" },
      { "name": "assigned_rep_id", "dataType": "integer" }
    ],
    "directRelationships": [
      { "relationshipName": "assigned_rep_id", "targetTableName": "rep", "joinColumn": "assigned_rep_id" }
    ]
  },
  "rep": {
    "columns": [
      { "name": "id", "dataType": "integer" },
      { "name": "name", "dataType": "text" },
      { "name": "commission_rate", "dataType": "decimal" },
      { "name": "hire_date", "dataType": "date" },
      { "name": "region", "dataType": "text" },
      { "name": "manager_id", "dataType": "integer" }
    ],
    "directRelationships": [
      { "relationshipName": "manager_id", "targetTableName": "rep", "joinColumn": "manager_id" }
    ]
  }
}"#;

pub fn sample_schema() -> Schema {
    Schema::from_json(SAMPLE_SCHEMA_JSON).expect("sample schema must parse")
}

pub fn sample_engine() -> CompletionEngine {
    CompletionEngine::new(sample_schema())
}

/// Splits `text` at the `|` marker into clean text and a cursor offset.
/// Example: "ROUND(|)" places the cursor after the paren.
pub fn at_cursor(text: &str) -> (String, usize) {
    let cursor_offset = text.find('|').expect("text must contain cursor marker '|'");
    (text.replace('|', ""), cursor_offset)
}

/// Creates a CompletionRequest with cursor at the "|" marker position.
pub fn request_at_cursor(text: &str, table: &str, schema: Option<Schema>) -> CompletionRequest {
    let (text, cursor_offset) = at_cursor(text);
    CompletionRequest {
        text,
        cursor_offset,
        current_table: table.to_string(),
        use_extended_format: false,
        schema,
        options: None,
    }
}

/// Labels of the completions at the `|` marker.
pub fn labels_at(engine: &CompletionEngine, text: &str, table: &str) -> Vec<String> {
    let (text, cursor) = at_cursor(text);
    engine
        .get_completions(&text, cursor, table, false)
        .into_candidates()
        .into_iter()
        .map(|candidate| candidate.label)
        .collect()
}
