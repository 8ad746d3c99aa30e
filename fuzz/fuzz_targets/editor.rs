#![no_main]

use formulasense_core::{
    ColumnSchema, CompletionEngine, RelationshipRecord, Schema, TableSchema,
};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static ENGINE: LazyLock<CompletionEngine> = LazyLock::new(|| {
    CompletionEngine::new(
        Schema::new()
            .with_table(
                "customer",
                TableSchema::with_columns([
                    ColumnSchema::new("id", "integer"),
                    ColumnSchema::new("first_name", "text"),
                ])
                .direct(vec![RelationshipRecord::new("assigned_rep_id", "rep")]),
            )
            .with_table(
                "rep",
                TableSchema::with_columns([ColumnSchema::new("name", "text")])
                    .legacy(vec![RelationshipRecord::new("manager_id", "rep")]),
            ),
    )
});

// First byte picks the cursor, the rest is the formula.
fuzz_target!(|data: &[u8]| {
    let Some((&seed, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let cursor = usize::from(seed) * text.len() / 255;
    let engine = &*ENGINE;

    let _ = engine.get_completions(text, cursor, "customer", seed % 2 == 0);
    let _ = engine.diagnostics(text, "customer");
    let _ = engine.hover(text, cursor, "customer");
    let _ = engine.signature_help(text, cursor);
    if let Some(chain) = engine.parse_relationship_chain(text) {
        let _ = engine.resolve_target_table(&chain, "customer");
    }
});
