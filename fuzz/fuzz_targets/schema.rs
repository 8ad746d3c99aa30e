#![no_main]

use formulasense_core::{CompletionEngine, Schema};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(schema) = Schema::from_json(json) else {
        return;
    };

    let _ = schema.validate();
    let tables: Vec<String> = schema.table_names().map(str::to_string).collect();
    let engine = CompletionEngine::new(schema);
    for table in &tables {
        let _ = engine.schema().describe_table(table);
        let _ = engine.get_completions("", 0, table, false);
    }
});
