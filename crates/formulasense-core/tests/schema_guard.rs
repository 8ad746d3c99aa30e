use formulasense_core::api_schema;
use serde_json::Value;

fn definition<'a>(root: &'a Value, name: &str) -> &'a Value {
    &root["definitions"][name]
}

#[test]
fn schema_document_is_a_map_of_tables() {
    let generated = api_schema();
    let schema = &generated["Schema"];

    assert_eq!(schema["type"], "object");
    assert_eq!(
        schema["additionalProperties"]["$ref"],
        "#/definitions/TableSchema"
    );

    let table = definition(schema, "TableSchema");
    for key in [
        "columns",
        "directRelationships",
        "relationships",
        "reverseRelationships",
    ] {
        assert!(
            table["properties"].get(key).is_some(),
            "TableSchema is missing `{key}`"
        );
    }

    let relationship = definition(schema, "RelationshipRecord");
    let required: Vec<&str> = relationship["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(required.contains(&"relationshipName"));
    assert!(required.contains(&"targetTableName"));
    assert!(!required.contains(&"joinColumn"));
}

#[test]
fn completion_request_uses_camel_case() {
    let generated = api_schema();
    let request = &generated["CompletionRequest"];
    for key in [
        "text",
        "cursorOffset",
        "currentTable",
        "useExtendedFormat",
        "schema",
        "options",
    ] {
        assert!(
            request["properties"].get(key).is_some(),
            "CompletionRequest is missing `{key}`"
        );
    }
}

#[test]
#[ignore]
fn print_api_schema() {
    println!(
        "{}",
        serde_json::to_string_pretty(&api_schema()).expect("serialize schema")
    );
}
