//! Browser entry points for FormulaSense.
//!
//! Every function takes a JSON request and returns a JSON string. Nothing
//! throws: malformed requests come back as `{"error": "..."}`.

mod encoding;

pub use encoding::Encoding;

use formulasense_core::{
    completion_items, CompletionEngine, CompletionRequest, Schema, Span,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Once;
use wasm_bindgen::prelude::*;

use encoding::convert_spans_to_utf16;

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        #[cfg(feature = "tracing")]
        tracing_wasm::set_as_global_default();
    });
}

fn error_json(message: impl std::fmt::Display) -> String {
    json!({ "error": message.to_string() }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| error_json("Failed to serialize result"))
}

fn parse_request<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json).map_err(|e| error_json(format!("Invalid request: {e}")))
}

/// Serializes `value`, rewriting spans to UTF-16 when the caller asked for it.
fn respond<T: Serialize>(text: &str, encoding: Encoding, value: &T) -> String {
    let mut value = match serde_json::to_value(value) {
        Ok(value) => value,
        Err(_) => return error_json("Failed to serialize result"),
    };
    if encoding == Encoding::Utf16 {
        convert_spans_to_utf16(text, &mut value);
    }
    value.to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncodedCompletionRequest {
    #[serde(flatten)]
    request: CompletionRequest,
    #[serde(default)]
    encoding: Encoding,
}

/// Position-based request shared by the context, hover and diagnostics calls.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditorRequest {
    text: String,
    #[serde(default)]
    cursor_offset: usize,
    #[serde(default)]
    current_table: String,
    #[serde(default)]
    schema: Option<Schema>,
    #[serde(default)]
    encoding: Encoding,
}

impl EditorRequest {
    fn byte_cursor(&self) -> Result<usize, String> {
        self.encoding
            .to_byte_offset(&self.text, self.cursor_offset)
            .map_err(error_json)
    }

    fn engine(&mut self) -> CompletionEngine {
        CompletionEngine::new(self.schema.take().unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainRequest {
    text: String,
    current_table: String,
    #[serde(default)]
    schema: Option<Schema>,
}

/// Completions for a [`CompletionRequest`]. Returns `{"items": [...]}` in
/// the plain or extended item shape.
#[wasm_bindgen]
pub fn completion_items_json(request_json: &str) -> String {
    init();
    let EncodedCompletionRequest {
        mut request,
        encoding,
    } = match parse_request(request_json) {
        Ok(request) => request,
        Err(error) => return error,
    };

    request.cursor_offset = match encoding.to_byte_offset(&request.text, request.cursor_offset) {
        Ok(offset) => offset,
        Err(e) => return error_json(e),
    };

    let items = completion_items(&request);
    to_json(&json!({ "items": items }))
}

/// The cursor [`Context`](formulasense_core::Context) for `text`.
#[wasm_bindgen]
pub fn analyze_context_json(request_json: &str) -> String {
    init();
    let request: EditorRequest = match parse_request(request_json) {
        Ok(request) => request,
        Err(error) => return error,
    };
    let cursor = match request.byte_cursor() {
        Ok(cursor) => cursor,
        Err(error) => return error,
    };

    let mut context = formulasense_core::analyze_context(&request.text, cursor);
    context.cursor_offset = request
        .encoding
        .from_byte_offset(&request.text, context.cursor_offset);
    respond(&request.text, request.encoding, &context)
}

/// Diagnostics for the whole formula. Returns `{"issues": [...]}`.
#[wasm_bindgen]
pub fn diagnostics_json(request_json: &str) -> String {
    init();
    let mut request: EditorRequest = match parse_request(request_json) {
        Ok(request) => request,
        Err(error) => return error,
    };

    let issues = request
        .engine()
        .diagnostics(&request.text, &request.current_table);
    respond(&request.text, request.encoding, &json!({ "issues": issues }))
}

/// Hover for the identifier at the cursor. Returns `{"hover": ...}`, with
/// `null` when there is nothing to describe.
#[wasm_bindgen]
pub fn hover_json(request_json: &str) -> String {
    init();
    let mut request: EditorRequest = match parse_request(request_json) {
        Ok(request) => request,
        Err(error) => return error,
    };
    let cursor = match request.byte_cursor() {
        Ok(cursor) => cursor,
        Err(error) => return error,
    };

    let hover = request
        .engine()
        .hover(&request.text, cursor, &request.current_table);
    respond(&request.text, request.encoding, &json!({ "hover": hover }))
}

/// Signature help for the call around the cursor. Returns
/// `{"signatureHelp": ...}`.
#[wasm_bindgen]
pub fn signature_help_json(request_json: &str) -> String {
    init();
    let request: EditorRequest = match parse_request(request_json) {
        Ok(request) => request,
        Err(error) => return error,
    };
    let cursor = match request.byte_cursor() {
        Ok(cursor) => cursor,
        Err(error) => return error,
    };

    let help = formulasense_core::signature_help(&request.text, cursor);
    to_json(&json!({ "signatureHelp": help }))
}

/// Parses the chain ending `text` and resolves it from `currentTable`.
/// Returns `{"chain": ..., "targetTable": ...}`; both are `null` when absent.
#[wasm_bindgen]
pub fn resolve_chain_json(request_json: &str) -> String {
    init();
    let request: ChainRequest = match parse_request(request_json) {
        Ok(request) => request,
        Err(error) => return error,
    };

    let engine = CompletionEngine::new(request.schema.unwrap_or_default());
    let chain = engine.parse_relationship_chain(&request.text);
    let target = chain
        .as_ref()
        .and_then(|chain| engine.resolve_target_table(chain, &request.current_table));
    to_json(&json!({ "chain": chain, "targetTable": target }))
}

/// Validates a schema document. Returns `{"issues": [...]}`.
#[wasm_bindgen]
pub fn validate_schema_json(schema_json: &str) -> String {
    init();
    match Schema::from_json(schema_json) {
        Ok(schema) => to_json(&json!({ "issues": schema.validate() })),
        Err(e) => error_json(e),
    }
}

/// JSON Schema for the schema document and completion requests.
#[wasm_bindgen]
pub fn api_schema_json() -> String {
    let schema: Value = formulasense_core::api_schema();
    schema.to_string()
}

/// Get version information
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Byte span to UTF-16 span, for callers holding a core [`Span`].
pub fn span_to_utf16(text: &str, span: Span) -> Span {
    Span::new(
        Encoding::Utf16.from_byte_offset(text, span.start),
        Encoding::Utf16.from_byte_offset(text, span.end),
    )
}
