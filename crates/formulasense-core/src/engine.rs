//! The completion engine facade.

#[cfg(feature = "tracing")]
use tracing::debug_span;

use crate::completion::{
    analyze_context, assemble_completions, CompletionFormat, CompletionList,
};
use crate::types::{
    CompletionRequest, Context, EngineOptions, HoverInfo, Issue, RelationshipChain,
    RelationshipRecord, Schema, SignatureHelp,
};
use crate::{completion, diagnostics, hover};

/// One engine per editor session.
///
/// Owns its schema; callers swap it with [`CompletionEngine::update_schema`].
/// Every call reads the schema afresh, so nothing resolved in one call is
/// reused in the next.
#[derive(Debug, Clone, Default)]
pub struct CompletionEngine {
    schema: Schema,
    options: EngineOptions,
}

impl CompletionEngine {
    pub fn new(schema: Schema) -> Self {
        Self::with_options(schema, EngineOptions::default())
    }

    pub fn with_options(schema: Schema, options: EngineOptions) -> Self {
        Self { schema, options }
    }

    /// Replaces the schema wholesale.
    pub fn update_schema(&mut self, schema: Schema) {
        self.schema = schema;
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// Ranked completions at `cursor_offset`.
    ///
    /// Never fails; the worst case is an empty list. `use_extended_format`
    /// only changes how the list serializes.
    pub fn get_completions(
        &self,
        text: &str,
        cursor_offset: usize,
        current_table: &str,
        use_extended_format: bool,
    ) -> CompletionList {
        #[cfg(feature = "tracing")]
        let _span = debug_span!("get_completions", cursor_offset, current_table).entered();

        let context = analyze_context(text, cursor_offset);
        let candidates = assemble_completions(&self.schema, &context, current_table, &self.options);
        CompletionList::new(
            CompletionFormat::from_extended_flag(use_extended_format),
            candidates,
        )
    }

    pub fn analyze_context(&self, text: &str, cursor_offset: usize) -> Context {
        analyze_context(text, cursor_offset)
    }

    pub fn parse_relationship_chain(&self, text: &str) -> Option<RelationshipChain> {
        completion::parse_relationship_chain(text)
    }

    pub fn resolve_target_table(
        &self,
        chain: &RelationshipChain,
        starting_table: &str,
    ) -> Option<String> {
        completion::resolve_target_table(&self.schema, chain, starting_table)
    }

    pub fn find_relationship_in_table(
        &self,
        table_name: &str,
        relationship_name: &str,
    ) -> Option<&RelationshipRecord> {
        self.schema
            .find_relationship_in_table(table_name, relationship_name)
    }

    pub fn diagnostics(&self, text: &str, current_table: &str) -> Vec<Issue> {
        diagnostics::diagnostics(&self.schema, text, current_table)
    }

    pub fn hover(&self, text: &str, offset: usize, current_table: &str) -> Option<HoverInfo> {
        hover::hover(&self.schema, text, offset, current_table)
    }

    pub fn signature_help(&self, text: &str, offset: usize) -> Option<SignatureHelp> {
        hover::signature_help(text, offset)
    }
}

/// Completes a self-contained request.
///
/// A request without a schema completes against an empty one (functions,
/// keywords, literals and operators only).
#[must_use]
pub fn completion_items(request: &CompletionRequest) -> CompletionList {
    let engine = CompletionEngine::with_options(
        request.schema.clone().unwrap_or_default(),
        request.options.clone().unwrap_or_default(),
    );
    engine.get_completions(
        &request.text,
        request.cursor_offset,
        &request.current_table,
        request.use_extended_format,
    )
}
