//! Subcommand execution.
//!
//! Each subcommand produces a [`Report`]; rendering and exit codes are left
//! to the caller.

use anyhow::{bail, Result};
use formulasense_core::{
    api_schema, CompletionEngine, CompletionList, Context, HoverInfo, Issue, RelationshipChain,
    Schema, TableDescription,
};
use serde::Serialize;

use crate::cli::{Args, Command, CompleteArgs, CursorArgs, FormulaArgs};
use crate::input::{locate_cursor, read_formula, FormulaInput};
use crate::schema::load_optional_schema;

#[derive(Debug, Serialize)]
pub struct CompletionReport {
    pub context: Context,
    pub items: CompletionList,
}

/// One hop of a chain, as resolved from `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HopResolution {
    pub relationship: String,
    pub from: String,
    /// `None` when `from` has no such relationship.
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResolution {
    pub start: String,
    pub chain: Option<RelationshipChain>,
    pub hops: Vec<HopResolution>,
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Completions(CompletionReport),
    Resolution(ChainResolution),
    Diagnostics(Vec<Issue>),
    Hover(Option<HoverInfo>),
    Description(TableDescription),
    SchemaIssues(Vec<Issue>),
    JsonSchema(serde_json::Value),
}

impl Report {
    /// Whether the report should fail the process.
    pub fn has_errors(&self) -> bool {
        match self {
            Report::Diagnostics(issues) | Report::SchemaIssues(issues) => {
                issues.iter().any(Issue::is_error)
            }
            Report::Resolution(resolution) => resolution.target.is_none(),
            _ => false,
        }
    }
}

fn formula_input(args: &FormulaArgs, cursor: Option<usize>) -> Result<FormulaInput> {
    let text = read_formula(args.formula.as_deref())?;
    locate_cursor(&text, cursor)
}

fn complete(engine: &mut CompletionEngine, args: &CompleteArgs) -> Result<Report> {
    let CursorArgs { formula, cursor } = &args.target;
    let input = formula_input(formula, *cursor)?;
    engine.set_options(args.engine_options());

    let context = engine.analyze_context(&input.text, input.cursor);
    let items = engine.get_completions(&input.text, input.cursor, &formula.table, args.extended);
    tracing::debug!(
        kind = ?context.kind,
        prefix = %context.prefix,
        count = items.len(),
        "completed"
    );
    Ok(Report::Completions(CompletionReport { context, items }))
}

/// Resolves `chain_text` hop by hop so the report shows where it breaks.
///
/// `target` is set only when every hop resolves.
pub fn resolve_chain(engine: &CompletionEngine, chain_text: &str, start: &str) -> ChainResolution {
    let chain = engine.parse_relationship_chain(chain_text);
    let mut hops = Vec::new();
    let mut target = None;

    if let Some(chain) = &chain {
        let mut current = Some(start.to_string());
        for hop in &chain.hops {
            let Some(from) = current.take() else {
                break;
            };
            let to = engine
                .find_relationship_in_table(&from, hop)
                .map(|record| record.target_table_name.clone());
            hops.push(HopResolution {
                relationship: hop.clone(),
                from,
                to: to.clone(),
            });
            current = to;
        }
        target = current;
    }

    ChainResolution {
        start: start.to_string(),
        chain,
        hops,
        target,
    }
}

fn describe(schema: &Schema, table: &str) -> Result<Report> {
    match schema.describe_table(table) {
        Some(description) => Ok(Report::Description(description)),
        None => bail!("table `{table}` is not in the schema"),
    }
}

/// Runs the selected subcommand.
pub fn execute(args: &Args) -> Result<Report> {
    let schema = load_optional_schema(args.schema.as_deref())?;
    tracing::debug!(tables = schema.table_names().count(), "schema loaded");

    match &args.command {
        Command::JsonSchema => Ok(Report::JsonSchema(api_schema())),
        Command::ValidateSchema => {
            if args.schema.is_none() {
                bail!("validate-schema needs --schema");
            }
            Ok(Report::SchemaIssues(schema.validate()))
        }
        Command::Describe { table } => describe(&schema, table),
        Command::Resolve { chain, table } => {
            let engine = CompletionEngine::new(schema);
            Ok(Report::Resolution(resolve_chain(&engine, chain, table)))
        }
        Command::Check(formula) => {
            let engine = CompletionEngine::new(schema);
            let text = read_formula(formula.formula.as_deref())?;
            Ok(Report::Diagnostics(engine.diagnostics(&text, &formula.table)))
        }
        Command::Hover(target) => {
            let engine = CompletionEngine::new(schema);
            let input = formula_input(&target.formula, target.cursor)?;
            Ok(Report::Hover(engine.hover(
                &input.text,
                input.cursor,
                &target.formula.table,
            )))
        }
        Command::Complete(complete_args) => {
            let mut engine = CompletionEngine::new(schema);
            complete(&mut engine, complete_args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulasense_core::{RelationshipRecord, TableSchema};

    fn engine() -> CompletionEngine {
        CompletionEngine::new(
            Schema::new()
                .with_table(
                    "customer",
                    TableSchema::default()
                        .direct(vec![RelationshipRecord::new("assigned_rep_id", "rep")]),
                )
                .with_table(
                    "rep",
                    TableSchema::default().direct(vec![RelationshipRecord::new("manager_id", "rep")]),
                ),
        )
    }

    #[test]
    fn test_resolve_chain_all_hops() {
        let resolution = resolve_chain(&engine(), "assigned_rep_id_rel.manager_id_rel.", "customer");
        assert_eq!(resolution.target.as_deref(), Some("rep"));
        assert_eq!(resolution.hops.len(), 2);
        assert_eq!(resolution.hops[1].from, "rep");
    }

    #[test]
    fn test_resolve_chain_stops_at_broken_hop() {
        let resolution = resolve_chain(&engine(), "assigned_rep_id_rel.nope_rel.manager_id_rel.", "customer");
        assert!(resolution.target.is_none());
        assert_eq!(resolution.hops.len(), 2);
        assert_eq!(resolution.hops[1].to, None);
        assert!(Report::Resolution(resolution).has_errors());
    }

    #[test]
    fn test_resolve_chain_target_matches_engine() {
        let engine = engine();
        for text in [
            "assigned_rep_id_rel.",
            "assigned_rep_id_rel.manager_id_rel.manager_id_rel.",
            "manager_id_rel.",
            "assigned_rep_id_rel.assigned_rep_id_rel.",
        ] {
            let resolution = resolve_chain(&engine, text, "customer");
            let chain = resolution.chain.as_ref().unwrap();
            assert_eq!(
                resolution.target,
                engine.resolve_target_table(chain, "customer"),
                "{text}"
            );
        }
    }

    #[test]
    fn test_resolve_without_chain() {
        let resolution = resolve_chain(&engine(), "name", "customer");
        assert!(resolution.chain.is_none());
        assert!(resolution.hops.is_empty());
    }

    #[test]
    fn test_describe_unknown_table() {
        assert!(describe(&Schema::new(), "nope").is_err());
    }
}
