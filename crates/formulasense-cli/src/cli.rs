//! CLI argument parsing using clap.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use formulasense_core::EngineOptions;
use std::path::PathBuf;

/// FormulaSense - schema-aware formula completions
#[derive(Parser, Debug)]
#[command(name = "formulasense")]
#[command(about = "Complete, resolve and check formulas against a table schema", long_about = None)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Schema JSON file (tables keyed by name, with columns and relationships)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub schema: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum, global = true)]
    pub format: OutputFormat,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long, global = true)]
    pub compact: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Log engine decisions to stderr (overrides RUST_LOG's default level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Completions at the cursor
    Complete(CompleteArgs),

    /// Resolve a `<name>_rel.` chain hop by hop
    Resolve {
        /// Chain text, e.g. `assigned_rep_id_rel.manager_id_rel.`
        chain: String,

        /// Table the chain starts from
        #[arg(short, long)]
        table: String,
    },

    /// Report diagnostics for a formula (exit code 1 on errors)
    Check(FormulaArgs),

    /// Describe the identifier at the cursor
    Hover(CursorArgs),

    /// List a table's columns and relationships
    Describe {
        /// Table name
        table: String,
    },

    /// Report problems in the schema file (exit code 1 on errors)
    ValidateSchema,

    /// Print the JSON Schema of the schema file and of completion requests
    JsonSchema,
}

#[derive(ClapArgs, Debug)]
pub struct FormulaArgs {
    /// Formula text (reads from stdin if omitted)
    #[arg(value_name = "FORMULA")]
    pub formula: Option<String>,

    /// Table the formula is evaluated against
    #[arg(short, long)]
    pub table: String,
}

#[derive(ClapArgs, Debug)]
pub struct CursorArgs {
    #[command(flatten)]
    pub formula: FormulaArgs,

    /// Byte offset of the cursor. Without it, a single `|` in the formula
    /// marks the cursor, or the cursor sits at the end.
    #[arg(long, value_name = "OFFSET")]
    pub cursor: Option<usize>,
}

#[derive(ClapArgs, Debug)]
pub struct CompleteArgs {
    #[command(flatten)]
    pub target: CursorArgs,

    /// Emit the rich editor-widget item shape instead of the plain one
    #[arg(long)]
    pub extended: bool,

    /// Maximum number of candidates
    #[arg(long, value_name = "N")]
    pub max_items: Option<usize>,

    /// Only accept starts-with matches
    #[arg(long)]
    pub no_substring: bool,

    /// Leave operators out of the candidate list
    #[arg(long)]
    pub no_operators: bool,
}

impl CompleteArgs {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            allow_substring_match: !self.no_substring,
            max_items: self.max_items,
            include_operators: !self.no_operators,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
}
