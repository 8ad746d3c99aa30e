//! FormulaSense CLI - schema-aware formula completions

use formulasense_cli::cli;
use formulasense_cli::commands;
use formulasense_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Args, OutputFormat};
use output::{format_json, format_table};

/// Formula or schema errors found, or a chain that does not resolve.
const EXIT_FAILURE: u8 = 1;
/// Configuration error (unreadable schema, bad cursor, unknown table).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("formulasense: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("formulasense_core=warn,formulasense_cli=warn"));
    if verbose {
        for directive in ["formulasense_core=debug", "formulasense_cli=debug"] {
            filter = filter.add_directive(directive.parse().expect("valid log directive"));
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<bool> {
    let report = commands::execute(args)?;

    let output_str = match args.format {
        OutputFormat::Json => format_json(&report, args.compact)?,
        OutputFormat::Table => format_table(&report, args.output.is_none()),
    };

    write_output(&args.output, &output_str)?;
    Ok(report.has_errors())
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
