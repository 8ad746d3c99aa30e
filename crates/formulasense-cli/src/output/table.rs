//! Human-readable table output formatting.

use formulasense_core::{HoverInfo, Issue, Severity, TableDescription};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::commands::{ChainResolution, CompletionReport, Report};

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Insert")]
    insert: String,
}

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Type")]
    data_type: String,
}

#[derive(Tabled)]
struct RelationshipRow {
    #[tabled(rename = "Relationship")]
    token: String,
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Join column")]
    join_column: String,
}

/// Format a report as human-readable text with optional colors.
pub fn format_table(report: &Report, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    match report {
        Report::Completions(completions) => write_completions(&mut out, completions, colored),
        Report::Resolution(resolution) => write_resolution(&mut out, resolution, colored),
        Report::Diagnostics(issues) => write_issues(&mut out, "Diagnostics", issues, colored),
        Report::SchemaIssues(issues) => write_issues(&mut out, "Schema", issues, colored),
        Report::Hover(hover) => write_hover(&mut out, hover.as_ref()),
        Report::Description(description) => write_description(&mut out, description, colored),
        Report::JsonSchema(schema) => {
            writeln!(out, "{schema:#}").unwrap();
        }
    }

    out
}

fn write_heading(out: &mut String, heading: &str, colored: bool) {
    if colored {
        writeln!(out, "{}", heading.bold()).unwrap();
    } else {
        writeln!(out, "{heading}").unwrap();
    }
}

fn write_completions(out: &mut String, report: &CompletionReport, colored: bool) {
    let context = &report.context;
    let stats = format!(
        "Context: {:?} | prefix {:?} | {} candidates",
        context.kind,
        context.prefix,
        report.items.len()
    );
    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }

    if let Some(chain) = &context.relationship_chain {
        writeln!(out, "Chain: {}", chain.hops.join(" → ")).unwrap();
    }
    writeln!(out).unwrap();

    if report.items.is_empty() {
        writeln!(out, "No suggestions").unwrap();
        return;
    }

    let rows = report.items.candidates().iter().map(|candidate| CandidateRow {
        label: candidate.label.clone(),
        kind: candidate.kind.as_str(),
        detail: candidate.detail.clone(),
        insert: candidate.insert_text.clone(),
    });
    writeln!(out, "{}", Table::new(rows).with(Style::rounded())).unwrap();
}

fn write_resolution(out: &mut String, resolution: &ChainResolution, colored: bool) {
    if resolution.chain.is_none() {
        writeln!(out, "No relationship chain found").unwrap();
        return;
    }

    for hop in &resolution.hops {
        let target = match &hop.to {
            Some(to) if colored => to.green().to_string(),
            Some(to) => to.clone(),
            None if colored => "unresolved".red().to_string(),
            None => "unresolved".to_string(),
        };
        writeln!(out, "  {}.{}_rel → {}", hop.from, hop.relationship, target).unwrap();
    }

    match &resolution.target {
        Some(target) => writeln!(out, "Target: {target}").unwrap(),
        None => writeln!(out, "Target: none").unwrap(),
    }
}

fn write_issues(out: &mut String, title: &str, issues: &[Issue], colored: bool) {
    if issues.is_empty() {
        let ok = format!("{title}: no issues");
        if colored {
            writeln!(out, "{}", ok.green()).unwrap();
        } else {
            writeln!(out, "{ok}").unwrap();
        }
        return;
    }

    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    let warnings = issues
        .iter()
        .filter(|issue| issue.severity == Severity::Warning)
        .count();
    write_heading(
        out,
        &format!("{title} ({errors} errors, {warnings} warnings):"),
        colored,
    );

    for issue in issues {
        let severity_str = match issue.severity {
            Severity::Error if colored => "ERROR".red().to_string(),
            Severity::Error => "ERROR".to_string(),
            Severity::Warning if colored => "WARN".yellow().to_string(),
            Severity::Warning => "WARN".to_string(),
            Severity::Info if colored => "INFO".blue().to_string(),
            Severity::Info => "INFO".to_string(),
        };

        let location = issue
            .span
            .as_ref()
            .map(|s| format!(" offset {}:", s.start))
            .or_else(|| issue.table.as_ref().map(|t| format!(" table {t}:")))
            .unwrap_or_default();

        writeln!(
            out,
            "  [{}] {}{} {}",
            severity_str, issue.code, location, issue.message
        )
        .unwrap();
    }
}

fn write_hover(out: &mut String, hover: Option<&HoverInfo>) {
    match hover {
        Some(hover) => writeln!(out, "{}", hover.contents).unwrap(),
        None => writeln!(out, "Nothing to describe at the cursor").unwrap(),
    }
}

fn write_description(out: &mut String, description: &TableDescription, colored: bool) {
    write_heading(out, &format!("Table {}", description.name), colored);

    let columns = description.columns.iter().map(|column| ColumnRow {
        name: column.name.clone(),
        data_type: column.data_type.clone().unwrap_or_default(),
    });
    writeln!(out, "{}", Table::new(columns).with(Style::rounded())).unwrap();

    if !description.outgoing.is_empty() {
        writeln!(out).unwrap();
        write_heading(out, "Outgoing:", colored);
        let rows = description.outgoing.iter().map(|record| RelationshipRow {
            token: format!("{}_rel", record.relationship_name),
            table: record.target_table_name.clone(),
            join_column: record.join_column.clone().unwrap_or_default(),
        });
        writeln!(out, "{}", Table::new(rows).with(Style::rounded())).unwrap();
    }

    if !description.incoming.is_empty() {
        writeln!(out).unwrap();
        write_heading(out, "Incoming:", colored);
        let rows = description.incoming.iter().map(|record| RelationshipRow {
            token: format!("{}_rel", record.relationship_name),
            table: record.source_table_name.clone(),
            join_column: record.join_column.clone().unwrap_or_default(),
        });
        writeln!(out, "{}", Table::new(rows).with(Style::rounded())).unwrap();
    }
}
