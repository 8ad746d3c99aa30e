//! Schema lookups and validation.
//!
//! [`Schema`] is a read-only view once loaded. Callers replace it wholesale
//! (see [`crate::CompletionEngine::update_schema`]); nothing here patches a
//! loaded schema in place.
//!
//! # Table Resolution
//!
//! Table keys are case-sensitive. [`Schema::table`] tries the exact key first
//! and then falls back to a case-insensitive match, so relationship targets
//! written with different casing than the table key still resolve.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SchemaError;
use crate::types::{
    issue_codes, ColumnSchema, Issue, RelationshipRecord, ReverseRelationshipRecord, Schema,
    TableDescription, TableSchema,
};

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex pattern"))
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema document.
    ///
    /// Rejects documents with empty table or column names. Everything else
    /// that parses is accepted; run [`Schema::validate`] for warnings.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(json)?;

        for (name, table) in &schema.tables {
            if name.trim().is_empty() {
                return Err(SchemaError::InvalidTableName);
            }
            if table.columns.iter().any(|column| column.name.trim().is_empty()) {
                return Err(SchemaError::InvalidColumnName {
                    table: name.clone(),
                });
            }
        }

        Ok(schema)
    }

    /// Adds (or replaces) a table. Intended for building schemas in code.
    pub fn with_table(mut self, name: impl Into<String>, table: TableSchema) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Looks up a table, returning its canonical key alongside it.
    pub fn table_entry(&self, name: &str) -> Option<(&str, &TableSchema)> {
        if let Some((key, table)) = self.tables.get_key_value(name) {
            return Some((key.as_str(), table));
        }
        self.tables
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, table)| (key.as_str(), table))
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.table_entry(name).map(|(_, table)| table)
    }

    /// Columns of `table`, or an empty slice when the table is unknown.
    pub fn columns_of(&self, table: &str) -> &[ColumnSchema] {
        self.table(table)
            .map(|table| table.columns.as_slice())
            .unwrap_or_default()
    }

    /// Outgoing relationships of `table`.
    ///
    /// `None` when the table is unknown or declares neither relationship key;
    /// `Some(&[])` when it declares an empty list. See
    /// [`TableSchema::outgoing_relationships`] for the key precedence.
    pub fn relationships_of(&self, table: &str) -> Option<&[RelationshipRecord]> {
        self.table(table)?.outgoing_relationships()
    }

    /// Finds the outgoing relationship named `relationship_name` (without the
    /// `_rel` suffix) on `table_name`. Matching is case-insensitive.
    pub fn find_relationship_in_table(
        &self,
        table_name: &str,
        relationship_name: &str,
    ) -> Option<&RelationshipRecord> {
        self.relationships_of(table_name)?
            .iter()
            .find(|record| record.relationship_name.eq_ignore_ascii_case(relationship_name))
    }

    /// Incoming relationships of `table`.
    ///
    /// Uses the producer's `reverseRelationships` when declared; otherwise
    /// derives them from every table's outgoing relationships.
    pub fn incoming_relationships(&self, table: &str) -> Vec<ReverseRelationshipRecord> {
        let Some((canonical, entry)) = self.table_entry(table) else {
            return Vec::new();
        };

        if let Some(declared) = &entry.reverse_relationships {
            return declared.clone();
        }

        let mut incoming = Vec::new();
        for (source, source_table) in &self.tables {
            for record in source_table.outgoing_relationships().unwrap_or_default() {
                if record.target_table_name.eq_ignore_ascii_case(canonical) {
                    incoming.push(ReverseRelationshipRecord {
                        relationship_name: record.relationship_name.clone(),
                        source_table_name: source.clone(),
                        join_column: record.join_column.clone(),
                    });
                }
            }
        }
        incoming
    }

    pub fn describe_table(&self, name: &str) -> Option<TableDescription> {
        let (canonical, table) = self.table_entry(name)?;
        Some(TableDescription {
            name: canonical.to_string(),
            columns: table.columns.clone(),
            outgoing: table.outgoing_relationships().unwrap_or_default().to_vec(),
            incoming: self.incoming_relationships(canonical),
        })
    }

    /// Reports problems that leave the schema usable but likely wrong.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (name, table) in &self.tables {
            if !identifier_regex().is_match(name) {
                issues.push(
                    Issue::warning(
                        issue_codes::NON_IDENTIFIER_NAME,
                        format!("Table name `{name}` cannot be written in a formula"),
                    )
                    .with_table(name),
                );
            }

            if table.direct_relationships.is_some() && table.relationships.is_some() {
                issues.push(
                    Issue::info(
                        issue_codes::MIXED_RELATIONSHIP_SHAPES,
                        format!(
                            "Table `{name}` declares both `directRelationships` and `relationships`; \
                             `relationships` is ignored"
                        ),
                    )
                    .with_table(name),
                );
            }

            let mut seen = HashSet::new();
            for column in &table.columns {
                if !seen.insert(column.name.to_ascii_lowercase()) {
                    issues.push(
                        Issue::warning(
                            issue_codes::DUPLICATE_COLUMN,
                            format!("Column `{}` is declared more than once", column.name),
                        )
                        .with_table(name),
                    );
                }
                if !identifier_regex().is_match(&column.name) {
                    issues.push(
                        Issue::warning(
                            issue_codes::NON_IDENTIFIER_NAME,
                            format!("Column name `{}` cannot be written in a formula", column.name),
                        )
                        .with_table(name),
                    );
                }
            }

            for record in table.outgoing_relationships().unwrap_or_default() {
                if self.table(&record.target_table_name).is_none() {
                    issues.push(
                        Issue::error(
                            issue_codes::DANGLING_RELATIONSHIP_TARGET,
                            format!(
                                "Relationship `{}` targets unknown table `{}`",
                                record.relationship_name, record.target_table_name
                            ),
                        )
                        .with_table(name),
                    );
                }
            }
        }

        issues
    }
}
