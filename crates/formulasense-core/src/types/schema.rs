//! Schema input types.
//!
//! The schema document is a JSON object keyed by table name. Each table lists
//! its columns and its outgoing relationships. Relationships arrive in one of
//! two shapes depending on which producer generated the document:
//! `directRelationships` (current) or `relationships` (legacy). Both carry
//! the same records; see [`TableSchema::outgoing_relationships`] for how the
//! two are reconciled.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tables, columns and relationships available to formulas.
///
/// Table names are case-sensitive keys. Lookups try the exact name first and
/// then fall back to a case-insensitive match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Schema {
    pub tables: BTreeMap<String, TableSchema>,
}

/// A single table in the [`Schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// Columns in declaration order. The order is preserved in completions.
    #[serde(default)]
    pub columns: Vec<ColumnSchema>,

    /// Outgoing relationships (current shape).
    ///
    /// `None` means the key was absent, which is different from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_relationships: Option<Vec<RelationshipRecord>>,

    /// Outgoing relationships (legacy shape). Only consulted when
    /// `directRelationships` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<RelationshipRecord>>,

    /// Incoming relationships declared by the producer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_relationships: Option<Vec<ReverseRelationshipRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

/// An outgoing, foreign-key style navigation from one table to another.
///
/// `relationship_name` is the base name; formulas spell it with a `_rel`
/// suffix (`assigned_rep_id` is written `assigned_rep_id_rel.`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    pub relationship_name: String,
    pub target_table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_column: Option<String>,
}

/// An incoming relationship: `source_table_name` points at the owning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReverseRelationshipRecord {
    pub relationship_name: String,
    pub source_table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_column: Option<String>,
}

/// Columns and relationships of one table, as reported by
/// [`Schema::describe_table`](crate::Schema::describe_table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    pub outgoing: Vec<RelationshipRecord>,
    pub incoming: Vec<ReverseRelationshipRecord>,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type.into()),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
        }
    }
}

impl RelationshipRecord {
    pub fn new(relationship_name: impl Into<String>, target_table_name: impl Into<String>) -> Self {
        Self {
            relationship_name: relationship_name.into(),
            target_table_name: target_table_name.into(),
            join_column: None,
        }
    }

    pub fn with_join_column(mut self, column: impl Into<String>) -> Self {
        self.join_column = Some(column.into());
        self
    }
}

impl TableSchema {
    pub fn with_columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = ColumnSchema>,
    {
        Self {
            columns: columns.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the current-shape relationship list.
    pub fn direct(mut self, relationships: Vec<RelationshipRecord>) -> Self {
        self.direct_relationships = Some(relationships);
        self
    }

    /// Sets the legacy-shape relationship list.
    pub fn legacy(mut self, relationships: Vec<RelationshipRecord>) -> Self {
        self.relationships = Some(relationships);
        self
    }

    pub fn reverse(mut self, relationships: Vec<ReverseRelationshipRecord>) -> Self {
        self.reverse_relationships = Some(relationships);
        self
    }

    /// Returns the outgoing relationships of this table.
    ///
    /// `directRelationships` wins whenever the key is present, even when it is
    /// an empty list: an empty list means "no outgoing relationships" and does
    /// not fall through to the legacy key. Only when `directRelationships` is
    /// absent is `relationships` consulted. `None` means neither key exists.
    ///
    /// Every relationship lookup in the crate goes through this method.
    pub fn outgoing_relationships(&self) -> Option<&[RelationshipRecord]> {
        match (&self.direct_relationships, &self.relationships) {
            (Some(direct), _) => Some(direct.as_slice()),
            (None, Some(legacy)) => Some(legacy.as_slice()),
            (None, None) => None,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .find(|column| column.name.eq_ignore_ascii_case(name))
            })
    }
}
