//! Point-in-time schema snapshots
//!
//! A snapshot records every table and column of one database schema as
//! reported by the warehouse. Snapshots are plain owned data: once captured
//! they are never mutated, only compared or serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A single column as reported by the warehouse
///
/// Values are kept verbatim - the type name is not normalized and
/// nullability stays the `"YES"`/`"NO"` string from INFORMATION_SCHEMA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name, unique within its table
    pub name: String,

    /// Warehouse-reported data type name (e.g. "VARCHAR", "NUMBER")
    #[serde(rename = "type")]
    pub data_type: String,

    /// Nullability flag as reported ("YES" or "NO")
    pub nullable: String,

    /// 1-based ordinal position within the table
    pub position: u32,
}

impl ColumnInfo {
    /// Create a new column record
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        nullable: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: nullable.into(),
            position,
        }
    }
}

/// Columns of one table, ordered by ordinal position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TableInfo {
    /// Ordered column list
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Create a table record from columns
    pub fn from_columns(columns: Vec<ColumnInfo>) -> Self {
        Self { columns }
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A captured point-in-time record of a schema's tables and columns
///
/// Tables are keyed by name in a `BTreeMap` so iteration order is
/// deterministic and the JSON form is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Database identifier
    pub database: String,

    /// Schema identifier
    pub schema: String,

    /// Tables keyed by table name
    pub tables: BTreeMap<String, TableInfo>,

    /// Capture time (ISO 8601 in the file format)
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Create an empty snapshot stamped with the current time
    pub fn new(database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            tables: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Append a column to a table, creating the table entry on first sight
    ///
    /// Callers feed rows in `(table_name, ordinal_position)` order, so the
    /// per-table column list stays in ordinal order.
    pub fn add_column(&mut self, table: impl Into<String>, column: ColumnInfo) {
        self.tables
            .entry(table.into())
            .or_default()
            .columns
            .push(column);
    }

    /// Number of tables in the snapshot
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json().map_err(SnapshotError::Serialize)?;
        std::fs::write(path, json).map_err(SnapshotError::Io)?;
        Ok(())
    }

    /// Load from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path).map_err(SnapshotError::Io)?;
        serde_json::from_str(&contents).map_err(SnapshotError::Parse)
    }
}

/// Snapshot persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Invalid snapshot file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}
