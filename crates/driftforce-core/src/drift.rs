//! Drift entries
//!
//! A `Drift` is one detected difference between two snapshots of the same
//! schema. Only table/column existence and the raw type string are compared;
//! nullability and ordinal position changes are deliberately not reported.

use serde::{Deserialize, Serialize};

/// One detected schema difference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drift {
    /// Table present only in the current snapshot
    TableAdded { table: String },

    /// Table present only in the baseline snapshot
    TableRemoved { table: String },

    /// Column present only in the current snapshot
    ColumnAdded { table: String, column: String },

    /// Column present only in the baseline snapshot
    ColumnRemoved { table: String, column: String },

    /// Column present in both with a different reported type string
    TypeChanged {
        table: String,
        column: String,
        old_type: String,
        new_type: String,
    },
}

impl Drift {
    /// Table the drift belongs to
    pub fn table(&self) -> &str {
        match self {
            Self::TableAdded { table }
            | Self::TableRemoved { table }
            | Self::ColumnAdded { table, .. }
            | Self::ColumnRemoved { table, .. }
            | Self::TypeChanged { table, .. } => table,
        }
    }
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TableAdded { table } => write!(f, "Table added: {}", table),
            Self::TableRemoved { table } => write!(f, "Table removed: {}", table),
            Self::ColumnAdded { table, column } => {
                write!(f, "Column added: {}.{}", table, column)
            }
            Self::ColumnRemoved { table, column } => {
                write!(f, "Column removed: {}.{}", table, column)
            }
            Self::TypeChanged {
                table,
                column,
                old_type,
                new_type,
            } => write!(
                f,
                "Type changed: {}.{} ({} → {})",
                table, column, old_type, new_type
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_formats() {
        assert_eq!(
            Drift::TableAdded {
                table: "USERS".into()
            }
            .to_string(),
            "Table added: USERS"
        );
        assert_eq!(
            Drift::TableRemoved {
                table: "T1".into()
            }
            .to_string(),
            "Table removed: T1"
        );
        assert_eq!(
            Drift::ColumnRemoved {
                table: "USERS".into(),
                column: "AGE".into()
            }
            .to_string(),
            "Column removed: USERS.AGE"
        );
        assert_eq!(
            Drift::TypeChanged {
                table: "USERS".into(),
                column: "age".into(),
                old_type: "INT".into(),
                new_type: "BIGINT".into(),
            }
            .to_string(),
            "Type changed: USERS.age (INT → BIGINT)"
        );
    }

    #[test]
    fn table_accessor() {
        let drift = Drift::ColumnAdded {
            table: "ORDERS".into(),
            column: "TOTAL".into(),
        };
        assert_eq!(drift.table(), "ORDERS");
    }

    #[test]
    fn serialization_is_tagged() {
        let drift = Drift::TypeChanged {
            table: "USERS".into(),
            column: "AGE".into(),
            old_type: "INT".into(),
            new_type: "BIGINT".into(),
        };
        let json = serde_json::to_string(&drift).unwrap();
        assert!(json.contains("\"kind\":\"type_changed\""));
        assert!(json.contains("\"old_type\":\"INT\""));
    }
}
