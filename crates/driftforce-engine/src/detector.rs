//! Drift detection between two schema snapshots
//!
//! Compares a baseline snapshot against a current one and reports added or
//! removed tables and columns plus changed type strings. Nullability and
//! ordinal position are outside the comparison contract.

use driftforce_core::{Drift, Snapshot, TableInfo};
use std::collections::BTreeSet;

/// Result of comparing two snapshots of the same schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftDetection {
    /// Detected drifts, ordered by table name then column name
    pub drifts: Vec<Drift>,
}

impl DriftDetection {
    /// Compare `baseline` against `current`
    ///
    /// Walks the sorted union of table names; a table present only on one
    /// side is reported as added or removed, a table present on both sides
    /// recurses into column comparison. Type comparison is exact string
    /// equality on the warehouse-reported type name, so `VARCHAR` and
    /// `VARCHAR(16)` count as different types. Inputs are never mutated.
    pub fn detect(baseline: &Snapshot, current: &Snapshot) -> Self {
        let mut drifts = Vec::new();

        let table_names: BTreeSet<&str> = baseline
            .tables
            .keys()
            .chain(current.tables.keys())
            .map(String::as_str)
            .collect();

        for table in table_names {
            match (baseline.tables.get(table), current.tables.get(table)) {
                (None, Some(_)) => drifts.push(Drift::TableAdded {
                    table: table.to_string(),
                }),
                (Some(_), None) => drifts.push(Drift::TableRemoved {
                    table: table.to_string(),
                }),
                (Some(old), Some(new)) => compare_columns(table, old, new, &mut drifts),
                (None, None) => unreachable!("table name came from the union"),
            }
        }

        Self { drifts }
    }

    /// True when no drift was detected
    pub fn is_empty(&self) -> bool {
        self.drifts.is_empty()
    }

    /// Number of detected drifts
    pub fn len(&self) -> usize {
        self.drifts.len()
    }
}

/// Compare the columns of a table present in both snapshots
fn compare_columns(table: &str, baseline: &TableInfo, current: &TableInfo, drifts: &mut Vec<Drift>) {
    let column_names: BTreeSet<&str> = baseline
        .columns
        .iter()
        .chain(current.columns.iter())
        .map(|c| c.name.as_str())
        .collect();

    for column in column_names {
        match (baseline.find_column(column), current.find_column(column)) {
            (None, Some(_)) => drifts.push(Drift::ColumnAdded {
                table: table.to_string(),
                column: column.to_string(),
            }),
            (Some(_), None) => drifts.push(Drift::ColumnRemoved {
                table: table.to_string(),
                column: column.to_string(),
            }),
            (Some(old), Some(new)) => {
                if old.data_type != new.data_type {
                    drifts.push(Drift::TypeChanged {
                        table: table.to_string(),
                        column: column.to_string(),
                        old_type: old.data_type.clone(),
                        new_type: new.data_type.clone(),
                    });
                }
            }
            (None, None) => unreachable!("column name came from the union"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftforce_core::ColumnInfo;
    use pretty_assertions::assert_eq;

    fn snapshot_with(tables: &[(&str, &[(&str, &str)])]) -> Snapshot {
        let mut snap = Snapshot::new("DB", "PUBLIC");
        for (table, columns) in tables {
            for (pos, (name, data_type)) in columns.iter().enumerate() {
                snap.add_column(
                    *table,
                    ColumnInfo::new(*name, *data_type, "YES", pos as u32 + 1),
                );
            }
        }
        snap
    }

    #[test]
    fn identical_snapshots_have_no_drift() {
        let snap = snapshot_with(&[
            ("USERS", &[("ID", "NUMBER(38,0)"), ("EMAIL", "VARCHAR(256)")]),
            ("ORDERS", &[("ID", "NUMBER(38,0)")]),
        ]);

        let detection = DriftDetection::detect(&snap, &snap);
        assert!(detection.is_empty());
        assert_eq!(detection.len(), 0);
    }

    #[test]
    fn removed_table_reported_exactly_once() {
        let baseline = snapshot_with(&[("T1", &[("ID", "INT")])]);
        let current = snapshot_with(&[]);

        let detection = DriftDetection::detect(&baseline, &current);
        assert_eq!(
            detection.drifts,
            vec![Drift::TableRemoved { table: "T1".into() }]
        );
    }

    #[test]
    fn added_table() {
        let baseline = snapshot_with(&[]);
        let current = snapshot_with(&[("EVENTS", &[("ID", "INT")])]);

        let detection = DriftDetection::detect(&baseline, &current);
        assert_eq!(
            detection.drifts,
            vec![Drift::TableAdded {
                table: "EVENTS".into()
            }]
        );
    }

    #[test]
    fn type_change_is_single_entry() {
        let baseline = snapshot_with(&[("USERS", &[("age", "INT")])]);
        let current = snapshot_with(&[("USERS", &[("age", "BIGINT")])]);

        let detection = DriftDetection::detect(&baseline, &current);
        assert_eq!(
            detection.drifts,
            vec![Drift::TypeChanged {
                table: "USERS".into(),
                column: "age".into(),
                old_type: "INT".into(),
                new_type: "BIGINT".into(),
            }]
        );
        assert_eq!(
            detection.drifts[0].to_string(),
            "Type changed: USERS.age (INT → BIGINT)"
        );
    }

    #[test]
    fn column_addition_ignores_unrelated_columns() {
        let baseline = snapshot_with(&[("USERS", &[("ID", "INT"), ("EMAIL", "VARCHAR")])]);
        let current = snapshot_with(&[(
            "USERS",
            &[("ID", "INT"), ("EMAIL", "VARCHAR"), ("CREATED_AT", "TIMESTAMP_NTZ")],
        )]);

        let detection = DriftDetection::detect(&baseline, &current);
        assert_eq!(
            detection.drifts,
            vec![Drift::ColumnAdded {
                table: "USERS".into(),
                column: "CREATED_AT".into(),
            }]
        );
    }

    #[test]
    fn type_comparison_is_exact_string_equality() {
        let baseline = snapshot_with(&[("USERS", &[("NAME", "VARCHAR")])]);
        let current = snapshot_with(&[("USERS", &[("NAME", "VARCHAR(16)")])]);

        let detection = DriftDetection::detect(&baseline, &current);
        assert_eq!(detection.len(), 1);
        assert!(matches!(&detection.drifts[0], Drift::TypeChanged { .. }));
    }

    #[test]
    fn nullable_and_position_changes_are_not_drift() {
        let mut baseline = Snapshot::new("DB", "PUBLIC");
        baseline.add_column("USERS", ColumnInfo::new("ID", "INT", "NO", 1));
        baseline.add_column("USERS", ColumnInfo::new("EMAIL", "VARCHAR", "YES", 2));

        // Same names and types, different nullability and positions.
        let mut current = Snapshot::new("DB", "PUBLIC");
        current.add_column("USERS", ColumnInfo::new("EMAIL", "VARCHAR", "NO", 1));
        current.add_column("USERS", ColumnInfo::new("ID", "INT", "YES", 2));

        let detection = DriftDetection::detect(&baseline, &current);
        assert!(detection.is_empty());
    }

    #[test]
    fn detection_is_symmetric_with_direction_swapped() {
        let a = snapshot_with(&[
            ("USERS", &[("ID", "INT"), ("AGE", "INT")]),
            ("ORDERS", &[("ID", "INT")]),
        ]);
        let b = snapshot_with(&[
            ("USERS", &[("ID", "BIGINT"), ("EMAIL", "VARCHAR")]),
            ("EVENTS", &[("ID", "INT")]),
        ]);

        let forward = DriftDetection::detect(&a, &b);
        let reverse = DriftDetection::detect(&b, &a);

        assert_eq!(forward.len(), reverse.len());

        // Same entities flagged in both directions, with add/remove swapped.
        assert!(forward.drifts.contains(&Drift::TableAdded {
            table: "EVENTS".into()
        }));
        assert!(reverse.drifts.contains(&Drift::TableRemoved {
            table: "EVENTS".into()
        }));
        assert!(forward.drifts.contains(&Drift::TableRemoved {
            table: "ORDERS".into()
        }));
        assert!(reverse.drifts.contains(&Drift::TableAdded {
            table: "ORDERS".into()
        }));
        assert!(forward.drifts.contains(&Drift::ColumnRemoved {
            table: "USERS".into(),
            column: "AGE".into()
        }));
        assert!(reverse.drifts.contains(&Drift::ColumnAdded {
            table: "USERS".into(),
            column: "AGE".into()
        }));
        assert!(forward.drifts.contains(&Drift::TypeChanged {
            table: "USERS".into(),
            column: "ID".into(),
            old_type: "INT".into(),
            new_type: "BIGINT".into(),
        }));
        assert!(reverse.drifts.contains(&Drift::TypeChanged {
            table: "USERS".into(),
            column: "ID".into(),
            old_type: "BIGINT".into(),
            new_type: "INT".into(),
        }));
    }

    #[test]
    fn output_is_ordered_by_table_name() {
        let baseline = snapshot_with(&[]);
        let current = snapshot_with(&[
            ("ZEBRA", &[("ID", "INT")]),
            ("ALPHA", &[("ID", "INT")]),
        ]);

        let detection = DriftDetection::detect(&baseline, &current);
        assert_eq!(
            detection.drifts,
            vec![
                Drift::TableAdded {
                    table: "ALPHA".into()
                },
                Drift::TableAdded {
                    table: "ZEBRA".into()
                },
            ]
        );
    }
}
