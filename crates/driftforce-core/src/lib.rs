//! DriftForce Core
//!
//! Core domain model: schema snapshots, drift entries, and the
//! environment-derived connection configuration.
//! The snapshot file format is stable - changing field names breaks
//! previously saved snapshots.

pub mod config;
pub mod drift;
pub mod snapshot;

pub use config::{Config, ConfigError};
pub use drift::Drift;
pub use snapshot::{ColumnInfo, Snapshot, SnapshotError, TableInfo};
