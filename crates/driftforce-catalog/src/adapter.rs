//! Warehouse adapter trait and snapshot assembly

use driftforce_core::{ColumnInfo, Snapshot};
use std::fmt;

/// Identifies one schema within a warehouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaScope {
    /// Database name
    pub database: String,

    /// Schema name
    pub schema: String,
}

impl SchemaScope {
    /// Create a new schema scope
    pub fn new(database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
        }
    }

    /// Get fully qualified name
    pub fn fqn(&self) -> String {
        format!("{}.{}", self.database, self.schema)
    }
}

impl fmt::Display for SchemaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fqn())
    }
}

/// One row of the INFORMATION_SCHEMA.COLUMNS query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub table: String,
    pub column: String,
    pub data_type: String,
    pub nullable: String,
    pub position: u32,
}

/// Group ordered metadata rows into a snapshot
///
/// Rows arrive ordered by `(table_name, ordinal_position)`; the first row of
/// a table creates its entry and later rows append, so column order follows
/// ordinal position. An empty row set is a valid empty schema.
pub fn assemble_snapshot(scope: &SchemaScope, rows: Vec<ColumnRow>) -> Snapshot {
    let mut snapshot = Snapshot::new(&scope.database, &scope.schema);
    for row in rows {
        snapshot.add_column(
            row.table,
            ColumnInfo::new(row.column, row.data_type, row.nullable, row.position),
        );
    }
    snapshot
}

/// Errors that can occur when fetching a snapshot
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Connection failed: account '{0}' not found")]
    AccountNotFound(String),

    #[error("Login failed for user '{0}'")]
    BadCredentials(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FetchError {
    /// Operator remediation hint, where one exists for the failure class
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::AccountNotFound(_) => Some(
                "Try a different account format: 'ABC12345' or 'ABC12345.region' or 'ORG-ABC12345'",
            ),
            Self::BadCredentials(_) => Some("Check your username and password"),
            _ => None,
        }
    }
}

/// Trait for warehouse adapters that can capture schema snapshots
#[async_trait::async_trait]
pub trait WarehouseAdapter: Send + Sync {
    /// Get the adapter name (e.g. "Snowflake")
    fn name(&self) -> &'static str;

    /// Capture a snapshot of every table and column in the scoped schema
    ///
    /// Implementations issue one query against the warehouse's
    /// INFORMATION_SCHEMA, ordered by `(table_name, ordinal_position)`, and
    /// release the connection before returning on all paths.
    async fn fetch_snapshot(&self, scope: &SchemaScope) -> Result<Snapshot, FetchError>;

    /// Test the connection to the warehouse
    async fn test_connection(&self) -> Result<(), FetchError>;
}
