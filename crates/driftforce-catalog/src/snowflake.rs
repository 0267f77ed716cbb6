//! Snowflake warehouse adapter using INFORMATION_SCHEMA
//!
//! This adapter issues one query against Snowflake's
//! INFORMATION_SCHEMA.COLUMNS view to capture every table and column of a
//! schema. It requires:
//! - USAGE on the database and schema
//! - SELECT on INFORMATION_SCHEMA views
//!
//! ## Usage
//!
//! ```rust,ignore
//! let adapter = SnowflakeAdapter::with_password(
//!     "xy12345.us-east-1",
//!     "username",
//!     "password"
//! )
//! .with_warehouse("COMPUTE_WH")
//! .with_role("SYSADMIN")
//! .build()?;
//! ```
//!
//! Reference: https://docs.snowflake.com/en/sql-reference/info-schema

use crate::adapter::{FetchError, SchemaScope, WarehouseAdapter};
use driftforce_core::Snapshot;

#[cfg(feature = "snowflake")]
use crate::adapter::{assemble_snapshot, ColumnRow};

#[cfg(feature = "snowflake")]
use snowflake_api::SnowflakeApi;

#[cfg(feature = "snowflake")]
use arrow_array::cast::AsArray;

#[cfg(feature = "snowflake")]
use arrow_array::types::Int64Type;

#[cfg(feature = "snowflake")]
use arrow_array::Array;

/// Builder for SnowflakeAdapter
pub struct SnowflakeAdapterBuilder {
    account: String,
    username: String,
    password: String,
    warehouse: Option<String>,
    role: Option<String>,
    database: Option<String>,
}

impl SnowflakeAdapterBuilder {
    /// Set the warehouse to use
    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    /// Set the role to use
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the default database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Build the adapter
    #[cfg(feature = "snowflake")]
    pub fn build(self) -> Result<SnowflakeAdapter, FetchError> {
        let api = SnowflakeApi::with_password_auth(
            &self.account,
            self.warehouse.as_deref(),
            self.database.as_deref(),
            None, // schema
            &self.username,
            self.role.as_deref(),
            &self.password,
        )
        .map_err(|e| classify_connect_error(&e.to_string(), &self.account, &self.username))?;

        Ok(SnowflakeAdapter {
            api,
            account: self.account,
            username: self.username,
        })
    }

    /// Build without snowflake feature
    #[cfg(not(feature = "snowflake"))]
    pub fn build(self) -> Result<SnowflakeAdapter, FetchError> {
        Err(FetchError::ConfigError(
            "Snowflake support not compiled. Rebuild with: cargo build --features snowflake"
                .to_string(),
        ))
    }
}

/// Snowflake warehouse adapter
pub struct SnowflakeAdapter {
    #[cfg(feature = "snowflake")]
    api: SnowflakeApi,

    account: String,
    username: String,
}

impl SnowflakeAdapter {
    /// Builder entry point with password authentication
    pub fn with_password(
        account: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> SnowflakeAdapterBuilder {
        SnowflakeAdapterBuilder {
            account: account.into(),
            username: username.into(),
            password: password.into(),
            warehouse: None,
            role: None,
            database: None,
        }
    }
}

/// Classify a connection/authentication error by message content
///
/// Snowflake reports an unknown account as an HTTP 404 and bad credentials
/// with a fixed message; everything else falls through as a generic
/// authentication failure.
pub fn classify_connect_error(err: &str, account: &str, username: &str) -> FetchError {
    if err.contains("404") {
        FetchError::AccountNotFound(account.to_string())
    } else if err.contains("Incorrect username or password") {
        FetchError::BadCredentials(username.to_string())
    } else {
        FetchError::AuthenticationError(err.to_string())
    }
}

#[async_trait::async_trait]
impl WarehouseAdapter for SnowflakeAdapter {
    fn name(&self) -> &'static str {
        "Snowflake"
    }

    #[cfg(feature = "snowflake")]
    async fn fetch_snapshot(&self, scope: &SchemaScope) -> Result<Snapshot, FetchError> {
        use snowflake_api::QueryResult;

        // One query for every table and column in the schema, ordered so
        // assembly can group by first occurrence.
        let query = format!(
            r#"
            SELECT
                c.TABLE_NAME,
                c.COLUMN_NAME,
                c.DATA_TYPE,
                c.IS_NULLABLE,
                c.ORDINAL_POSITION
            FROM {}.INFORMATION_SCHEMA.COLUMNS c
            WHERE c.TABLE_SCHEMA = '{}'
            ORDER BY c.TABLE_NAME, c.ORDINAL_POSITION
            "#,
            scope.database, scope.schema
        );

        let result = self.api.exec(&query).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("404") || err_str.contains("Incorrect username or password") {
                classify_connect_error(&err_str, &self.account, &self.username)
            } else {
                FetchError::QueryError(err_str)
            }
        })?;

        let mut rows = Vec::new();

        match result {
            QueryResult::Arrow(batches) => {
                for batch in batches {
                    let num_rows = batch.num_rows();
                    let schema = batch.schema();

                    let table_idx = schema.index_of("TABLE_NAME").map_err(|_| {
                        FetchError::InvalidResponse("Missing TABLE_NAME column".to_string())
                    })?;
                    let col_name_idx = schema.index_of("COLUMN_NAME").map_err(|_| {
                        FetchError::InvalidResponse("Missing COLUMN_NAME column".to_string())
                    })?;
                    let data_type_idx = schema.index_of("DATA_TYPE").map_err(|_| {
                        FetchError::InvalidResponse("Missing DATA_TYPE column".to_string())
                    })?;
                    let is_nullable_idx = schema.index_of("IS_NULLABLE").map_err(|_| {
                        FetchError::InvalidResponse("Missing IS_NULLABLE column".to_string())
                    })?;
                    let position_idx = schema.index_of("ORDINAL_POSITION").map_err(|_| {
                        FetchError::InvalidResponse("Missing ORDINAL_POSITION column".to_string())
                    })?;

                    let table_array = batch.column(table_idx).as_string::<i32>();
                    let col_name_array = batch.column(col_name_idx).as_string::<i32>();
                    let data_type_array = batch.column(data_type_idx).as_string::<i32>();
                    let is_nullable_array = batch.column(is_nullable_idx).as_string::<i32>();
                    let position_array = batch
                        .column(position_idx)
                        .as_primitive_opt::<Int64Type>()
                        .ok_or_else(|| {
                            FetchError::InvalidResponse(
                                "ORDINAL_POSITION is not numeric".to_string(),
                            )
                        })?;

                    for row_idx in 0..num_rows {
                        let position = if position_array.is_null(row_idx) {
                            0
                        } else {
                            position_array.value(row_idx) as u32
                        };

                        rows.push(ColumnRow {
                            table: table_array.value(row_idx).to_string(),
                            column: col_name_array.value(row_idx).to_string(),
                            // DATA_TYPE is kept verbatim - drift detection
                            // compares the raw string.
                            data_type: data_type_array.value(row_idx).to_string(),
                            nullable: is_nullable_array.value(row_idx).to_string(),
                            position,
                        });
                    }
                }
            }
            QueryResult::Json(_) => {
                return Err(FetchError::InvalidResponse(
                    "Unexpected JSON result format".to_string(),
                ));
            }
            // A schema with no tables is a valid empty snapshot.
            QueryResult::Empty => {}
        }

        Ok(assemble_snapshot(scope, rows))
    }

    #[cfg(not(feature = "snowflake"))]
    async fn fetch_snapshot(&self, _scope: &SchemaScope) -> Result<Snapshot, FetchError> {
        Err(FetchError::ConfigError(
            "Snowflake support not compiled. Rebuild with: cargo build --features snowflake"
                .to_string(),
        ))
    }

    #[cfg(feature = "snowflake")]
    async fn test_connection(&self) -> Result<(), FetchError> {
        self.api
            .exec("SELECT 1")
            .await
            .map_err(|e| classify_connect_error(&e.to_string(), &self.account, &self.username))?;
        Ok(())
    }

    #[cfg(not(feature = "snowflake"))]
    async fn test_connection(&self) -> Result<(), FetchError> {
        Err(FetchError::ConfigError(
            "Snowflake support not compiled. Rebuild with: cargo build --features snowflake"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_account_not_found() {
        let err = classify_connect_error("HTTP status 404 Not Found", "ABC12345", "john");
        assert!(matches!(err, FetchError::AccountNotFound(a) if a == "ABC12345"));
    }

    #[test]
    fn classify_bad_credentials() {
        let err = classify_connect_error(
            "Incorrect username or password was specified.",
            "ABC12345",
            "john",
        );
        assert!(matches!(err, FetchError::BadCredentials(u) if u == "john"));
    }

    #[test]
    fn classify_generic_error() {
        let err = classify_connect_error("connection reset by peer", "ABC12345", "john");
        assert!(matches!(err, FetchError::AuthenticationError(_)));
    }

    #[cfg(not(feature = "snowflake"))]
    #[test]
    fn build_without_feature_is_config_error() {
        let result = SnowflakeAdapter::with_password("account", "user", "pass")
            .with_warehouse("COMPUTE_WH")
            .with_role("SYSADMIN")
            .build();
        assert!(matches!(result, Err(FetchError::ConfigError(_))));
    }
}
