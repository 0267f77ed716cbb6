//! Warehouse catalog adapters for schema snapshots
//!
//! This crate fetches whole-schema snapshots from a data warehouse using its
//! INFORMATION_SCHEMA views.
//!
//! ## Features
//!
//! - `snowflake` - Snowflake support via the `snowflake-api` SDK
//!
//! Without the feature the Snowflake adapter builds but returns a
//! configuration error, so file-based comparison still works offline.
//!
//! ## Example
//!
//! ```rust,ignore
//! use driftforce_catalog::{SnowflakeAdapter, WarehouseAdapter, SchemaScope};
//!
//! let adapter = SnowflakeAdapter::with_password("xy12345.us-east-1", "user", "pass")
//!     .with_warehouse("COMPUTE_WH")
//!     .with_role("SYSADMIN")
//!     .build()?;
//! let scope = SchemaScope::new("ANALYTICS", "PUBLIC");
//! let snapshot = adapter.fetch_snapshot(&scope).await?;
//! ```

pub mod adapter;
pub mod mock;
pub mod snowflake;

pub use adapter::{assemble_snapshot, ColumnRow, FetchError, SchemaScope, WarehouseAdapter};
pub use mock::MockAdapter;
pub use snowflake::{SnowflakeAdapter, SnowflakeAdapterBuilder};
