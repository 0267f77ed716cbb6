//! Mock warehouse adapter for testing
//!
//! Returns predefined snapshots without connecting to any warehouse. Useful
//! for unit testing drift detection against the adapter trait and for
//! simulating error conditions without real credentials.

use crate::adapter::{FetchError, SchemaScope, WarehouseAdapter};
use driftforce_core::Snapshot;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock warehouse adapter holding canned snapshots in memory
pub struct MockAdapter {
    /// Predefined snapshots by scope FQN
    snapshots: Arc<RwLock<HashMap<String, Snapshot>>>,

    /// Error messages to return for specific scopes
    errors: Arc<RwLock<HashMap<String, String>>>,

    /// Simulate connection failure
    fail_connection: bool,
}

impl MockAdapter {
    /// Create an empty mock adapter
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            fail_connection: false,
        }
    }

    /// Make `test_connection` and every fetch fail
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }

    /// Register a snapshot for a scope
    pub async fn add_snapshot(&self, scope: SchemaScope, snapshot: Snapshot) {
        self.snapshots.write().await.insert(scope.fqn(), snapshot);
    }

    /// Register a query error for a scope
    pub async fn add_error(&self, scope: SchemaScope, message: impl Into<String>) {
        self.errors.write().await.insert(scope.fqn(), message.into());
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WarehouseAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn fetch_snapshot(&self, scope: &SchemaScope) -> Result<Snapshot, FetchError> {
        if self.fail_connection {
            return Err(FetchError::AuthenticationError(
                "mock connection failure".to_string(),
            ));
        }

        if let Some(message) = self.errors.read().await.get(&scope.fqn()) {
            return Err(FetchError::QueryError(message.clone()));
        }

        self.snapshots
            .read()
            .await
            .get(&scope.fqn())
            .cloned()
            .ok_or_else(|| FetchError::QueryError(format!("no snapshot for {}", scope)))
    }

    async fn test_connection(&self) -> Result<(), FetchError> {
        if self.fail_connection {
            return Err(FetchError::AuthenticationError(
                "mock connection failure".to_string(),
            ));
        }
        Ok(())
    }
}
