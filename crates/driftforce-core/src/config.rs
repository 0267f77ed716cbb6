//! Connection configuration from environment variables
//!
//! All Snowflake settings come from `SNOWFLAKE_*` environment variables,
//! read once at startup into an explicit `Config` value that is passed to
//! the components that need it.

/// Required credential variables
const REQUIRED_VARS: [&str; 3] = ["SNOWFLAKE_USER", "SNOWFLAKE_PASSWORD", "SNOWFLAKE_ACCOUNT"];

/// Default virtual warehouse when `SNOWFLAKE_WAREHOUSE` is unset
pub const DEFAULT_WAREHOUSE: &str = "COMPUTE_WH";

/// Default role when `SNOWFLAKE_ROLE` is unset
pub const DEFAULT_ROLE: &str = "SYSADMIN";

/// Snowflake connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Login name (`SNOWFLAKE_USER`)
    pub user: String,

    /// Password (`SNOWFLAKE_PASSWORD`)
    pub password: String,

    /// Account identifier, e.g. "ABC12345.us-east-1" (`SNOWFLAKE_ACCOUNT`)
    pub account: String,

    /// Virtual warehouse (`SNOWFLAKE_WAREHOUSE`, default `COMPUTE_WH`)
    pub warehouse: String,

    /// Role (`SNOWFLAKE_ROLE`, default `SYSADMIN`)
    pub role: String,
}

impl Config {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an injected variable lookup
    ///
    /// The seam exists so tests can supply variables without touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| lookup(name).map_or(true, |v| v.is_empty()))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        Ok(Self {
            user: lookup("SNOWFLAKE_USER").unwrap_or_default(),
            password: lookup("SNOWFLAKE_PASSWORD").unwrap_or_default(),
            account: lookup("SNOWFLAKE_ACCOUNT").unwrap_or_default(),
            warehouse: lookup("SNOWFLAKE_WAREHOUSE")
                .unwrap_or_else(|| DEFAULT_WAREHOUSE.to_string()),
            role: lookup("SNOWFLAKE_ROLE").unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        })
    }

    /// Operator-facing setup instructions printed when credentials are missing
    pub fn setup_help() -> String {
        [
            "Setup required (30 seconds):",
            "",
            "1. Look at your Snowflake URL: https://[ACCOUNT].snowflakecomputing.com",
            "2. Set these environment variables:",
            "",
            "   export SNOWFLAKE_USER='your_username'",
            "   export SNOWFLAKE_PASSWORD='your_password'",
            "   export SNOWFLAKE_ACCOUNT='ABC12345.us-east-1'  # From URL",
            "",
            "Optional:",
            "   export SNOWFLAKE_WAREHOUSE='COMPUTE_WH'",
            "   export SNOWFLAKE_ROLE='SYSADMIN'",
        ]
        .join("\n")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),
}
