use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

use driftforce_catalog::{FetchError, SchemaScope, SnowflakeAdapter, WarehouseAdapter};
use driftforce_core::{Config, Snapshot};
use driftforce_engine::DriftDetection;

mod notify;

/// DriftForce - Snowflake schema drift detection
#[derive(Parser)]
#[command(name = "driftforce")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a point-in-time snapshot of a schema
    Snapshot {
        /// Database name
        #[arg(long)]
        database: String,

        /// Schema name
        #[arg(long)]
        schema: String,

        /// Save the snapshot to a JSON file instead of printing it
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Compare two snapshots and report drift
    Compare {
        /// Database name
        #[arg(long)]
        database: String,

        /// Schema name
        #[arg(long)]
        schema: String,

        /// Baseline snapshot file (requires --current)
        #[arg(long, requires = "current")]
        baseline: Option<PathBuf>,

        /// Current snapshot file (requires --baseline)
        #[arg(long, requires = "baseline")]
        current: Option<PathBuf>,

        /// Slack webhook URL for drift alerts
        #[arg(long)]
        webhook: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            database,
            schema,
            save,
        } => snapshot_command(&database, &schema, save.as_deref()).await,
        Commands::Compare {
            database,
            schema,
            baseline,
            current,
            webhook,
        } => compare_command(&database, &schema, baseline, current, webhook).await,
    }
}

/// Read connection settings, or exit with setup guidance
fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            eprintln!();
            eprintln!("{}", Config::setup_help());
            std::process::exit(1);
        }
    }
}

/// Build the Snowflake adapter, or exit with a classified hint
fn build_adapter(config: &Config, database: &str) -> Box<dyn WarehouseAdapter> {
    let result = SnowflakeAdapter::with_password(&config.account, &config.user, &config.password)
        .with_warehouse(&config.warehouse)
        .with_role(&config.role)
        .with_database(database)
        .build();

    match result {
        Ok(adapter) => Box::new(adapter),
        Err(e) => exit_connection_error(e),
    }
}

/// Connection and authentication failures are fatal, never retried
fn exit_connection_error(err: FetchError) -> ! {
    eprintln!("{} {}", "✗".red(), err);
    if let Some(hint) = err.remediation() {
        eprintln!("  {}", hint.yellow());
    }
    std::process::exit(1);
}

/// Capture one snapshot with progress messages
async fn capture(adapter: &dyn WarehouseAdapter, scope: &SchemaScope) -> Snapshot {
    eprintln!("{} {}...", "Scanning".cyan(), scope);
    match adapter.fetch_snapshot(scope).await {
        Ok(snapshot) => {
            eprintln!(
                "{} Found {} tables",
                "✓".green(),
                snapshot.table_count()
            );
            snapshot
        }
        Err(e) => exit_connection_error(e),
    }
}

/// Snapshot command - capture and print or save
async fn snapshot_command(database: &str, schema: &str, save: Option<&Path>) -> Result<()> {
    let config = load_config();
    let adapter = build_adapter(&config, database);
    let scope = SchemaScope::new(database, schema);

    let snapshot = capture(adapter.as_ref(), &scope).await;

    match save {
        Some(path) => {
            snapshot
                .save_to_file(path)
                .with_context(|| format!("Failed to save snapshot to {}", path.display()))?;
            println!("{} Saved to {}", "✓".green(), path.display());
        }
        None => println!("{}", snapshot.to_json()?),
    }

    Ok(())
}

/// Compare command - file-based or live two-phase comparison
async fn compare_command(
    database: &str,
    schema: &str,
    baseline: Option<PathBuf>,
    current: Option<PathBuf>,
    webhook: Option<String>,
) -> Result<()> {
    let (baseline, current) = match (baseline, current) {
        (Some(baseline_path), Some(current_path)) => {
            let baseline = Snapshot::from_file(&baseline_path).with_context(|| {
                format!("Failed to load baseline from {}", baseline_path.display())
            })?;
            let current = Snapshot::from_file(&current_path).with_context(|| {
                format!("Failed to load current from {}", current_path.display())
            })?;
            (baseline, current)
        }
        // Live mode: two captures with an operator pause in between.
        _ => {
            let config = load_config();
            let adapter = build_adapter(&config, database);
            let scope = SchemaScope::new(database, schema);

            eprintln!("{}", "Taking baseline snapshot...".cyan());
            let baseline = capture(adapter.as_ref(), &scope).await;

            wait_for_operator()?;

            eprintln!("{}", "Taking current snapshot...".cyan());
            let current = capture(adapter.as_ref(), &scope).await;
            (baseline, current)
        }
    };

    let detection = DriftDetection::detect(&baseline, &current);

    if detection.is_empty() {
        println!("{}", "✓ No drifts detected".green().bold());
        return Ok(());
    }

    println!();
    println!(
        "{}",
        format!("Found {} drift(s):", detection.len()).red().bold()
    );
    println!();
    for drift in &detection.drifts {
        println!("  {}", drift);
    }

    if let Some(url) = webhook {
        // Best-effort delivery: a failed alert never changes the exit status.
        match notify::send_drift_alert(&url, &detection.drifts).await {
            Ok(()) => println!("{} Slack alert sent", "✓".green()),
            Err(_) => {}
        }
    }

    Ok(())
}

/// Block until the operator confirms the second capture
fn wait_for_operator() -> Result<()> {
    print!("Make schema changes in Snowflake, then press Enter...");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
