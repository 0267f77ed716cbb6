//! Slack webhook notifier
//!
//! Delivery is best-effort: the caller receives the result and decides to
//! discard it. A failed alert must never change the comparison outcome.

use driftforce_core::Drift;
use serde_json::json;

/// How many drift entries the alert lists before truncating
pub const MAX_LISTED: usize = 10;

/// Post a drift summary to a Slack incoming webhook
///
/// Sends one HTTP POST with the drift count and the first [`MAX_LISTED`]
/// entries. An empty drift list is a no-op.
pub async fn send_drift_alert(webhook_url: &str, drifts: &[Drift]) -> Result<(), reqwest::Error> {
    if drifts.is_empty() {
        return Ok(());
    }

    let lines: Vec<String> = drifts.iter().take(MAX_LISTED).map(Drift::to_string).collect();
    let message = json!({
        "text": format!("Schema Drift Alert: {} changes detected", drifts.len()),
        "attachments": [{
            "color": "warning",
            "fields": [{
                "title": "Changes",
                "value": lines.join("\n"),
            }],
        }],
    });

    let client = reqwest::Client::new();
    client
        .post(webhook_url)
        .json(&message)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
