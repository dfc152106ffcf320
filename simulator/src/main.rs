//! Stake pool simulator
//!
//! Replays a TOML scenario against a registry of pools, one task per pool,
//! checks the ledger invariants after every action and prints a JSON report.

mod config;
mod report;
mod schedule;
mod sim;

use anyhow::{Context, Result};
use config::Scenario;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(path) = init_target() {
        return Scenario::write_default(&path);
    }

    log::info!("Starting stake pool simulator");

    let scenario = Scenario::load().unwrap_or_else(|e| {
        log::warn!("Failed to load scenario ({:#}), using default scenario", e);
        Scenario::default_scenario()
    });
    log::info!(
        "Scenario: {} pools, {} actions",
        scenario.pools.len(),
        scenario.actions.len()
    );

    let report = sim::run(scenario).await?;
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);

    if !report.invariants_ok() {
        anyhow::bail!("Invariant violations detected");
    }
    log::info!("All invariants held");
    Ok(())
}

/// `stakepool-sim init [path]` writes a starter scenario instead of running
fn init_target() -> Option<String> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("init") => Some(args.next().unwrap_or_else(|| config::DEFAULT_PATH.to_string())),
        _ => None,
    }
}
