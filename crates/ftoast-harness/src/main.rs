#![forbid(unsafe_code)]

//! FrankenToast scenario runner.
//!
//! Plays scripted toast scenarios against the simulated host and prints a
//! JSON report per scenario.
//!
//! # Running
//!
//! ```sh
//! cargo run -p ftoast-harness
//! FTOAST_HARNESS_SCENARIO=swipe cargo run -p ftoast-harness
//! ```
//!
//! # Environment
//!
//! - `FTOAST_HARNESS_SCENARIO`: `hello`, `stack`, `swipe`, `race` or `all` (default)
//! - `FTOAST_HARNESS_STEP_MS`: frame length in milliseconds (default 16)
//! - `FTOAST_HARNESS_LOG_JSON`: emit logs as JSON lines
//! - `FTOAST_HARNESS_REPORT`: write the reports to this path instead of stdout
//! - `RUST_LOG`: log filter (default `info`)

use std::io;
use std::time::Duration;

use ftoast_harness::scenario::{self, SCENARIOS};
use ftoast_harness::{DEFAULT_STEP, SimulationReport};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct ScenarioReport {
    scenario: String,
    step_ms: u64,
    report: SimulationReport,
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let enabled = matches!(
        trimmed,
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON"
    );
    Some(enabled)
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn init_logging() {
    if env_flag("FTOAST_HARNESS_LOG_JSON").unwrap_or(false) {
        ftoast_core::logging::init_json_subscriber("info");
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> io::Result<()> {
    init_logging();

    let step = env_u64("FTOAST_HARNESS_STEP_MS")
        .filter(|&ms| ms > 0)
        .map_or(DEFAULT_STEP, Duration::from_millis);
    let requested = env_string("FTOAST_HARNESS_SCENARIO").unwrap_or_else(|| "all".into());
    let names: Vec<&str> = if requested == "all" {
        SCENARIOS.to_vec()
    } else {
        vec![requested.as_str()]
    };

    let mut reports = Vec::with_capacity(names.len());
    for name in names {
        let Some(result) = scenario::run(name, step) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "unknown scenario {name:?}; expected one of {} or \"all\"",
                    SCENARIOS.join(", ")
                ),
            ));
        };
        let report = result.map_err(io::Error::other)?;
        tracing::info!(
            scenario = name,
            shown = report.shown,
            completed = report.completed,
            sim_ms = report.now_ms,
            "scenario finished"
        );
        reports.push(ScenarioReport {
            scenario: name.to_string(),
            step_ms: step.as_millis() as u64,
            report,
        });
    }

    let json = serde_json::to_string_pretty(&reports).map_err(io::Error::other)?;
    match env_string("FTOAST_HARNESS_REPORT") {
        Some(path) => std::fs::write(&path, json.as_bytes())?,
        None => println!("{json}"),
    }

    if reports.iter().any(|r| r.report.live_count != 0) {
        std::process::exit(2);
    }
    Ok(())
}
