//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Installs the global `fmt` subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `[log].level` when it parses. An unparseable
/// `RUST_LOG` is reported as a warning and the configured level is used
/// instead.
///
/// # Arguments
///
/// - `log` — the `[log]` config table.
///
/// # Returns
///
/// An error if `[log].level` itself is not a valid filter, or if a global
/// subscriber is already installed.
pub fn init(log: &LogConfig) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, warning) = build_filter(env.as_deref(), &log.level)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
    }
    Ok(())
}

/// Pick the filter: `env` if set and valid, otherwise `level`. The second
/// value explains why `env` was skipped, if it was.
fn build_filter(env: Option<&str>, level: &str) -> Result<(EnvFilter, Option<String>)> {
    let mut warning = None;
    if let Some(directives) = env.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return Ok((filter, None)),
            Err(e) => {
                warning = Some(format!(
                    "Ignoring invalid RUST_LOG {:?} ({}); using [log].level {:?}",
                    directives, e, level
                ));
            }
        }
    }

    let filter =
        EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level))?;
    Ok((filter, warning))
}
