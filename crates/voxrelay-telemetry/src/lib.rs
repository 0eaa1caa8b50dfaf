//! Logging for voxrelay
//!
//! Installs a `tracing-subscriber` fmt layer behind an env filter. `RUST_LOG`,
//! when set, takes precedence over the configured filter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use voxrelay_config::{LogFormat, TelemetryConfig};

/// Initialize the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json().flatten_event(true)).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Pick the effective filter, falling back to `info` on a bad directive
fn build_filter(env_override: Option<&str>, configured: &str) -> EnvFilter {
    let directive = env_override.filter(|s| !s.trim().is_empty()).unwrap_or(configured);

    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directive}': {e}, using 'info'");
        EnvFilter::new("info")
    })
}
