//! Tracing subscriber initialization.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with a human-readable fmt layer.
///
/// The subscriber respects the RUST_LOG environment variable.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    Ok(())
}
