//! Tracing setup for the terminal front-end.

use anyhow::Result;
use snake_core::LogFormat;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Logs go to stderr so they never mix with
/// the field drawn on stdout.
pub fn init_telemetry(format: LogFormat) -> Result<()> {
    let (pretty, json) = match format {
        LogFormat::Pretty => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,snake_term=debug,snake_sim=debug".into()),
        )
        .with(pretty)
        .with(json)
        .try_init()?;

    info!(?format, "Telemetry initialized");
    Ok(())
}
