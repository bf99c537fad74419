//! Console logging.
//!
//! Spans and events from the library (built with its `tracing` feature) and
//! from this binary are written to stderr by a `tracing_subscriber::fmt`
//! layer, keeping stdout free for results. The level is read from `RUST_LOG`
//! and defaults to `info`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}
