//! Telemetry initialization (structured console logging).
//!
//! Sets up a tracing-subscriber registry with an `EnvFilter` (defaulting to `info`)
//! and a fmt layer. Log verbosity is controlled via `RUST_LOG`, e.g.:
//!
//! ```bash
//! RUST_LOG=stockroom=debug,sqlx=warn stockroom
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with console output.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
