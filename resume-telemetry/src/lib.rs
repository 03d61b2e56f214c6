//! # resume-telemetry
//!
//! Logging setup for binaries built on `resume-rag`, plus an in-memory event
//! capture layer for asserting on log output in tests.
//!
//! Filtering follows `RUST_LOG`; when it is unset the default directive is
//! `info`.
//!
//! ```rust,ignore
//! resume_telemetry::init_telemetry("resume-match")?;
//! tracing::info!("ready");
//! ```

pub mod capture;

use std::sync::Arc;

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

pub use capture::{CapturedEvent, EventCaptureLayer, SharedEventStorage};

const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a human-readable global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_telemetry(service_name: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry().with(env_filter()).with(fmt::layer().with_target(true)).try_init()?;
    tracing::debug!(service.name = service_name, "telemetry initialized");
    Ok(())
}

/// Install a global subscriber that writes one JSON object per event.
pub fn init_json_telemetry(service_name: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_current_span(true))
        .try_init()?;
    tracing::debug!(service.name = service_name, "telemetry initialized");
    Ok(())
}

/// Install a human-readable global subscriber that also records every
/// event into `storage`.
pub fn init_with_capture(
    service_name: &str,
    storage: Arc<SharedEventStorage>,
) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(EventCaptureLayer::new(storage))
        .try_init()?;
    tracing::debug!(service.name = service_name, "telemetry initialized");
    Ok(())
}
