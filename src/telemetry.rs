//! Telemetry helpers for hosts embedding `extrema-chart`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host unless it opts into one of the helpers below.

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to `info`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback_filter("info")
}

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// `fallback_directives` (for example `"extrema_chart=trace"` to see every
/// hit-test while debugging pointer handling).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_tracing_with_fallback_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directives));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
