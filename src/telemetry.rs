//! Telemetry helpers for hosts embedding `scrolly-rs`.
//!
//! Every step transition, settle decision and resize fan-out is reported via
//! `tracing`. Setup stays explicit and opt-in: hosts either call
//! `init_default_tracing` or install their own subscriber and filters
//! (for example `RUST_LOG=scrolly_rs=debug` to see step enter/exit).

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when the feature is disabled or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
