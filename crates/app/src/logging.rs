//! Tracing setup for the command-line front end

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Fallback filter when the requested one does not parse.
const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber filtered by `filter`.
///
/// Stdout carries the resolved template, so logs never go there.
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .ok();
}
