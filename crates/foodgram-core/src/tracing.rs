use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when `RUST_LOG` is unset or unparsable.
/// sqlx logs every statement at `info`, so it is held back to `warn`.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the JSON stdout subscriber, filtered by `RUST_LOG`.
///
/// Later calls are ignored, so tests and binaries may both call it.
pub fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(env_filter(directives.as_deref()))
        .with(fmt::layer().json().with_current_span(false))
        .try_init();
}
