//! # Telemetry
//!
//! Global `tracing` subscriber setup.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "ship_rates=info,tower_http=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// One JSON object per event, with the enclosing span's fields.
fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(true)
        .with_writer(writer)
}

/// Installs the global subscriber.
///
/// `json` selects one JSON object per line for log shippers; otherwise
/// output is compact and human-readable. Calling this twice is a no-op.
pub fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = if json {
        registry.with(json_layer(std::io::stdout)).try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).compact())
            .try_init()
    };

    if let Err(error) = result {
        tracing::debug!(%error, "tracing subscriber already installed");
    }
}
