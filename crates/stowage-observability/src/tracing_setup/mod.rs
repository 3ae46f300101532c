//! Tracing setup: stdout output plus JSON lines into the log buffer.

pub mod events;
pub mod spans;

use stowage_core::config::defaults::DEFAULT_LOG_LEVEL;
use stowage_core::config::ObservabilityConfig;
use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::LogBuffer;

/// Initialize the global subscriber.
///
/// `config.log_level` is an `EnvFilter` directive; an unparseable directive
/// falls back to `info`. When `buffer` is given, every event is also
/// appended to it as one JSON line for the shipper to drain.
pub fn init_tracing(
    config: &ObservabilityConfig,
    buffer: Option<LogBuffer>,
) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let stdout_layer = if config.json_stdout {
        fmt::layer().with_target(true).json().boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(buffer.map(buffer_layer))
        .try_init()
}

/// JSON lines into `buffer`, minus the shipper's own events.
pub fn buffer_layer<S>(buffer: LogBuffer) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(buffer)
        .with_filter(filter_fn(|meta| meta.target() != events::SHIPPER_TARGET))
}
