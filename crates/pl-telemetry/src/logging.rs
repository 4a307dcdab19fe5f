//! Subscriber setup.
//!
//! Logs always go to stderr. Stdout belongs to the invoker protocol (query
//! payloads, the JSON-lines reply stream), so nothing else may write there.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Build the level filter. `RUST_LOG` syntax is accepted in `log_level`.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {e}", config.log_level)))
}

/// Install the global subscriber.
pub(crate) fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(config.ansi);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    }

    Ok(())
}

/// Structured log entry with the service field attached.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $service:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            service = $service,
            $($($field)*,)?
            $msg
        )
    };
}

/// Transaction-scoped log entry with standard fields.
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $service:expr, $msg:expr, $tx_id:expr, $function:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            service = $service,
            tx_id = %$tx_id,
            function = %$function,
            $($($field)*,)?
            $msg
        )
    };
}
