//! Subscriber installation for test binaries.
//!
//! Output goes through the libtest capture writer, so it only appears for
//! failing tests or under `--nocapture`.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Selects `human` (default) or `json` output.
pub const LOG_FORMAT_ENV: &str = "LAWTEST_LOG_FORMAT";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors raised while installing the test subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `LAWTEST_LOG_FORMAT` was not valid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `LAWTEST_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied.
        provided: String,
    },
}

/// Output format of the test subscriber.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    Human,
    /// One JSON object per event, including the current span.
    Json,
}

/// Installs a global `tracing` subscriber for the current test binary.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Later calls are
/// no-ops, and a subscriber installed elsewhere is left in place.
///
/// # Errors
/// Returns [`LoggingError`] when `LAWTEST_LOG_FORMAT` is not valid UTF-8 or
/// names an unsupported format.
///
/// # Examples
/// ```
/// lawtest_test_support::logging::init_test_logging()?;
/// tracing::info!("visible under --nocapture");
/// # Ok::<(), lawtest_test_support::logging::LoggingError>(())
/// ```
pub fn init_test_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let format = match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw)?,
        Err(env::VarError::NotPresent) => LogFormat::Human,
        Err(source @ env::VarError::NotUnicode(_)) => {
            return Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            });
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_test_writer();
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.compact().boxed(),
        LogFormat::Json => fmt_layer.json().with_current_span(true).boxed(),
    };

    // Another harness may already own the global slot; keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
    let _ = INSTALLED.set(());
    Ok(())
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}
