//! Console logging for the relay
//!
//! Everything goes to stderr, compact or one JSON object per line. The level
//! comes from `[logging] level`, then `-v`/`--quiet`; `RUST_LOG` replaces the
//! whole filter when set.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingSettings;
use crate::error::{Error, Result};

/// Start logging for `serve`
pub fn init_logging(settings: &LoggingSettings, verbose: u8, quiet: bool) -> Result<()> {
    let level = effective_level(&settings.level, verbose, quiet);

    tracing_subscriber::registry()
        .with(relay_filter(level)?)
        .with(console_layer(settings.json_format))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(level = %level, json = settings.json_format, "Logging initialized");
    Ok(())
}

/// Plain stderr logging for one-shot commands (`config`, `persona`)
pub fn init_simple(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(relay_filter(level)?)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

/// `--quiet` wins over `-v`; with neither, the configured level applies.
fn effective_level(configured: &str, verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::from_str(configured.trim()).unwrap_or(Level::INFO),
        (false, 1) => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Relay and request-span events at `level`, dependencies at warn.
fn relay_filter(level: Level) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = level.as_str().to_lowercase();
    let directives = format!("warn,faith_hub={level},tower_http={level}");
    EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Invalid log directives '{}': {}", directives, e)))
}

fn console_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    if json {
        Box::new(layer.json().with_current_span(false))
    } else {
        Box::new(layer.compact())
    }
}
