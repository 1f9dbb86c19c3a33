use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::{LogFormat, LoggingConfig};

/// The more verbose of the configured level and the `-v` count.
///
/// A configured directive that is not a plain level is used as is.
fn level_directive(cfg: &LoggingConfig, verbose: u8) -> String {
    let requested = match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    match cfg.level.parse::<LevelFilter>() {
        Ok(configured) => configured.max(requested).to_string().to_lowercase(),
        Err(_) => cfg.level.clone(),
    }
}

/// Install the global subscriber. Output goes to stderr; stdout carries the table.
///
/// `RUST_LOG` overrides both the config and `-v`.
///
/// # Errors
/// Returns an error on an invalid directive or if a subscriber is already installed.
pub fn init(cfg: &LoggingConfig, verbose: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level_directive(cfg, verbose))
            .map_err(|e| anyhow!("invalid log level '{}': {e}", cfg.level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
