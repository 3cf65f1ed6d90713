use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{LogFormat, LoggingConfig};

/// Filter directive for the `-v` count: info, debug, trace.
fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// `RUST_LOG` wins, then `-v`, then `logging.level`.
fn resolve_filter(rust_log: Option<&str>, verbose: u8, cfg: &LoggingConfig) -> EnvFilter {
    let from_env = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok());

    from_env
        .or_else(|| verbosity_directive(verbose).map(EnvFilter::new))
        .or_else(|| EnvFilter::try_new(&cfg.level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(rust_log.as_deref(), verbose, cfg);

    let registry = tracing_subscriber::registry().with(filter);
    let result = match cfg.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Global subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_owned(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn rust_log_takes_precedence() {
        let filter = resolve_filter(Some("warn"), 3, &cfg("debug"));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn verbosity_beats_config() {
        assert_eq!(resolve_filter(None, 1, &cfg("warn")).to_string(), "info");
        assert_eq!(resolve_filter(None, 2, &cfg("warn")).to_string(), "debug");
        assert_eq!(resolve_filter(None, 7, &cfg("warn")).to_string(), "trace");
    }

    #[test]
    fn config_level_is_the_fallback() {
        assert_eq!(resolve_filter(None, 0, &cfg("warn")).to_string(), "warn");
        assert_eq!(resolve_filter(Some("  "), 0, &cfg("error")).to_string(), "error");
    }
}
