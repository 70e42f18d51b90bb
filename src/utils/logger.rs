use crate::utils::error::{PyeError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    /// One JSON object per line, for hosts that collect structured logs.
    Json,
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "pye=debug,info"
    } else {
        "pye=info"
    }
}

/// Installs the global subscriber. Engine calls are logged under the `pye`
/// target, so `RUST_LOG=pye::adapters=trace` shows every stub call.
pub fn init_logger(format: LogFormat, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);
    let layer = match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| PyeError::ConfigError {
            message: format!("Logger already installed: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "pye=info");
        assert!(default_directives(true).starts_with("pye=debug"));
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }

    #[test]
    fn test_second_init_is_an_error() {
        let _ = init_logger(LogFormat::Compact, false);
        let err = init_logger(LogFormat::Json, false).unwrap_err();
        assert!(matches!(err, PyeError::ConfigError { .. }));
    }
}
