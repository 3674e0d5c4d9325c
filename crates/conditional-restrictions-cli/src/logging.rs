//! Structured logging for the command line tool.
//!
//! Logs go to stderr so stdout only carries parse output.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global subscriber for `config`.
///
/// Records emitted through the `log` facade by the parser library are
/// forwarded to the same subscriber. A subscriber installed earlier wins.
pub(crate) fn init_logging(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn init_logging_is_idempotent() {
        let config = CliConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn filter_uses_config_log_level() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Trace));
        assert_eq!(filter_from_config(&config).to_string(), "trace");
    }
}
