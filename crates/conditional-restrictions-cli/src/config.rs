//! Tool configuration read from the environment and command line.
//!
//! The log level can be set with `CONDRES_LOG_LEVEL`; the `--log-level` flag
//! takes precedence.

use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable holding the default log level.
pub(crate) const LOG_LEVEL_ENV: &str = "CONDRES_LOG_LEVEL";

/// How much of the parser's work `condres` reports on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogLevel {
    /// Every clause the parser reads.
    Trace,
    /// Summaries of each parsed value.
    Debug,
    /// One line per command with the clause count.
    Info,
    /// Warnings only. Keeps stderr quiet for normal use.
    #[default]
    Warn,
    /// Nothing beyond the diagnostics for rejected values.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "warning" {
            return Ok(Self::Warn);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| {
                CliError::InvalidConfig(format!(
                    "unknown log level '{s}' in {LOG_LEVEL_ENV} or --log-level"
                ))
            })
    }
}

impl LogLevel {
    const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// The `EnvFilter` directive selecting this level.
    #[must_use]
    pub(crate) const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for a single invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CliConfig {
    /// Log level for diagnostics written to stderr.
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if `CONDRES_LOG_LEVEL` holds an
    /// unknown level.
    pub(crate) fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = match lookup(LOG_LEVEL_ENV) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        Ok(Self { log_level })
    }

    /// Apply command line overrides on top of environment defaults.
    #[must_use]
    pub(crate) fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("Error", LogLevel::Error)]
    #[case(" info ", LogLevel::Info)]
    fn log_level_parses_valid_values(#[case] raw: &str, #[case] expected: LogLevel) {
        assert_eq!(raw.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let Err(err) = "loud".parse::<LogLevel>() else {
            panic!("unknown level should fail");
        };
        assert!(err.to_string().contains("unknown log level 'loud'"));
    }

    #[test]
    fn missing_environment_uses_defaults() {
        let config = CliConfig::from_lookup(|_| None)
            .unwrap_or_else(|err| panic!("defaults should load: {err}"));
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn environment_sets_log_level() {
        let config = CliConfig::from_lookup(|key| (key == LOG_LEVEL_ENV).then(|| "debug".into()))
            .unwrap_or_else(|err| panic!("config should load: {err}"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn command_line_overrides_environment() {
        let config = CliConfig {
            log_level: LogLevel::Debug,
        };
        assert_eq!(
            config.apply_overrides(Some(LogLevel::Error)).log_level,
            LogLevel::Error
        );
        assert_eq!(config.apply_overrides(None).log_level, LogLevel::Debug);
    }
}
