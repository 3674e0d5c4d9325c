//! Errors raised while configuring the command line tool.

use thiserror::Error;

/// Failures that prevent the tool from starting.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
