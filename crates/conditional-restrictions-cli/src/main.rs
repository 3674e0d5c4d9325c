//! Command line diagnostics for conditional restriction tag values.
//!
//! `condres parse`, `condres tags` and `condres format` print parse results
//! on stdout and caret-marked diagnostics on stderr.

use std::process::ExitCode;

mod cli;
mod config;
mod error;
mod logging;
mod output;

fn main() -> eyre::Result<ExitCode> {
    cli::run()
}
