//! Command dispatch for the `condres` entrypoint.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use conditional_restrictions::{
    ParseError, ParseResult, conditional_key, parse_clauses, parse_conditional_restrictions,
};
use eyre::{Context, Result};
use tracing::{debug, info};

use crate::config::{CliConfig, LogLevel};
use crate::error::CliError;
use crate::logging::init_logging;
use crate::output::{write_clause_tree, write_diagnostic, write_json};

/// Inspect conditional restriction tag values.
#[derive(Parser)]
#[command(name = "condres", author, version, about)]
pub(crate) struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Parse a conditional value and print its clauses.
    Parse(ParseArgs),
    /// Parse a base key and its conditional variant from a JSON tag map.
    Tags(TagsArgs),
    /// Print the canonical form of a conditional value.
    Format(FormatArgs),
}

#[derive(Args)]
pub(crate) struct ParseArgs {
    /// The conditional value, e.g. "no @ (wet AND low_tide)".
    value: String,
    /// Emit JSON instead of an indented tree.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct TagsArgs {
    /// Base key such as `access` or `maxstay`.
    base_key: String,
    /// JSON object of tags to read instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct FormatArgs {
    /// The conditional value to normalise.
    value: String,
}

/// Parse arguments, configure logging, and run the selected command.
///
/// # Errors
///
/// Returns an error when configuration is invalid or input and output fail.
/// Malformed conditional values are reported on stderr and yield a failing
/// exit code instead.
pub(crate) fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(&config);
    debug!(?config, "configured condres");

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let outcome = match cli.command {
        Commands::Parse(args) => handle_parse(&args, &mut stdout, &mut stderr)?,
        Commands::Tags(args) => handle_tags(&args, &mut stdout, &mut stderr)?,
        Commands::Format(args) => handle_format(&args, &mut stdout, &mut stderr)?,
    };
    Ok(outcome.into())
}

/// Whether the input was a well-formed conditional value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Parsed,
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Parsed => Self::SUCCESS,
            Outcome::Rejected => Self::FAILURE,
        }
    }
}

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    Ok(CliConfig::from_env()?.apply_overrides(cli.log_level))
}

fn handle_parse(args: &ParseArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<Outcome> {
    let clauses = match parse_clauses(Some(&args.value)) {
        Ok(clauses) => clauses,
        Err(parse_err) => return report(err, &args.value, &parse_err),
    };
    info!(clauses = clauses.len(), "parsed conditional value");
    if args.json {
        write_json(out, &clauses)?;
    } else {
        write_clause_tree(out, &clauses)?;
    }
    Ok(Outcome::Parsed)
}

fn handle_tags(args: &TagsArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<Outcome> {
    let tags = read_tags(args.file.as_deref())?;
    let result = match parse_conditional_restrictions(&args.base_key, &tags) {
        Ok(result) => result,
        Err(parse_err) => {
            let value = tags
                .get(&conditional_key(&args.base_key))
                .map_or("", String::as_str);
            return report(err, value, &parse_err);
        }
    };
    info!(
        base_key = %args.base_key,
        clauses = result.clauses.len(),
        "parsed conditional restrictions"
    );
    write_json(out, &result)?;
    Ok(Outcome::Parsed)
}

fn handle_format(args: &FormatArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<Outcome> {
    let clauses = match parse_clauses(Some(&args.value)) {
        Ok(clauses) => clauses,
        Err(parse_err) => return report(err, &args.value, &parse_err),
    };
    let result = ParseResult {
        default_value: None,
        clauses,
    };
    writeln!(out, "{}", result.conditional_value()).wrap_err("failed to write formatted value")?;
    Ok(Outcome::Parsed)
}

fn report(err: &mut dyn Write, input: &str, parse_err: &ParseError) -> Result<Outcome> {
    debug!(error = %parse_err, "rejected conditional value");
    write_diagnostic(err, input, parse_err)?;
    Ok(Outcome::Rejected)
}

fn read_tags(file: Option<&Path>) -> Result<BTreeMap<String, String>> {
    let source = match file {
        Some(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read tags from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read tags from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&source).wrap_err("tags must be a JSON object of string values")
}
