//! Helpers for rendering parse results and diagnostics.

use std::io::Write;

use conditional_restrictions::{Clause, Node, ParseError};
use eyre::{Context, Result};
use serde::Serialize;

const INDENT: &str = "  ";

/// Write each clause followed by its condition as an indented tree.
pub(crate) fn write_clause_tree(writer: &mut dyn Write, clauses: &[Clause]) -> Result<()> {
    for clause in clauses {
        writeln!(writer, "{} @", clause.value)
            .wrap_err_with(|| format!("failed to write clause '{}'", clause.value))?;
        if let Some(condition) = &clause.condition {
            write_node(writer, condition, 1)?;
        }
    }
    Ok(())
}

fn write_node(writer: &mut dyn Write, node: &Node, depth: usize) -> Result<()> {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Condition { string } => {
            writeln!(writer, "{indent}{string}")
                .wrap_err_with(|| format!("failed to write condition '{string}'"))
        }
        Node::LogicalOperator(group) => {
            writeln!(writer, "{indent}{}", group.operator())
                .wrap_err("failed to write logical operator")?;
            for child in group.children() {
                write_node(writer, child, depth + 1)?;
            }
            Ok(())
        }
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).wrap_err("failed to serialise JSON")?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}

/// Write `err` with a caret marker beneath the offending character of `input`.
///
/// Without an offset every character of `input` is marked.
pub(crate) fn write_diagnostic(writer: &mut dyn Write, input: &str, err: &ParseError) -> Result<()> {
    let width = input.chars().count();
    let (column, length) = err
        .offset()
        .map_or((0, width.max(1)), |offset| (offset.min(width), 1));
    writeln!(writer, "error: {}", err.message()).wrap_err("failed to write diagnostic")?;
    writeln!(writer, "  | {input}").wrap_err("failed to write diagnostic source")?;
    writeln!(writer, "  | {}{}", " ".repeat(column), "^".repeat(length))
        .wrap_err("failed to write diagnostic marker")
}
