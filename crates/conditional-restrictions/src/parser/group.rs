//! Recursive parser for one bracketed condition group.

use crate::condition::normalize_condition;
use crate::errors::{ParseError, ParseErrorKind, parse_error};
use crate::node::{Node, Operator};

use super::keyword::{BUFFERED_KEYWORD_LEN, ends_and_keyword};

/// Deepest bracket nesting accepted inside one condition.
pub const MAX_GROUP_DEPTH: usize = 20;

/// Siblings collected while scanning a single group.
struct GroupBuilder {
    siblings: Vec<Node>,
    pending: String,
    operator: Option<Operator>,
}

impl GroupBuilder {
    const fn new() -> Self {
        Self {
            siblings: Vec::new(),
            pending: String::new(),
            operator: None,
        }
    }

    fn flush_condition(&mut self) {
        let raw = std::mem::take(&mut self.pending);
        self.siblings.push(Node::condition(normalize_condition(&raw)));
    }

    /// Record that the next sibling is joined by `operator`.
    fn join(&mut self, operator: Operator, position: usize) -> Result<(), ParseError> {
        if self.operator.is_some_and(|current| current != operator) {
            return Err(parse_error(
                ParseErrorKind::MixedOperatorsWithoutBraces,
                position,
            ));
        }
        self.operator = Some(operator);
        Ok(())
    }

    /// Close the group at `position`, dropping blank leaves.
    fn finish(self, position: usize) -> Result<Node, ParseError> {
        let siblings = self
            .siblings
            .into_iter()
            .filter(|node| !node.is_blank())
            .collect();
        Node::group(self.operator.unwrap_or(Operator::And), siblings)
            .ok_or_else(|| parse_error(ParseErrorKind::EmptyGroup, position))
    }
}

/// Parse one group from the start of `text`.
///
/// `offset` is the position of `text` within the whole conditional value and
/// is only used for error reporting. `initial_open` is `1` when the caller has
/// consumed the `(` opening this group and `0` for the condition directly
/// after an `@`.
///
/// Returns the index in `text` where the group stopped together with the
/// parsed tree. The index points at the `)` closing the group, at a top-level
/// `;` ending the whole clause, or at `text.len()`. Callers reprocess the
/// character at that index.
///
/// # Errors
/// Returns [`ParseError`] for unbalanced brackets, empty groups, mixed
/// operators, or nesting deeper than [`MAX_GROUP_DEPTH`].
pub(crate) fn parse_group(
    text: &[char],
    offset: usize,
    depth: usize,
    initial_open: usize,
) -> Result<(usize, Node), ParseError> {
    let opened_at = offset.saturating_sub(1);
    if depth > MAX_GROUP_DEPTH {
        return Err(parse_error(ParseErrorKind::TooManyOpenBrackets, opened_at));
    }

    let mut open = initial_open;
    let mut group = GroupBuilder::new();
    let mut index = 0;

    while let Some(&ch) = text.get(index) {
        let position = offset + index;
        match ch {
            '(' => {
                open += 1;
                let rest = text.get(index + 1..).unwrap_or_default();
                let (end, node) = parse_group(rest, position + 1, depth + 1, 1)?;
                group.siblings.push(node);
                // Land on the subgroup's `)` so it also closes our own count.
                index += end + 1;
                continue;
            }
            ')' => {
                group.flush_condition();
                if open == 0 {
                    return Err(parse_error(
                        ParseErrorKind::UnexpectedClosingBracket,
                        position,
                    ));
                }
                open -= 1;
                if open == 0 {
                    return Ok((index, group.finish(position)?));
                }
            }
            ';' if open == 0 => {
                group.flush_condition();
                return Ok((index, group.finish(position)?));
            }
            ';' => {
                group.join(Operator::Or, position)?;
                group.flush_condition();
            }
            _ if ends_and_keyword(text, index) => {
                for _ in 0..BUFFERED_KEYWORD_LEN {
                    group.pending.pop();
                }
                group.join(Operator::And, position.saturating_sub(BUFFERED_KEYWORD_LEN))?;
                group.flush_condition();
            }
            _ => group.pending.push(ch),
        }
        index += 1;
    }

    if !group.pending.is_empty() {
        group.flush_condition();
    }
    if open != 0 {
        return Err(parse_error(
            ParseErrorKind::ExpectedClosingBracket,
            opened_at,
        ));
    }
    let end = text.len();
    Ok((end, group.finish(offset + end)?))
}
