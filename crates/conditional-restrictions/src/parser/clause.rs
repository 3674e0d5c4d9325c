//! State machine splitting a conditional value into `value @ condition` clauses.

use crate::errors::{ParseError, ParseErrorKind, parse_error};
use crate::restrictions::Clause;

use super::group::parse_group;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Collecting the value before an `@`.
    ReadingValue,
    /// Skipping spaces between `@` and the condition.
    AwaitingGroup,
    /// Handing the condition to the group parser.
    ReadingGroup,
    /// Waiting for the `;` that starts the next clause.
    GroupComplete,
}

/// The value buffer and where its content started.
#[derive(Default)]
struct ValueBuffer {
    text: String,
    start: Option<usize>,
}

impl ValueBuffer {
    fn push(&mut self, ch: char, position: usize) {
        if self.start.is_none() && !ch.is_whitespace() {
            self.start = Some(position);
        }
        self.text.push(ch);
    }

    fn take(&mut self) -> String {
        self.start = None;
        std::mem::take(&mut self.text).trim().to_owned()
    }
}

/// Parse a conditional value into its ordered clauses.
///
/// An absent or empty value has no clauses and is not an error.
///
/// # Errors
/// Returns [`ParseError`] when the value is malformed; no partial result is
/// produced.
///
/// # Examples
/// ```
/// use conditional_restrictions::{Node, parse_clauses};
/// let clauses = parse_clauses(Some("no @ wet; yes @ low_tide"))?;
/// assert_eq!(clauses.len(), 2);
/// assert_eq!(clauses[1].value, "yes");
/// assert_eq!(clauses[1].condition, Some(Node::condition("low_tide")));
/// # Ok::<(), conditional_restrictions::ParseError>(())
/// ```
pub fn parse_clauses(tag_value: Option<&str>) -> Result<Vec<Clause>, ParseError> {
    let Some(tag_value) = tag_value.filter(|value| !value.is_empty()) else {
        return Ok(Vec::new());
    };
    let chars: Vec<char> = tag_value.chars().collect();

    let mut clauses: Vec<(Clause, usize)> = Vec::new();
    let mut state = ScanState::ReadingValue;
    let mut value = ValueBuffer::default();
    let mut at_sign = 0;
    let mut index = 0;

    while let Some(&ch) = chars.get(index) {
        match (state, ch) {
            (ScanState::ReadingValue, '@') => {
                at_sign = index;
                state = ScanState::AwaitingGroup;
            }
            (ScanState::ReadingValue, _) => value.push(ch, index),
            (ScanState::AwaitingGroup, ' ') => {}
            (ScanState::AwaitingGroup, _) => {
                state = ScanState::ReadingGroup;
                continue;
            }
            (ScanState::ReadingGroup, _) => {
                let rest = chars.get(index..).unwrap_or_default();
                let (end, node) = parse_group(rest, index, 0, 0)?;
                let clause = Clause::new(value.take(), Some(node));
                log::trace!("parsed clause `{clause}`");
                clauses.push((clause, at_sign));
                index += end;
                state = ScanState::GroupComplete;
                continue;
            }
            (ScanState::GroupComplete, ';') => state = ScanState::ReadingValue,
            (ScanState::GroupComplete, _) => {}
        }
        index += 1;
    }

    if clauses.is_empty() {
        return Err(ParseError::new(ParseErrorKind::NoConditions, None));
    }
    if let Some((_, at_sign)) = clauses.iter().find(|(clause, _)| clause.value.is_empty()) {
        return Err(parse_error(ParseErrorKind::NoConditionalValue, *at_sign));
    }
    if let Some(start) = value.start {
        return Err(parse_error(ParseErrorKind::UnexpectedEndOfInput, start));
    }

    log::debug!("parsed {} clause(s) from `{tag_value}`", clauses.len());
    Ok(clauses.into_iter().map(|(clause, _)| clause).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Operator};
    use rstest::rstest;

    fn parse_ok(text: &str) -> Vec<Clause> {
        match parse_clauses(Some(text)) {
            Ok(clauses) => clauses,
            Err(err) => panic!("{text:?} should parse: {err}"),
        }
    }

    fn parse_err(text: &str) -> ParseError {
        match parse_clauses(Some(text)) {
            Ok(clauses) => panic!("{text:?} should fail, got {clauses:?}"),
            Err(err) => err,
        }
    }

    fn clause(value: &str, condition: &str) -> Clause {
        Clause::new(value.to_owned(), Some(Node::condition(condition)))
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn absent_value_has_no_clauses(#[case] value: Option<&str>) {
        assert_eq!(parse_clauses(value), Ok(Vec::new()));
    }

    #[test]
    fn resumes_after_a_bracketed_group() {
        assert_eq!(
            parse_ok("no @ (wet);yes @ (low_tide)"),
            vec![clause("no", "wet"), clause("yes", "low_tide")]
        );
    }

    #[test]
    fn ignores_text_between_group_and_separator() {
        assert_eq!(
            parse_ok("no @ (wet)  ;yes @ dry"),
            vec![clause("no", "wet"), clause("yes", "dry")]
        );
    }

    #[test]
    fn semicolons_inside_brackets_stay_in_the_clause() {
        let clauses = parse_ok("no @ (wet;dry);yes @ snow");
        let expected = Node::group(
            Operator::Or,
            vec![Node::condition("wet"), Node::condition("dry")],
        );
        assert_eq!(clauses.first().and_then(|c| c.condition.clone()), expected);
        assert_eq!(clauses.get(1), Some(&clause("yes", "snow")));
    }

    #[rstest]
    #[case("no", ParseErrorKind::NoConditions, None)]
    #[case(" @ ", ParseErrorKind::NoConditions, None)]
    #[case("@ wet", ParseErrorKind::NoConditionalValue, Some(0))]
    #[case("no @ wet;  @ dry", ParseErrorKind::NoConditionalValue, Some(11))]
    #[case("yes @ 1;abc", ParseErrorKind::UnexpectedEndOfInput, Some(8))]
    #[case("yes @ 1;;", ParseErrorKind::UnexpectedEndOfInput, Some(8))]
    #[case("yes @ 1; no @", ParseErrorKind::UnexpectedEndOfInput, Some(9))]
    fn validates_clauses(
        #[case] text: &str,
        #[case] kind: ParseErrorKind,
        #[case] offset: Option<usize>,
    ) {
        let err = parse_err(text);
        assert_eq!(err.kind(), kind);
        assert_eq!(err.offset(), offset);
    }

    #[test]
    fn stray_text_after_a_closed_group_is_skipped() {
        assert_eq!(
            parse_ok("no @ wet;yes @ (dry))"),
            vec![clause("no", "wet"), clause("yes", "dry")]
        );
    }

    #[test]
    fn group_errors_carry_absolute_offsets() {
        let err = parse_err("no @ wet;yes @ (a;b AND c)");
        assert_eq!(err.kind(), ParseErrorKind::MixedOperatorsWithoutBraces);
        assert_eq!(err.offset(), Some(20));
    }

    #[test]
    fn group_errors_win_over_clause_validation() {
        let err = parse_err("@ a;yes @ (");
        assert_eq!(err.kind(), ParseErrorKind::ExpectedClosingBracket);
        assert_eq!(err.offset(), Some(10));
    }
}
