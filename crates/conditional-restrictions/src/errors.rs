//! Error types surfaced by the conditional value parser.

use std::fmt;
use thiserror::Error;

/// The fixed set of failures the parser can report.
///
/// Each kind carries a stable message which consumers may match on.
///
/// # Examples
/// ```
/// use conditional_restrictions::ParseErrorKind;
/// assert_eq!(ParseErrorKind::EmptyGroup.message(), "Empty group");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Brackets were nested deeper than the parser allows.
    TooManyOpenBrackets,
    /// A group was still open when the input ended.
    ExpectedClosingBracket,
    /// A `)` appeared without a matching `(`.
    UnexpectedClosingBracket,
    /// A group contained no non-blank condition.
    EmptyGroup,
    /// `AND` and `;` joined immediate siblings of the same group.
    MixedOperatorsWithoutBraces,
    /// The value contained no `value @ condition` clause.
    NoConditions,
    /// A clause had nothing before its `@`.
    NoConditionalValue,
    /// Text was left over after the last complete clause.
    UnexpectedEndOfInput,
}

impl ParseErrorKind {
    /// Return the human-readable message for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooManyOpenBrackets => "Too many opening brackets",
            Self::ExpectedClosingBracket => "Expected a closing bracket",
            Self::UnexpectedClosingBracket => "Unexpected closing bracket",
            Self::EmptyGroup => "Empty group",
            Self::MixedOperatorsWithoutBraces => "mix of AND/OR without braces",
            Self::NoConditions => "No conditions",
            Self::NoConditionalValue => "No conditional value",
            Self::UnexpectedEndOfInput => "Unexpected end of input",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A parse failure with the character offset of the offending token.
///
/// The offset counts characters, not bytes, from the start of the conditional
/// value. It is absent when no single token is to blame.
///
/// # Examples
/// ```
/// use conditional_restrictions::{ParseError, ParseErrorKind};
/// let err = ParseError::new(ParseErrorKind::EmptyGroup, Some(7));
/// assert_eq!(err.to_string(), "Empty group at character 7 (zero-based)");
/// assert_eq!(err.message(), "Empty group");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{kind}{}",
    .offset.map_or_else(String::new, |offset| format!(" at character {offset} (zero-based)"))
)]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: Option<usize>,
}

impl ParseError {
    /// Create an error of `kind`, optionally pointing at `offset`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, offset: Option<usize>) -> Self {
        Self { kind, offset }
    }

    /// The kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The fixed message for this failure, without position information.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Zero-based character offset of the offending token, if known.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        self.offset
    }
}

pub(crate) const fn parse_error(kind: ParseErrorKind, offset: usize) -> ParseError {
    ParseError::new(kind, Some(offset))
}
