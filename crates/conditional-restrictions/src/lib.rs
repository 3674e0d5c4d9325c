//! Parser for conditional restriction tag values.
//!
//! A conditional value lists overrides of a base value, such as
//! `no @ (wet AND low_tide); yes @ (Mo-Fr 07:00-19:00)`. Each clause pairs a
//! value with a boolean condition built from uninterpreted condition strings,
//! joined by `;` (OR) or the keyword `AND` and grouped with brackets. `AND` and
//! `;` may not be mixed within one group without extra brackets.
//!
//! Use [`parse_conditional_restrictions`] to read a base tag and its
//! `:conditional` variant from a tag map, or [`parse_clauses`] to parse a
//! single conditional value.

mod condition;
mod errors;
mod node;
mod parser;
mod restrictions;

pub use condition::normalize_condition;
pub use errors::{ParseError, ParseErrorKind};
pub use node::{LogicalOperatorNode, Node, Operator};
pub use parser::{MAX_GROUP_DEPTH, parse_clauses};
pub use restrictions::{
    CONDITIONAL_SUFFIX, Clause, ParseResult, TagSource, conditional_key,
    parse_conditional_restrictions,
};
