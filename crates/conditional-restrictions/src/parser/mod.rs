//! Two-stage parser for conditional values.
//!
//! [`parse_clauses`] scans the value for `value @ condition` clauses and hands
//! each condition to the recursive group parser.

mod clause;
mod group;
mod keyword;

pub use clause::parse_clauses;
pub use group::MAX_GROUP_DEPTH;
