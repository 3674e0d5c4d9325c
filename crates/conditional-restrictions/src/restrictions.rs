//! Conditional restrictions assembled from a base tag and its `:conditional` variant.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde::Serialize;

use crate::errors::ParseError;
use crate::node::Node;
use crate::parser::parse_clauses;

/// Suffix appended to a base key to find its conditional variant.
pub const CONDITIONAL_SUFFIX: &str = ":conditional";

/// One `value @ condition` override.
///
/// Serializes as `{"value": .., "if": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Clause {
    /// The value that applies while the condition holds.
    pub value: String,
    /// The condition guarding the value.
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<Node>,
}

impl Clause {
    /// Create a clause from its value and condition.
    #[must_use]
    pub const fn new(value: String, condition: Option<Node>) -> Self {
        Self { value, condition }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(node @ Node::Condition { .. }) => write!(f, "{} @ ({node})", self.value),
            Some(node @ Node::LogicalOperator(_)) => write!(f, "{} @ {node}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// A base value together with its ordered conditional overrides.
///
/// Serializes as `{"default": .., "exceptions": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParseResult {
    /// The unconditional value of the base key, if tagged.
    #[serde(rename = "default")]
    pub default_value: Option<String>,
    /// Overrides in the order they were written.
    #[serde(rename = "exceptions")]
    pub clauses: Vec<Clause>,
}

impl ParseResult {
    /// Render the clauses in the conditional value grammar.
    ///
    /// # Examples
    /// ```
    /// use conditional_restrictions::parse_clauses;
    /// use conditional_restrictions::ParseResult;
    /// let clauses = parse_clauses(Some(" no @ wet;yes @ ( (a) AND b )"))?;
    /// let result = ParseResult { default_value: None, clauses };
    /// assert_eq!(result.conditional_value(), "no @ (wet); yes @ (a AND b)");
    /// # Ok::<(), conditional_restrictions::ParseError>(())
    /// ```
    #[must_use]
    pub fn conditional_value(&self) -> String {
        self.clauses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A read-only view of an element's tags.
pub trait TagSource {
    /// Return the value stored under `key`.
    fn tag(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> TagSource for HashMap<String, String, S> {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl TagSource for BTreeMap<String, String> {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Build the key holding the conditional variant of `base_key`.
///
/// # Examples
/// ```
/// use conditional_restrictions::conditional_key;
/// assert_eq!(conditional_key("maxstay"), "maxstay:conditional");
/// ```
#[must_use]
pub fn conditional_key(base_key: &str) -> String {
    format!("{base_key}{CONDITIONAL_SUFFIX}")
}

/// Read `base_key` and its `:conditional` variant from `tags`.
///
/// A missing conditional tag yields no clauses.
///
/// # Errors
/// Returns [`ParseError`] when the conditional tag is malformed.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use conditional_restrictions::parse_conditional_restrictions;
///
/// let tags = HashMap::from([
///     ("access".to_owned(), "no".to_owned()),
///     ("access:conditional".to_owned(), "yes @ (Mo-Fr 07:00-19:00)".to_owned()),
/// ]);
/// let result = parse_conditional_restrictions("access", &tags)?;
/// assert_eq!(result.default_value.as_deref(), Some("no"));
/// assert_eq!(result.clauses[0].value, "yes");
/// # Ok::<(), conditional_restrictions::ParseError>(())
/// ```
pub fn parse_conditional_restrictions<T>(base_key: &str, tags: &T) -> Result<ParseResult, ParseError>
where
    T: TagSource + ?Sized,
{
    let clauses = parse_clauses(tags.tag(&conditional_key(base_key)))?;
    Ok(ParseResult {
        default_value: tags.tag(base_key).map(str::to_owned),
        clauses,
    })
}
