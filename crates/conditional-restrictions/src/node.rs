//! Boolean condition trees produced by the group parser.

use std::fmt;

use serde::Serialize;

/// Operator joining the children of a [`LogicalOperatorNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every child must hold. Written as the keyword `AND`.
    And,
    /// Any child may hold. Written as `;`.
    Or,
}

impl Operator {
    /// Return the operator name as it appears in serialized trees.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    const fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => ";",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a parsed condition.
///
/// Serializes as `{"type": "Condition", "string": ..}` or
/// `{"type": "LogicalOperator", "operator": .., "children": [..]}`.
///
/// `Display` writes the node back in the tag grammar, so re-parsing the output
/// yields an equal tree.
///
/// # Examples
/// ```
/// use conditional_restrictions::{Node, Operator};
/// let node = Node::group(
///     Operator::Or,
///     vec![Node::condition("wet"), Node::condition("low_tide")],
/// );
/// assert_eq!(node.map(|n| n.to_string()).as_deref(), Some("(wet;low_tide)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    /// An uninterpreted condition such as `wet` or `Mo-Fr 07:00-19:00`.
    Condition {
        /// The trimmed source text of the condition.
        string: String,
    },
    /// Two or more nodes joined by one operator.
    LogicalOperator(LogicalOperatorNode),
}

impl Node {
    /// Build a leaf condition from already-normalized text.
    #[must_use]
    pub fn condition(string: impl Into<String>) -> Self {
        Self::Condition {
            string: string.into(),
        }
    }

    /// Join `children` with `operator`.
    ///
    /// Returns `None` when `children` is empty and the sole child when there is
    /// exactly one, so a logical node always has at least two children.
    #[must_use]
    pub fn group(operator: Operator, mut children: Vec<Self>) -> Option<Self> {
        match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(Self::LogicalOperator(LogicalOperatorNode { operator, children })),
        }
    }

    /// Return `true` for a leaf whose text is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Condition { string } if string.is_empty())
    }

    /// Iterate over the leaf condition strings in textual order.
    ///
    /// # Examples
    /// ```
    /// use conditional_restrictions::parse_clauses;
    /// let clauses = parse_clauses(Some("no @ (wet AND (dry;snow))"))?;
    /// let leaves: Vec<_> = clauses[0]
    ///     .condition
    ///     .iter()
    ///     .flat_map(|node| node.conditions())
    ///     .collect();
    /// assert_eq!(leaves, ["wet", "dry", "snow"]);
    /// # Ok::<(), conditional_restrictions::ParseError>(())
    /// ```
    pub fn conditions(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Condition { string } => Box::new(std::iter::once(string.as_str())),
            Self::LogicalOperator(node) => {
                Box::new(node.children.iter().flat_map(Self::conditions))
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Parsing trims the tab, and it stops a leading `and ` reading as the keyword.
            Self::Condition { string } if starts_with_keyword(string) => write!(f, "\t{string}"),
            Self::Condition { string } => f.write_str(string),
            Self::LogicalOperator(node) => node.fmt(f),
        }
    }
}

fn starts_with_keyword(text: &str) -> bool {
    text.get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("and "))
}

fn ends_with_keyword(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower == "and" || lower.ends_with(" and")
}

/// Children joined by a single [`Operator`].
///
/// Only [`Node::group`] constructs this type, which keeps the two-children
/// minimum intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LogicalOperatorNode {
    operator: Operator,
    children: Vec<Node>,
}

impl LogicalOperatorNode {
    /// The operator joining the children.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// The joined nodes, in textual order. Always at least two.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl fmt::Display for LogicalOperatorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                f.write_str(self.operator.separator())?;
            }
            let bracketed = self.operator == Operator::And
                && matches!(child, Node::Condition { string } if ends_with_keyword(string));
            if bracketed {
                write!(f, "({child})")?;
            } else {
                write!(f, "{child}")?;
            }
        }
        f.write_str(")")
    }
}
