//! Query abstract syntax tree.
//!
//! The parser only builds these nodes. Downstream layers decide what a leaf means (field name,
//! value or bare full-text term) and whether an operator fits the field it is applied to.

use std::fmt;

use serde::Serialize;

use crate::lexer::Operator;

/// Operator of a logical node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    /// All children must match.
    And,
    /// At least one child must match.
    Or,
}

impl LogicalOperator {
    /// Operator joining juxtaposed expressions that have no explicit connective.
    pub const DEFAULT_SEQUENCE: Self = Self::And;

    /// Returns the logical operator for an infix token symbol.
    pub fn from_operator(op: Operator) -> Option<Self> {
        match op {
            Operator::And => Some(Self::And),
            Operator::Or => Some(Self::Or),
            _ => None,
        }
    }

    /// Returns the lower-case symbol name.
    pub fn name(self) -> &'static str {
        Operator::from(self).name()
    }
}

impl From<LogicalOperator> for Operator {
    fn from(op: LogicalOperator) -> Self {
        match op {
            LogicalOperator::And => Self::And,
            LogicalOperator::Or => Self::Or,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the parsed query tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A literal value.
    Leaf {
        /// The literal text.
        value: String,
    },

    /// A prefix (one child) or infix (two children) operator application.
    Operator {
        /// The operator symbol.
        operator: Operator,
        /// Operands in source order.
        children: Vec<Self>,
    },

    /// A logical combination of sub-expressions.
    Logical {
        /// The logical operator.
        operator: LogicalOperator,
        /// Sub-expressions in source order.
        children: Vec<Self>,
    },
}

impl Node {
    /// Creates a leaf node.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf {
            value: value.into(),
        }
    }

    /// Creates an operator node.
    pub fn operator(operator: Operator, children: Vec<Self>) -> Self {
        Self::Operator { operator, children }
    }

    /// Creates a logical node.
    pub fn logical(operator: LogicalOperator, children: Vec<Self>) -> Self {
        Self::Logical { operator, children }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns the literal text of a leaf node.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Leaf { value } => Some(value),
            _ => None,
        }
    }

    /// Returns the children of this node (empty for leaves).
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Operator { children, .. } | Self::Logical { children, .. } => children,
        }
    }

    /// Returns the first child.
    pub fn lhs(&self) -> Option<&Self> {
        self.children().first()
    }

    /// Returns the second child of a two-child node.
    pub fn rhs(&self) -> Option<&Self> {
        match self.children() {
            [_, rhs] => Some(rhs),
            _ => None,
        }
    }

    /// True for an operator node applied to a single operand.
    pub fn is_prefix(&self) -> bool {
        matches!(self, Self::Operator { children, .. } if children.len() == 1)
    }

    /// True for an operator node applied to two operands.
    pub fn is_infix(&self) -> bool {
        matches!(self, Self::Operator { children, .. } if children.len() == 2)
    }

    /// Collapses single-child logical nodes.
    ///
    /// A logical node with exactly one child is replaced by that child. Empty logical nodes and
    /// nested logical nodes with the same operator are kept as they are.
    pub fn simplify(self) -> Self {
        match self {
            Self::Leaf { .. } => self,
            Self::Operator { operator, children } => Self::Operator {
                operator,
                children: simplify_all(children),
            },
            Self::Logical {
                operator,
                mut children,
            } => {
                if children.len() == 1 {
                    return children.remove(0).simplify();
                }
                Self::Logical {
                    operator,
                    children: simplify_all(children),
                }
            }
        }
    }

    /// Formats the node as a compact s-expression, e.g. `(and a (gt age 18))`.
    pub fn to_sexp(&self) -> String {
        match self {
            Self::Leaf { value } => sexp_atom(value),
            Self::Operator { operator, children } => sexp_list(operator.name(), children),
            Self::Logical { operator, children } => sexp_list(operator.name(), children),
        }
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        let children = match self {
            Self::Leaf { value } => return writeln!(f, "{prefix}Leaf({value:?})"),
            Self::Operator { operator, children } => {
                writeln!(f, "{prefix}Operator({operator})")?;
                children
            }
            Self::Logical { operator, children } => {
                writeln!(f, "{prefix}Logical({operator})")?;
                children
            }
        };
        for child in children {
            child.fmt_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Simplifies every node in a list, preserving order.
fn simplify_all(children: Vec<Node>) -> Vec<Node> {
    children.into_iter().map(Node::simplify).collect()
}

/// Renders a parenthesized s-expression list.
fn sexp_list(head: &str, children: &[Node]) -> String {
    let mut out = format!("({head}");
    for child in children {
        out.push(' ');
        out.push_str(&child.to_sexp());
    }
    out.push(')');
    out
}

/// Renders a literal, quoting it when it would not read back as a single atom.
fn sexp_atom(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"'));
    if needs_quotes {
        format!("{value:?}")
    } else {
        value.to_string()
    }
}
