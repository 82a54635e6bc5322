//! Query language parsing for scoped search.
//!
//! Turns a human-typed search query into a tree of logical operators, null checks and field
//! comparisons:
//!
//! - **Terms**: `rust` - a bare value, matched as free text downstream
//! - **Comparisons**: `age > 18`, `name ~ john%`, `status != closed`
//! - **Null checks**: `null? phone`, `set? email`, `has email`
//! - **Logic**: `a and b`, `a or b`, `not a`, `-a`
//! - **Grouping**: `(a or b) c` - juxtaposed expressions are ANDed
//!
//! The parser does not know about fields or types; validating a comparison against a schema is
//! left to whatever consumes the tree.
//!
//! # Example
//!
//! ```
//! use scoped_query::{Node, Operator, parse};
//!
//! let node = parse("age > 18").unwrap();
//! assert_eq!(
//!     node,
//!     Node::operator(Operator::Gt, vec![Node::leaf("age"), Node::leaf("18")])
//! );
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{LogicalOperator, Node};
pub use error::ParseError;
pub use lexer::{Operator, Token, tokenize};
pub use parser::{parse, parse_tokens, parse_tokens_unsimplified};
