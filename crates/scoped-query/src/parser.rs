//! Query parser.
//!
//! Parses a token sequence into a query AST using LL(1) recursive descent, with no backtracking.
//!
//! # Grammar
//!
//! ```text
//! sequence    → logical*                         (top level)
//!             | "(" logical* ")"?                (group)
//! logical     → operand (("and" | "or") logical)?
//! operand     → ε | sequence | not | null_check | comparison
//! not         → "not" (not | sequence | comparison)
//! null_check  → ("null" | "notnull") VALUE
//! comparison  → ","? (infix | prefix)
//! infix       → VALUE ("," | COMPARISON VALUE)?
//! prefix      → OPERATOR VALUE
//! ```
//!
//! Juxtaposed expressions in a sequence are joined with the default sequence operator (AND).
//! `and` and `or` share one precedence level and chain to the right, so `a and b or c` parses
//! as `and(a, or(b, c))`.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    ast::{LogicalOperator, Node},
    error::ParseError,
    lexer::{Operator, Token, tokenize},
};

/// Forward-only cursor over a token queue.
struct TokenCursor {
    /// Tokens not yet consumed, front first.
    tokens: VecDeque<Token>,
    /// The most recently consumed token.
    current: Option<Token>,
}

impl TokenCursor {
    /// Creates a cursor positioned before the first token.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
            current: None,
        }
    }

    /// Returns the token `amount` positions ahead (1 is the next token) without consuming it.
    fn peek_token(&self, amount: usize) -> Option<&Token> {
        amount.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Consumes the front token, recording it as current.
    fn next_token(&mut self) -> Option<&Token> {
        self.current = self.tokens.pop_front();
        self.current.as_ref()
    }

    /// Returns the most recently consumed token.
    fn current_token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Number of tokens not yet consumed.
    fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

/// Category of the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead {
    /// No tokens left.
    End,
    /// A literal value.
    Literal,
    /// An operator symbol or structural marker.
    Operator(Operator),
}

/// Recursive descent parser for query expressions.
struct Parser {
    /// Token cursor owned by this parse.
    cursor: TokenCursor,
}

impl Parser {
    /// Creates a new parser from a token sequence.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
        }
    }

    /// Parses the token sequence into an (unsimplified) root node.
    fn parse(mut self) -> Result<Node, ParseError> {
        debug!(tokens = self.cursor.remaining(), "parsing query");

        let root = self.parse_sequence(true).inspect_err(|e| {
            debug!(error = %e, "query parse failed");
        })?;

        trace!(expressions = root.children().len(), "parsed top-level sequence");
        if self.cursor.remaining() > 0 {
            debug!(
                ignored = self.cursor.remaining(),
                "ignoring tokens after unmatched group close"
            );
        }

        Ok(root)
    }

    /// Parses a top-level sequence or a parenthesized group.
    ///
    /// Groups own their markers: the opening marker the caller peeked at is consumed here, and
    /// a closing marker is consumed if present.
    fn parse_sequence(&mut self, initial: bool) -> Result<Node, ParseError> {
        if !initial && self.peek_is(Operator::LParen) {
            self.cursor.next_token();
        }

        let mut expressions = Vec::new();
        while !matches!(
            self.lookahead(),
            Lookahead::End | Lookahead::Operator(Operator::RParen)
        ) {
            expressions.extend(self.parse_logical_expression()?);
        }

        if !initial && self.peek_is(Operator::RParen) {
            self.cursor.next_token();
        }

        Ok(Node::logical(LogicalOperator::DEFAULT_SEQUENCE, expressions))
    }

    /// Parses an operand optionally followed by an infix `and`/`or` and another expression.
    ///
    /// Returns `None` only when no tokens are left.
    fn parse_logical_expression(&mut self) -> Result<Option<Node>, ParseError> {
        let lhs = match self.lookahead() {
            Lookahead::End => None,
            Lookahead::Operator(Operator::LParen) => Some(self.parse_sequence(false)?),
            Lookahead::Operator(Operator::Not) => Some(self.parse_not_expression()?),
            Lookahead::Operator(op) if op.is_null_check() => Some(self.parse_null_expression(op)?),
            _ => Some(self.parse_comparison()?),
        };

        if let Lookahead::Operator(op) = self.lookahead()
            && let Some(operator) = LogicalOperator::from_operator(op)
        {
            self.cursor.next_token();
            let rhs = self.parse_logical_expression()?;
            // A trailing connective has no right operand; only the present children are kept.
            let children = lhs.into_iter().chain(rhs).collect();
            return Ok(Some(Node::logical(operator, children)));
        }

        Ok(lhs)
    }

    /// Parses `not` followed by a negation, a group or a comparison.
    fn parse_not_expression(&mut self) -> Result<Node, ParseError> {
        self.cursor.next_token(); // consume not

        let negated = match self.lookahead() {
            Lookahead::Operator(Operator::Not) => self.parse_not_expression()?,
            Lookahead::Operator(Operator::LParen) => self.parse_sequence(false)?,
            _ => self.parse_comparison()?,
        };

        Ok(Node::operator(Operator::Not, vec![negated]))
    }

    /// Parses `null`/`notnull` followed by a field name.
    fn parse_null_expression(&mut self, operator: Operator) -> Result<Node, ParseError> {
        self.cursor.next_token(); // consume null/notnull
        let field = self.parse_value()?;
        Ok(Node::operator(operator, vec![field]))
    }

    /// Parses a comparison, skipping one optional leading comma.
    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        if self.peek_is(Operator::Comma) {
            self.cursor.next_token();
        }

        match self.lookahead() {
            Lookahead::Literal => self.parse_infix_comparison(),
            Lookahead::Operator(op) => self.parse_prefix_comparison(op),
            Lookahead::End => Err(self.value_expected()),
        }
    }

    /// Parses an operator written before its single operand.
    fn parse_prefix_comparison(&mut self, operator: Operator) -> Result<Node, ParseError> {
        self.cursor.next_token(); // consume operator
        let value = self.parse_value()?;
        Ok(Node::operator(operator, vec![value]))
    }

    /// Parses a value optionally followed by a comparison operator and a second value.
    fn parse_infix_comparison(&mut self) -> Result<Node, ParseError> {
        let lhs = self.parse_value()?;

        match self.lookahead() {
            Lookahead::Operator(Operator::Comma) => {
                self.cursor.next_token();
                Ok(lhs)
            }
            Lookahead::Operator(op) if op.is_comparison() => {
                self.cursor.next_token();
                let rhs = self.parse_value()?;
                Ok(Node::operator(op, vec![lhs, rhs]))
            }
            _ => Ok(lhs),
        }
    }

    /// Consumes a literal token into a leaf node.
    fn parse_value(&mut self) -> Result<Node, ParseError> {
        match self.cursor.peek_token(1) {
            Some(Token::Literal(value)) => {
                let leaf = Node::leaf(value.clone());
                self.cursor.next_token();
                Ok(leaf)
            }
            _ => Err(self.value_expected()),
        }
    }

    /// Builds the value-expected error for the current position.
    fn value_expected(&self) -> ParseError {
        ParseError::ValueExpected {
            found: self.cursor.peek_token(1).cloned(),
            after: self.cursor.current_token().cloned(),
        }
    }

    /// Classifies the next token.
    fn lookahead(&self) -> Lookahead {
        match self.cursor.peek_token(1) {
            None => Lookahead::End,
            Some(Token::Literal(_)) => Lookahead::Literal,
            Some(Token::Operator(op)) => Lookahead::Operator(*op),
        }
    }

    /// Checks whether the next token is the given operator.
    fn peek_is(&self, op: Operator) -> bool {
        self.cursor.peek_token(1).is_some_and(|t| t.is(op))
    }
}

/// Parses a query string into a simplified AST.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    parse_tokens(tokenize(input))
}

/// Parses an already tokenized query into a simplified AST.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, ParseError> {
    parse_tokens_unsimplified(tokens).map(Node::simplify)
}

/// Parses an already tokenized query, returning the root sequence node before simplification.
///
/// The root is always a logical node with the default sequence operator.
pub fn parse_tokens_unsimplified(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::new(tokens).parse()
}
