//! Error types for query parsing.

use thiserror::Error;

use crate::lexer::Token;

/// Errors raised while parsing a token sequence.
///
/// Parsing is permissive: the only rejected input is a position where a literal value is
/// mandatory but something else (or nothing) follows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A literal value was required but the next token was not a literal.
    #[error("value expected but found {}", describe(.found))]
    ValueExpected {
        /// The offending token, or `None` at end of input.
        found: Option<Token>,
        /// The last token consumed before the failure.
        after: Option<Token>,
    },
}

impl ParseError {
    /// Returns the token that was found where a value was expected.
    pub fn found(&self) -> Option<&Token> {
        match self {
            Self::ValueExpected { found, .. } => found.as_ref(),
        }
    }

    /// Returns the last token consumed before the failure.
    pub fn after(&self) -> Option<&Token> {
        match self {
            Self::ValueExpected { after, .. } => after.as_ref(),
        }
    }
}

/// Formats an optional token for error messages.
fn describe(token: &Option<Token>) -> String {
    match token {
        Some(token) => format!("`{token}`"),
        None => String::from("end of input"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Operator;

    #[test]
    fn display_operator_token() {
        let err = ParseError::ValueExpected {
            found: Some(Token::Operator(Operator::Gt)),
            after: Some(Token::literal("age")),
        };
        assert_eq!(err.to_string(), "value expected but found `gt`");
    }

    #[test]
    fn display_end_of_input() {
        let err = ParseError::ValueExpected {
            found: None,
            after: Some(Token::Operator(Operator::Null)),
        };
        assert_eq!(err.to_string(), "value expected but found end of input");
    }

    #[test]
    fn accessors() {
        let err = ParseError::ValueExpected {
            found: Some(Token::Operator(Operator::RParen)),
            after: None,
        };
        assert_eq!(err.found(), Some(&Token::Operator(Operator::RParen)));
        assert!(err.after().is_none());
    }
}
