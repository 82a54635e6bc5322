//! Query lexer (tokenizer).
//!
//! Converts a query string into the token sequence consumed by the parser. Tokenizing never
//! fails: anything that is not an operator symbol or a structural marker becomes a literal.

use std::{fmt, iter::Peekable, str::Chars};

use serde::Serialize;

/// An operator symbol from the fixed query vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Logical conjunction (infix).
    And,
    /// Logical disjunction (infix).
    Or,
    /// Logical negation (prefix).
    Not,
    /// Field is null (prefix).
    Null,
    /// Field is not null (prefix).
    NotNull,
    /// Equal to.
    Eq,
    /// Not equal to.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
    /// Pattern match.
    Like,
    /// Negated pattern match.
    Unlike,
    /// Group open marker.
    LParen,
    /// Group close marker.
    RParen,
    /// Optional separator.
    Comma,
}

impl Operator {
    /// Returns the lower-case symbol name.
    pub fn name(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Null => "null",
            Self::NotNull => "notnull",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Unlike => "unlike",
            Self::LParen => "lparen",
            Self::RParen => "rparen",
            Self::Comma => "comma",
        }
    }

    /// True for `and` and `or`.
    pub fn is_logical_infix(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// True for `null` and `notnull`.
    pub fn is_null_check(self) -> bool {
        matches!(self, Self::Null | Self::NotNull)
    }

    /// True for the comparison operators (`eq` through `unlike`).
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Ne
                | Self::Gt
                | Self::Gte
                | Self::Lt
                | Self::Lte
                | Self::Like
                | Self::Unlike
        )
    }

    /// Looks up a one- or two-character operator spelling.
    fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "&" | "&&" => Self::And,
            "|" | "||" => Self::Or,
            "!" | "-" => Self::Not,
            "~" => Self::Like,
            "!~" => Self::Unlike,
            "=" | "==" => Self::Eq,
            "!=" | "<>" => Self::Ne,
            ">" => Self::Gt,
            ">=" => Self::Gte,
            "<" => Self::Lt,
            "<=" => Self::Lte,
            _ => return None,
        };
        Some(op)
    }

    /// Looks up a keyword spelling (case-insensitive).
    fn from_keyword(word: &str) -> Option<Self> {
        let op = match word.to_ascii_lowercase().as_str() {
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "null?" => Self::Null,
            "set?" | "has" => Self::NotNull,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An operator symbol or structural marker.
    Operator(Operator),

    /// A literal value (field name, term or comparison value).
    Literal(String),
}

impl Token {
    /// Creates a literal token.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// True if this token is a literal, regardless of its content.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns the operator symbol, if this is an operator token.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            Self::Literal(_) => None,
        }
    }

    /// Checks whether this token is the given operator.
    pub fn is(&self, op: Operator) -> bool {
        self.operator() == Some(op)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "{op}"),
            Self::Literal(value) => write!(f, "{value:?}"),
        }
    }
}

/// Characters that start an operator.
const OPERATOR_CHARS: &[char] = &['&', '|', '!', '~', '=', '<', '>', '-'];

/// Tokenizes a query string.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        tokens
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let ch = self.chars.next()?;
        let token = match ch {
            '(' => Token::Operator(Operator::LParen),
            ')' => Token::Operator(Operator::RParen),
            ',' => Token::Operator(Operator::Comma),
            '"' => self.read_quoted(),
            c => match Operator::from_symbol(c.encode_utf8(&mut [0; 4])) {
                Some(single) => self.read_operator(c, single),
                None => self.read_word(c),
            },
        };
        Some(token)
    }

    /// Reads an operator, extending it to two characters when the pair is known.
    fn read_operator(&mut self, first: char, single: Operator) -> Token {
        if let Some(&second) = self.chars.peek() {
            let pair: String = [first, second].iter().collect();
            if let Some(op) = Operator::from_symbol(&pair) {
                self.chars.next();
                return Token::Operator(op);
            }
        }

        Token::Operator(single)
    }

    /// Reads a double-quoted literal; the opening quote is already consumed.
    ///
    /// An unterminated quote runs to the end of input.
    fn read_quoted(&mut self) -> Token {
        let mut content = String::new();

        while let Some(ch) = self.chars.next() {
            match ch {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.chars.next() {
                        content.push(escaped);
                    }
                }
                c => content.push(c),
            }
        }

        Token::Literal(content)
    }

    /// Reads a bare word and classifies it as a keyword or a literal.
    fn read_word(&mut self, first: char) -> Token {
        let mut word = String::from(first);

        while let Some(&ch) = self.chars.peek() {
            if is_word_boundary(ch) {
                break;
            }
            word.push(ch);
            self.chars.next();
        }

        match Operator::from_keyword(&word) {
            Some(op) => Token::Operator(op),
            None => Token::Literal(word),
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|ch| ch.is_whitespace()).is_some() {}
    }
}

/// Checks whether a character ends a bare word.
///
/// `-` only starts an operator at the beginning of a token, so it never ends a word.
fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(ch, '(' | ')' | ',' | '"')
        || (ch != '-' && OPERATOR_CHARS.contains(&ch))
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token {
        Token::literal(s)
    }

    fn op(o: Operator) -> Token {
        Token::Operator(o)
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(""), vec![]);
        assert_eq!(tokenize("   \t\n"), vec![]);
    }

    #[test]
    fn bare_terms() {
        assert_eq!(tokenize("rust async"), vec![lit("rust"), lit("async")]);
    }

    #[test]
    fn keywords_case_insensitive() {
        assert_eq!(
            tokenize("a AND b Or not c"),
            vec![
                lit("a"),
                op(Operator::And),
                lit("b"),
                op(Operator::Or),
                op(Operator::Not),
                lit("c")
            ]
        );
    }

    #[test]
    fn null_keywords() {
        assert_eq!(
            tokenize("null? a set? b has c"),
            vec![
                op(Operator::Null),
                lit("a"),
                op(Operator::NotNull),
                lit("b"),
                op(Operator::NotNull),
                lit("c")
            ]
        );
    }

    #[test]
    fn single_char_operators() {
        assert_eq!(
            tokenize("& | ! ~ = < >"),
            vec![
                op(Operator::And),
                op(Operator::Or),
                op(Operator::Not),
                op(Operator::Like),
                op(Operator::Eq),
                op(Operator::Lt),
                op(Operator::Gt)
            ]
        );
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(
            tokenize("&& || !~ == != <> >= <="),
            vec![
                op(Operator::And),
                op(Operator::Or),
                op(Operator::Unlike),
                op(Operator::Eq),
                op(Operator::Ne),
                op(Operator::Ne),
                op(Operator::Gte),
                op(Operator::Lte)
            ]
        );
    }

    #[test]
    fn comparison_without_spaces() {
        assert_eq!(
            tokenize("age>=18"),
            vec![lit("age"), op(Operator::Gte), lit("18")]
        );
        assert_eq!(
            tokenize("name!~foo"),
            vec![lit("name"), op(Operator::Unlike), lit("foo")]
        );
    }

    #[test]
    fn unknown_pair_splits() {
        assert_eq!(
            tokenize("a =< b"),
            vec![lit("a"), op(Operator::Eq), op(Operator::Lt), lit("b")]
        );
    }

    #[test]
    fn structural_markers() {
        assert_eq!(
            tokenize("(a, b)"),
            vec![
                op(Operator::LParen),
                lit("a"),
                op(Operator::Comma),
                lit("b"),
                op(Operator::RParen)
            ]
        );
    }

    #[test]
    fn dash_negates_at_token_start() {
        assert_eq!(
            tokenize("-deprecated"),
            vec![op(Operator::Not), lit("deprecated")]
        );
    }

    #[test]
    fn dash_inside_word_is_literal() {
        assert_eq!(
            tokenize("date > 2010-01-01"),
            vec![lit("date"), op(Operator::Gt), lit("2010-01-01")]
        );
    }

    #[test]
    fn quoted_literal() {
        assert_eq!(
            tokenize("name = \"John Doe\""),
            vec![lit("name"), op(Operator::Eq), lit("John Doe")]
        );
    }

    #[test]
    fn quoted_keyword_stays_literal() {
        assert_eq!(tokenize("\"and\""), vec![lit("and")]);
        assert_eq!(tokenize("\"\""), vec![lit("")]);
    }

    #[test]
    fn quoted_escape() {
        assert_eq!(tokenize(r#""say \"hi\"""#), vec![lit("say \"hi\"")]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(tokenize("\"open ended"), vec![lit("open ended")]);
    }

    #[test]
    fn non_ascii_words() {
        assert_eq!(tokenize("café=ü"), vec![lit("café"), op(Operator::Eq), lit("ü")]);
    }

    #[test]
    fn operator_categories() {
        assert!(Operator::And.is_logical_infix());
        assert!(!Operator::Not.is_logical_infix());
        assert!(Operator::NotNull.is_null_check());
        assert!(Operator::Unlike.is_comparison());
        assert!(!Operator::Comma.is_comparison());
    }

    #[test]
    fn token_display() {
        assert_eq!(op(Operator::Gte).to_string(), "gte");
        assert_eq!(lit("x y").to_string(), "\"x y\"");
    }
}
