//! Implementation of `scoped tokens`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use scoped_query::{Token, tokenize};

use crate::cli::args::TokensCommand;

/// Prints the token stream for a query as a table.
pub fn run(cmd: &TokensCommand) -> ExitCode {
    let tokens = tokenize(&cmd.query);
    if tokens.is_empty() {
        println!("No tokens.");
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Kind", "Token"]);
    for (i, token) in tokens.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(kind(token)),
            Cell::new(text(token)),
        ]);
    }
    println!("{table}");

    ExitCode::SUCCESS
}

/// Short label for the kind of token.
fn kind(token: &Token) -> &'static str {
    if token.is_literal() {
        "literal"
    } else {
        "operator"
    }
}

/// Token text: the raw value for literals, the operator name otherwise.
fn text(token: &Token) -> String {
    match token {
        Token::Literal(value) => value.clone(),
        Token::Operator(op) => op.name().to_string(),
    }
}
