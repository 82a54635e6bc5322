//! Implementation of `scoped parse`.

use std::process::ExitCode;

use scoped_query::{Node, ParseError, parse_tokens, parse_tokens_unsimplified, tokenize};
use tracing::info;

use crate::cli::{args::ParseCommand, context::CommandContext, output};

/// Parses each query and prints its tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let format = cmd.format.unwrap_or(ctx.config.output.format);
    let simplify = ctx.config.parser.simplify && !cmd.raw;

    let mut parsed = Vec::with_capacity(cmd.queries.len());
    for query in &cmd.queries {
        match parse_query(query, simplify) {
            Ok(node) => parsed.push((query.as_str(), node)),
            Err(e) => {
                eprintln!("error: {e}");
                eprintln!("  in query: {query}");
                return ExitCode::FAILURE;
            }
        }
    }

    info!(queries = parsed.len(), %format, simplify, "parsed queries");
    output::print_trees(&parsed, format)
}

/// Tokenizes and parses a single query.
fn parse_query(query: &str, simplify: bool) -> Result<Node, ParseError> {
    let tokens = tokenize(query);
    if simplify {
        parse_tokens(tokens)
    } else {
        parse_tokens_unsimplified(tokens)
    }
}
