//! Clap argument definitions for the `scoped` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use scoped_config::OutputFormat;

/// Parse an output format from a string.
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "scoped")]
#[command(about = "Parse and inspect scoped search queries")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `scoped parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Queries to parse (each argument is a separate query)
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Output format: tree, sexp or json [default: from config, else tree]
    #[arg(short = 'f', long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Print the tree exactly as parsed, without simplification
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for `scoped tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to tokenize
    pub query: String,
}

/// Arguments for `scoped init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global config (~/.scoped.toml) instead of local
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse queries and print their syntax trees
    #[command(after_help = "\
QUERY SYNTAX:
    rust                  Free-text term
    age > 18              Comparison (=, !=, <>, ~, !~, <, <=, >, >=)
    null? phone           Null check (also set? and has)
    a and b, a & b        Both must match
    a or b, a | b         Either may match
    not a, !a, -a         Negation
    (a or b) c            Grouping; juxtaposed expressions are ANDed
    \"John Doe\"            Quoted value")]
    Parse(ParseCommand),

    /// Show the token stream for a query
    Tokens(TokensCommand),

    /// Show effective configuration settings
    Config,

    /// Initialize a configuration file
    Init(InitCommand),
}
