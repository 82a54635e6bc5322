//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use scoped_config::OutputFormat;
use scoped_query::Node;
use serde::Serialize;

/// JSON output for a single parsed query.
#[derive(Serialize)]
struct JsonQueryTree<'a> {
    /// The original query string.
    query: &'a str,
    /// Parsed tree.
    ast: &'a Node,
}

/// JSON output for `scoped parse`.
#[derive(Serialize)]
struct JsonParseOutput<'a> {
    /// Trees grouped by query.
    queries: Vec<JsonQueryTree<'a>>,
}

/// Prints parsed trees in the requested format.
///
/// Tree output gets a `# query` heading per tree when more than one query was given.
pub fn print_trees(trees: &[(&str, Node)], format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Json => {
            let json_output = JsonParseOutput {
                queries: trees
                    .iter()
                    .map(|(query, ast)| JsonQueryTree { query: *query, ast })
                    .collect(),
            };
            match serde_json::to_string_pretty(&json_output) {
                Ok(json_str) => println!("{json_str}"),
                Err(e) => {
                    eprintln!("error: failed to serialize JSON: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        OutputFormat::Sexp => {
            for (_, node) in trees {
                println!("{}", node.to_sexp());
            }
        }
        OutputFormat::Tree => {
            let multiple = trees.len() > 1;
            for (i, (query, node)) in trees.iter().enumerate() {
                if multiple {
                    if i > 0 {
                        println!();
                    }
                    println!("# {query}");
                }
                print!("{node}");
            }
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_groups_by_query() {
        let node = Node::leaf("a");
        let output = JsonParseOutput {
            queries: vec![JsonQueryTree {
                query: "a",
                ast: &node,
            }],
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["queries"][0]["query"], "a");
        assert_eq!(value["queries"][0]["ast"]["type"], "leaf");
        assert_eq!(value["queries"][0]["ast"]["value"], "a");
    }
}
