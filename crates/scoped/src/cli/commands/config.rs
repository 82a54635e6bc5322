//! Implementation of `scoped config`.

use std::process::ExitCode;

use scoped_config::discover_config_files;

use crate::cli::context::CommandContext;

/// Shows the config files in effect and the merged settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let files = discover_config_files(&ctx.cwd);
    if files.is_empty() {
        println!("# no config files found, using defaults");
    } else {
        println!("# config files (highest precedence first):");
        for path in &files {
            println!("#   {}", path.display());
        }
    }
    println!();
    print!("{}", ctx.config.settings_to_toml());
    ExitCode::SUCCESS
}
