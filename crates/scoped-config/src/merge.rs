//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence rules.

use std::path::PathBuf;

use crate::{
    Config, LogSettings, OutputSettings, ParserSettings,
    parse::{RawConfig, RawLogSettings, RawOutputSettings, RawParserSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar, the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut output = OutputSettings::default();
    let mut parser = ParserSettings::default();
    let mut log = LogSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.output {
            apply_raw_output(&mut output, raw);
        }
        if let Some(ref raw) = parsed.config.parser {
            apply_raw_parser(&mut parser, raw);
        }
        if let Some(ref raw) = parsed.config.log {
            apply_raw_log(&mut log, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    Config {
        output,
        parser,
        log,
        config_root,
    }
}

/// Applies raw output settings, overwriting any present values.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.format {
        result.format = v;
    }
}

/// Applies raw parser settings, overwriting any present values.
fn apply_raw_parser(result: &mut ParserSettings, raw: &RawParserSettings) {
    if let Some(v) = raw.simplify {
        result.simplify = v;
    }
}

/// Applies raw logging settings, overwriting any present values.
fn apply_raw_log(result: &mut LogSettings, raw: &RawLogSettings) {
    if let Some(v) = raw.level {
        result.level = v;
    }
}
