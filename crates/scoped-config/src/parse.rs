//! Configuration file parsing.
//!
//! Parses individual `.scoped.toml` files into intermediate `RawConfig` structures that keep
//! every field optional until merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, LogLevel, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
    /// Parser section.
    pub parser: Option<RawParserSettings>,
    /// Logging section.
    pub log: Option<RawLogSettings>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Default tree format.
    pub format: Option<OutputFormat>,
}

/// Raw parser settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParserSettings {
    /// Whether to simplify parsed trees.
    pub simplify: Option<bool>,
}

/// Raw logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLogSettings {
    /// Minimum log level.
    pub level: Option<LogLevel>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.output.is_none());
        assert!(config.parser.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
root = true

[output]
format = "json"

[parser]
simplify = false

[log]
level = "debug"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
        assert_eq!(config.output.unwrap().format, Some(OutputFormat::Json));
        assert_eq!(config.parser.unwrap().simplify, Some(false));
        assert_eq!(config.log.unwrap().level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_parse_partial_section() {
        let config = parse_config_str("[output]\n", Path::new("test.toml")).unwrap();
        assert!(config.output.unwrap().format.is_none());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("this is not toml [", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_unknown_format_error() {
        let result = parse_config("[output]\nformat = \"yaml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_fields_ignored() {
        let config = parse_config("[output]\nformat = \"sexp\"\ncolor = true\n").unwrap();
        assert_eq!(config.output.unwrap().format, Some(OutputFormat::Sexp));
    }

    #[test]
    fn test_parse_config_file_not_found() {
        let result = parse_config_file(Path::new("/nonexistent/.scoped.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_is_root_config() {
        let dir = TestDir::new();
        let root = dir.create_root_config("a");
        let plain = dir.create_config("b");
        let broken = dir.create_config_with_content("c", "root = [");

        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
        assert!(!is_root_config(&broken));
        assert!(!is_root_config(&dir.path().join("missing.toml")));
    }
}
