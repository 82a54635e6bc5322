//! Integration tests for scoped-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use scoped_config::{
    CONFIG_FILENAME, Config, ConfigError, LogLevel, OutputFormat, local_template,
};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    /// Owned temporary root.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config file in the given subdirectory and returns its path.
    fn write_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let path = self.create_dir(rel_dir).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_no_config_returns_default() {
    let env = TestEnv::new();
    let config = Config::load_from_files(&[]).unwrap();

    assert!(config.config_root.is_none());
    assert_eq!(config.output.format, OutputFormat::Tree);
    assert!(config.parser.simplify);

    // A root config with no settings also yields the defaults
    env.write_config("", "root = true\n");
    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.log.level, LogLevel::Warn);
}

#[test]
fn test_load_nested_configs() {
    let env = TestEnv::new();
    env.write_config(
        "",
        "root = true\n\n[output]\nformat = \"json\"\n\n[log]\nlevel = \"info\"\n",
    );
    env.write_config("project", "[output]\nformat = \"sexp\"\n");
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.output.format, OutputFormat::Sexp);
    assert_eq!(config.log.level, LogLevel::Info);
    assert!(config.parser.simplify);
    assert_eq!(
        config.config_root.as_deref(),
        Some(env.path().join("project").as_path())
    );
}

#[test]
fn test_load_invalid_config_reports_path() {
    let env = TestEnv::new();
    let path = env.write_config("", "root = true\n[parser]\nsimplify = \"maybe\"\n");

    let err = Config::load(env.path()).unwrap_err();

    match &err {
        ConfigError::ParseToml { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected ParseToml, got {other:?}"),
    }
    assert!(err.to_string().contains(CONFIG_FILENAME));
}

#[test]
fn test_template_config_loads_as_defaults() {
    let env = TestEnv::new();
    // The commented template cannot set root, so add it to keep HOME out of the picture.
    env.write_config("", &format!("root = true\n{}", local_template()));

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.output.format, OutputFormat::Tree);
    assert!(config.parser.simplify);
}

#[test]
fn test_settings_round_trip_through_toml() {
    let env = TestEnv::new();
    env.write_config(
        "",
        "root = true\n[output]\nformat = \"json\"\n[parser]\nsimplify = false\n",
    );
    let config = Config::load(env.path()).unwrap();

    let path = env.write_config("copy", &format!("root = true\n{}", config.settings_to_toml()));
    let reloaded = Config::load_from_files(&[path]).unwrap();

    assert_eq!(reloaded.output.format, OutputFormat::Json);
    assert!(!reloaded.parser.simplify);
}
