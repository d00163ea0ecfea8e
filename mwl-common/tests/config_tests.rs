//! Tests for configuration and root folder resolution
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests that
//! manipulate MWL_ROOT_FOLDER are marked with #[serial] so they run
//! sequentially, not in parallel.

use mwl_common::config::{CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
fn test_compiled_defaults_for_current_platform() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert_eq!(defaults.log_level, "info");

    let path_str = defaults.root_folder.to_string_lossy();
    assert!(path_str.contains("mwl"), "default root should be an mwl data dir");
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var("MWL_ROOT_FOLDER");

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    assert!(!root_folder.as_os_str().is_empty());
}

#[test]
#[serial]
fn test_resolver_env_var() {
    let test_path = "/tmp/mwl-test-env-folder";
    env::set_var("MWL_ROOT_FOLDER", test_path);

    let resolver = RootFolderResolver::new("test-module");
    let root_folder = resolver.resolve();

    env::remove_var("MWL_ROOT_FOLDER");

    assert_eq!(root_folder, PathBuf::from(test_path));
}

#[test]
#[serial]
fn test_cli_override_beats_env_var() {
    env::set_var("MWL_ROOT_FOLDER", "/tmp/mwl-from-env");

    let cli_path = PathBuf::from("/tmp/mwl-from-cli");
    let resolver = RootFolderResolver::with_cli_override("test-module", Some(cli_path.clone()));
    let root_folder = resolver.resolve();

    env::remove_var("MWL_ROOT_FOLDER");

    assert_eq!(root_folder, cli_path);
}

#[test]
fn test_toml_config_missing_file_degrades_to_default() {
    let config = TomlConfig::load_from(&PathBuf::from("/nonexistent/mwl/config.toml"));

    assert!(config.root_folder.is_none());
    assert!(config.port.is_none());
}

#[test]
fn test_toml_config_parses_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = \"/srv/mwl\"\nport = 9090\n").unwrap();

    let config = TomlConfig::load_from(&path);

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/mwl")));
    assert_eq!(config.port, Some(9090));
}

#[test]
fn test_toml_config_malformed_degrades_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [not toml").unwrap();

    let config = TomlConfig::load_from(&path);

    assert!(config.root_folder.is_none());
}

#[test]
fn test_initializer_creates_directory_and_locates_db() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("mwl-root");

    let initializer = RootFolderInitializer::new(root.clone());
    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert_eq!(initializer.database_path(), root.join("mwl.db"));
}
