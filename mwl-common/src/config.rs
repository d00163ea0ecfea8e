//! Configuration loading and root folder resolution
//!
//! The root folder holds `mwl.db`. Resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MWL_ROOT_FOLDER` environment variable
//! 3. TOML config file (`~/.config/mwl/config.toml`)
//! 4. OS-dependent compiled default (fallback)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::Result;

/// Compiled per-platform defaults used when no other configuration is present.
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        // ~/.local/share/mwl on Linux, platform equivalents elsewhere
        let root_folder = dirs::data_local_dir()
            .map(|d| d.join("mwl"))
            .unwrap_or_else(|| PathBuf::from("./mwl_data"));

        Self {
            root_folder,
            log_level: "info".to_string(),
        }
    }
}

/// Optional TOML config file contents.
///
/// Missing or malformed files never abort startup; they degrade to defaults
/// with a warning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Load from the platform config path, tolerating absence.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path, tolerating absence and parse errors.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mwl").join("config.toml"))
    }
}

/// Resolves the root folder for a module following the priority order above.
pub struct RootFolderResolver {
    module_name: String,
    cli_override: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_override: None,
        }
    }

    /// Attach a command-line override (highest priority when present).
    pub fn with_cli_override(module_name: &str, cli_override: Option<PathBuf>) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_override,
        }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_override {
            info!("{}: root folder from command line: {}", self.module_name, path.display());
            return path.clone();
        }

        if let Ok(path) = std::env::var("MWL_ROOT_FOLDER") {
            info!("{}: root folder from MWL_ROOT_FOLDER: {}", self.module_name, path);
            return PathBuf::from(path);
        }

        if let Some(path) = TomlConfig::load().root_folder {
            info!("{}: root folder from config file: {}", self.module_name, path.display());
            return path;
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Ensures the resolved root folder exists and locates the database within it.
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("mwl.db")
    }
}
