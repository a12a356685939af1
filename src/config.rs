//! Game configuration loading
//!
//! Settings come from an optional JSON file. A missing or unreadable file falls
//! back to the built-in defaults instead of failing.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::{BUILD_VERSION, MIN_DICTIONARY_VERSION, MIN_SUPPORTED_VERSION, Version};
use crate::schedule::ClassicMode;

/// Default location of the configuration file
const DEFAULT_CONFIG_PATH: &str = "config/salita.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`]
const CONFIG_PATH_ENV: &str = "SALITA_CONFIG_PATH";

/// Versions and enabled modes for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Stamped into every envelope this build writes
    pub build_version: Version,
    /// Older saves are reset instead of migrated
    pub min_supported_version: Version,
    /// Older cached dictionaries are ignored
    pub min_dictionary_version: Version,
    pub classic_modes: Vec<ClassicMode>,
    pub hex_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            build_version: BUILD_VERSION,
            min_supported_version: MIN_SUPPORTED_VERSION,
            min_dictionary_version: MIN_DICTIONARY_VERSION,
            classic_modes: ClassicMode::ALL.to_vec(),
            hex_enabled: true,
        }
    }
}

impl GameConfig {
    /// Load from `path`, or from the environment override / default location
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(resolve_config_path, Path::to_path_buf);
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        modes = config.classic_modes.len(),
                        hex = config.hex_enabled,
                        "loaded game config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self, mode: ClassicMode) -> bool {
        self.classic_modes.contains(&mode)
    }
}

/// JSON representation of the configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    min_supported_version: Option<Version>,
    min_dictionary_version: Option<Version>,
    classic_modes: Option<Vec<ClassicMode>>,
    hex_enabled: Option<bool>,
}

impl From<RawConfig> for GameConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            build_version: defaults.build_version,
            min_supported_version: value
                .min_supported_version
                .unwrap_or(defaults.min_supported_version),
            min_dictionary_version: value
                .min_dictionary_version
                .unwrap_or(defaults.min_dictionary_version),
            classic_modes: value.classic_modes.unwrap_or(defaults.classic_modes),
            hex_enabled: value.hex_enabled.unwrap_or(defaults.hex_enabled),
        }
    }
}

/// Resolve the configuration path taking the environment override into account
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
