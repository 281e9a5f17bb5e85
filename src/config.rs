//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/akin/akin.toml`
//! 3. Environment variables: `AKIN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for akin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base file holding the knowledge tree (default: `<data_dir>/base.dat`)
    pub base_file: PathBuf,
    /// Default output file for graph exports
    pub graph_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_file: default_base_file(),
            graph_file: PathBuf::from("base.dot"),
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not
/// specified", so unset keys inherit the lower layer).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    base_file: Option<PathBuf>,
    graph_file: Option<PathBuf>,
}

/// Default location of the base file (`~/.local/share/akin/base.dat` style).
fn default_base_file() -> PathBuf {
    ProjectDirs::from("", "", "akin")
        .map(|dirs| dirs.data_dir().join("base.dat"))
        .unwrap_or_else(|| PathBuf::from("base.dat"))
}

/// Get the XDG config directory for akin.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "akin").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("akin.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        self.base_file = PathBuf::from(expand(&self.base_file));
        self.graph_file = PathBuf::from(expand(&self.graph_file));
    }

    /// Merge overlay config onto self: overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_file: overlay
                .base_file
                .clone()
                .unwrap_or_else(|| self.base_file.clone()),
            graph_file: overlay
                .graph_file
                .clone()
                .unwrap_or_else(|| self.graph_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/akin/akin.toml`
    /// 3. Environment variables: `AKIN_*` prefix
    pub fn load() -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply AKIN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("AKIN").separator("__"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("base_file") {
            settings.base_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("graph_file") {
            settings.graph_file = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# akin configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/akin/akin.toml
#   Env:    AKIN_* environment variables (explicit overrides)

# Base file holding the knowledge tree
# base_file = "~/.local/share/akin/base.dat"

# Default output file for graph exports
# graph_file = "base.dot"
"#
        .to_string()
    }
}

fn expand(path: &Path) -> String {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.into_owned())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load().expect("load defaults");
        assert!(!settings.base_file.as_os_str().is_empty());
        assert!(!settings.graph_file.as_os_str().is_empty());
    }

    #[test]
    fn given_default_settings_when_created_then_base_file_is_named_base_dat() {
        let settings = Settings::default();
        assert!(settings.base_file.ends_with("base.dat"));
        assert_eq!(settings.graph_file, PathBuf::from("base.dot"));
    }

    #[test]
    fn given_tilde_in_base_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            base_file: PathBuf::from("~/.akin/base.dat"),
            graph_file: PathBuf::from("$HOME/base.dot"),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(
            settings.base_file.to_string_lossy().starts_with(&home),
            "base_file should start with home dir: {}",
            settings.base_file.display()
        );
        assert!(
            settings.graph_file.to_string_lossy().starts_with(&home),
            "graph_file should expand $HOME: {}",
            settings.graph_file.display()
        );
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unset_fields_inherit() {
        let base = Settings::default();
        let overlay = RawSettings {
            base_file: Some(PathBuf::from("/tmp/animals.dat")),
            graph_file: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.base_file, PathBuf::from("/tmp/animals.dat"));
        assert_eq!(merged.graph_file, base.graph_file);
    }

    #[test]
    fn given_settings_when_rendering_toml_then_contains_both_keys() {
        let toml = Settings::default().to_toml().expect("render toml");
        assert!(toml.contains("base_file"));
        assert!(toml.contains("graph_file"));
    }
}
