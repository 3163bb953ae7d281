//! Application configuration for GuideForge.
//!
//! User config lives at `~/.guideforge/guideforge.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};
use crate::types::Difficulty;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "guideforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".guideforge";

// ---------------------------------------------------------------------------
// Config structs (matching guideforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Transformation policy.
    #[serde(default)]
    pub transform: TransformConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Root directory holding the legacy content tree.
    #[serde(default = "default_content_root")]
    pub content_root: String,

    /// Maximum concurrent guide loads during catalog builds.
    #[serde(default = "default_catalog_concurrency")]
    pub catalog_concurrency: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            catalog_concurrency: default_catalog_concurrency(),
        }
    }
}

fn default_content_root() -> String {
    "content".into()
}
fn default_catalog_concurrency() -> u32 {
    8
}

/// `[transform]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Difficulty assigned when no context declares one. Policy knob, not
    /// inference; the legacy material gives no basis to guess further.
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,

    /// Estimated study minutes per content item.
    #[serde(default = "default_minutes_per_item")]
    pub minutes_per_item: u32,

    /// Floor for the study-time estimate, so stub guides still report a
    /// nonzero session length.
    #[serde(default = "default_minimum_study_minutes")]
    pub minimum_study_minutes: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            default_difficulty: default_difficulty(),
            minutes_per_item: default_minutes_per_item(),
            minimum_study_minutes: default_minimum_study_minutes(),
        }
    }
}

fn default_difficulty() -> Difficulty {
    Difficulty::Beginner
}
fn default_minutes_per_item() -> u32 {
    2
}
fn default_minimum_study_minutes() -> u32 {
    5
}

// ---------------------------------------------------------------------------
// Transform options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime transformation policy consumed by the transformer and assembler.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Difficulty fallback when no context declares one.
    pub default_difficulty: Difficulty,
    /// Estimated study minutes per content item.
    pub minutes_per_item: u32,
    /// Floor for the study-time estimate.
    pub minimum_study_minutes: u32,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for TransformOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_difficulty: config.transform.default_difficulty,
            minutes_per_item: config.transform.minutes_per_item,
            minimum_study_minutes: config.transform.minimum_study_minutes,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.guideforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GuideError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.guideforge/guideforge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does
/// not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|e| GuideError::unreadable(path, e))?;

    toml::from_str(&content)
        .map_err(|e| GuideError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| GuideError::config(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GuideError::config(e.to_string()))?;

    std::fs::write(&path, content)
        .map_err(|e| GuideError::config(format!("cannot write {}: {e}", path.display())))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("content_root"));
        assert!(toml_str.contains("default_difficulty"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.catalog_concurrency, 8);
        assert_eq!(parsed.transform.default_difficulty, Difficulty::Beginner);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
content_root = "/srv/guides"

[transform]
default_difficulty = "intermediate"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.content_root, "/srv/guides");
        assert_eq!(config.defaults.catalog_concurrency, 8);
        assert_eq!(config.transform.default_difficulty, Difficulty::Intermediate);
        assert_eq!(config.transform.minutes_per_item, 2);
    }

    #[test]
    fn transform_options_from_app_config() {
        let app = AppConfig::default();
        let opts = TransformOptions::from(&app);
        assert_eq!(opts.default_difficulty, Difficulty::Beginner);
        assert_eq!(opts.minutes_per_item, 2);
        assert_eq!(opts.minimum_study_minutes, 5);
    }
}
