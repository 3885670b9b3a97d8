use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VerseKitError};

/// Name of the configuration file stored inside the `.versekit` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the file, inside the `.versekit` directory, holding user-added
/// cross references.
pub const CROSS_REFERENCES_FILENAME: &str = "cross_references.json";

/// Name of the hidden directory used to store VerseKit settings.
pub const VERSEKIT_DIR: &str = ".versekit";

/// Default directory, relative to the project root, holding `<id>.json`
/// translation documents.
pub const DEFAULT_DATA_DIR: &str = "bible_data";

/// Configuration for a VerseKit project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerseKitConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Directory containing translation JSON documents.
    pub data_dir: String,
    /// Translation used when none is given.
    pub default_translation: String,
    /// Upper bound for loading one translation, in milliseconds. `0`
    /// disables the bound.
    pub load_timeout_ms: u64,
    /// Maximum number of search hits returned.
    pub search_limit: usize,
    /// Base URL of a remote JSON source. Takes precedence over `data_dir`.
    pub remote_url: Option<String>,
}

impl Default for VerseKitConfig {
    fn default() -> Self {
        Self {
            version: 1,
            data_dir: DEFAULT_DATA_DIR.to_string(),
            default_translation: "kjv".to_string(),
            load_timeout_ms: 10_000,
            search_limit: 20,
            remote_url: None,
        }
    }
}

impl VerseKitConfig {
    /// The load timeout, if enabled.
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_ms > 0).then(|| Duration::from_millis(self.load_timeout_ms))
    }
}

/// Returns the path to the `.versekit` directory within the given project root.
pub fn get_versekit_dir(project_root: &Path) -> PathBuf {
    project_root.join(VERSEKIT_DIR)
}

/// Returns the path to the configuration file within the `.versekit` directory.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    get_versekit_dir(project_root).join(CONFIG_FILENAME)
}

/// Returns the path to the user cross-reference file.
pub fn get_cross_references_path(project_root: &Path) -> PathBuf {
    get_versekit_dir(project_root).join(CROSS_REFERENCES_FILENAME)
}

/// Loads the configuration from disk.
///
/// If the configuration file does not exist, returns a default configuration
/// with `data_dir` rooted at the given project root. A relative `data_dir`
/// in the file is resolved against the project root.
pub fn load_config(project_root: &Path) -> Result<VerseKitConfig> {
    let config_path = get_config_path(project_root);

    if !config_path.exists() {
        return Ok(VerseKitConfig {
            data_dir: project_root
                .join(DEFAULT_DATA_DIR)
                .to_string_lossy()
                .to_string(),
            ..VerseKitConfig::default()
        });
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| VerseKitError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let mut config: VerseKitConfig =
        serde_json::from_str(&contents).map_err(|e| VerseKitError::Config {
            message: format!(
                "failed to parse config file '{}': {}",
                config_path.display(),
                e
            ),
        })?;

    if Path::new(&config.data_dir).is_relative() {
        config.data_dir = project_root
            .join(&config.data_dir)
            .to_string_lossy()
            .to_string();
    }

    Ok(config)
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final location.
pub fn save_config(project_root: &Path, config: &VerseKitConfig) -> Result<()> {
    let versekit_dir = get_versekit_dir(project_root);
    fs::create_dir_all(&versekit_dir).map_err(|e| VerseKitError::Config {
        message: format!(
            "failed to create directory '{}': {}",
            versekit_dir.display(),
            e
        ),
    })?;

    let config_path = get_config_path(project_root);
    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| VerseKitError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| VerseKitError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| VerseKitError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}
