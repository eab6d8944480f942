//! Configuration loading and management.

use std::path::{Path, PathBuf};

use aa_core::{DEFAULT_MAX_INPUT_BYTES, Policy};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Classifier preset used when no `--policy` flag is given.
    pub policy: Policy,

    /// Longest input, in bytes, handed to the classifier.
    pub max_input_bytes: usize,

    /// File extension picked up by `aa scan`.
    pub scan_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            scan_extension: "txt".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // AA_POLICY, AA_MAX_INPUT_BYTES, AA_SCAN_EXTENSION
        figment = figment.merge(Env::prefixed("AA_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for autoaction.
///
/// On Linux: `~/.config/autoaction`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("autoaction"))
}
