//! Settings for one injection run.
//!
//! Settings live in an optional `fwenv.toml` next to the firmware checkout.
//! Every field has a default matching the historical behavior, so the file
//! only exists when a project deviates from it (different variable names, an
//! asset pipeline, and so on). A missing file is normal; a malformed file is
//! an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SETTINGS_FILE: &str = "fwenv.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Dotenv file read for local credentials, relative to the project dir.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Environment variable holding the WLAN SSID.
    #[serde(default = "default_ssid_var")]
    pub ssid_var: String,

    /// Environment variable holding the WLAN PSK.
    #[serde(default = "default_psk_var")]
    pub psk_var: String,

    /// Asset-generation command (program plus arguments). Empty: no asset
    /// step.
    #[serde(default)]
    pub assets_command: Vec<String>,

    /// Whether to query git for version/commit metadata.
    #[serde(default = "default_git_metadata")]
    pub git_metadata: bool,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_ssid_var() -> String {
    "PLATFORMIO_WLAN_SSID".to_string()
}

fn default_psk_var() -> String {
    "PLATFORMIO_WLAN_PSK".to_string()
}

fn default_git_metadata() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            ssid_var: default_ssid_var(),
            psk_var: default_psk_var(),
            assets_command: Vec::new(),
            git_metadata: default_git_metadata(),
        }
    }
}

impl Settings {
    /// Load settings from `fwenv.toml` in the project directory, falling
    /// back to defaults when the file does not exist.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(SETTINGS_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no {} found, using defaults", SETTINGS_FILE);
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}
