//! fwenv - pre-build environment injector for embedded firmware projects.
//!
//! Invoked by a build orchestrator before compilation, fwenv:
//! - seeds the process environment from an optional `.env` file
//!   (existing environment variables always win)
//! - runs an optional asset-generation subprocess
//! - derives the WLAN mode from the credentials it finds
//! - collects version metadata from git, degrading gracefully
//! - emits the resulting preprocessor definitions on stdout

pub mod assets;
pub mod config;
pub mod defines;
pub mod dotenv;
pub mod gitmeta;
pub mod wlan;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::path::Path;
use tracing::debug;

use config::Settings;
use defines::DefineSet;
use gitmeta::GitMetadata;
use wlan::Credentials;

/// Run the full injection pipeline for one build and return the
/// definition set to hand to the orchestrator.
pub fn inject(project_dir: &Path, settings: &Settings) -> Result<DefineSet> {
    let env_path = if settings.env_file.is_absolute() {
        settings.env_file.clone()
    } else {
        project_dir.join(&settings.env_file)
    };

    let applied = dotenv::apply(&env_path).context("failed to load dotenv file")?;
    debug!("dotenv: {} variable(s) applied", applied);

    assets::run(project_dir, &settings.assets_command);

    let creds = Credentials::from_env(&settings.ssid_var, &settings.psk_var);
    let git = settings
        .git_metadata
        .then(|| GitMetadata::collect(project_dir));
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    Ok(assemble(&creds, git.as_ref(), &timestamp))
}

/// Build the definition set from already-resolved inputs.
///
/// Credential defines are bare, matching how the original firmware consumed
/// them; version metadata is quoted so it lands in generated code as string
/// literals, with missing values rendered as empty strings rather than
/// dropped.
pub fn assemble(creds: &Credentials, git: Option<&GitMetadata>, timestamp: &str) -> DefineSet {
    let mut set = DefineSet::new();
    set.push_bare("WLAN_SSID", creds.ssid.clone());
    set.push_bare("WLAN_PSK", creds.psk.clone());
    set.push_bare("WLAN_MODE", Some(creds.mode().as_str().to_string()));

    if let Some(git) = git {
        set.push_quoted("FIRMWARE_VERSION", git.version.clone().unwrap_or_default());
        set.push_quoted(
            "FIRMWARE_COMMIT_HASH",
            git.commit.clone().unwrap_or_default(),
        );
    }
    set.push_quoted("FIRMWARE_BUILD_TIMESTAMP", timestamp);

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wlan::WlanMode;

    fn creds(ssid: Option<&str>, psk: Option<&str>) -> Credentials {
        Credentials {
            ssid: ssid.map(String::from),
            psk: psk.map(String::from),
        }
    }

    #[test]
    fn test_assemble_connect_mode_with_credentials() {
        let set = assemble(&creds(Some("mynet"), Some("secret")), None, "t");

        assert_eq!(set.get("WLAN_SSID").unwrap().value.as_deref(), Some("mynet"));
        assert_eq!(set.get("WLAN_PSK").unwrap().value.as_deref(), Some("secret"));
        assert_eq!(
            set.get("WLAN_MODE").unwrap().value.as_deref(),
            Some(WlanMode::Connect.as_str())
        );
    }

    #[test]
    fn test_assemble_ap_mode_without_credentials() {
        let set = assemble(&creds(None, None), None, "t");

        assert!(set.get("WLAN_SSID").unwrap().value.is_none());
        assert!(set.get("WLAN_PSK").unwrap().value.is_none());
        assert_eq!(set.get("WLAN_MODE").unwrap().value.as_deref(), Some("AP"));
    }

    #[test]
    fn test_assemble_missing_git_metadata_renders_empty_quoted() {
        let set = assemble(&creds(None, None), Some(&GitMetadata::default()), "t");

        let rendered = set.render_cflags();
        assert!(rendered.contains("-DFIRMWARE_VERSION=\\\"\\\""));
        assert!(rendered.contains("-DFIRMWARE_COMMIT_HASH=\\\"\\\""));
    }

    #[test]
    fn test_assemble_without_git_omits_version_defines() {
        let set = assemble(&creds(None, None), None, "t");
        assert!(set.get("FIRMWARE_VERSION").is_none());
        assert!(set.get("FIRMWARE_COMMIT_HASH").is_none());
        assert!(set.get("FIRMWARE_BUILD_TIMESTAMP").is_some());
    }

    #[test]
    fn test_assemble_real_git_metadata_is_quoted() {
        let git = GitMetadata {
            version: Some("v2.1.0".to_string()),
            commit: Some("deadbeef".to_string()),
        };
        let set = assemble(&creds(None, None), Some(&git), "t");

        let rendered = set.render_cflags();
        assert!(rendered.contains("-DFIRMWARE_VERSION=\\\"v2.1.0\\\""));
        assert!(rendered.contains("-DFIRMWARE_COMMIT_HASH=\\\"deadbeef\\\""));
    }
}
