//! Source-control metadata via git subprocess calls.
//!
//! Both lookups degrade gracefully: a missing git binary, a checkout that is
//! not a repository, or a repository with no tags all yield `None` and a
//! warning, never a failed build. Release pipelines get real values; a
//! tarball build gets empty-string defines.

use std::path::Path;
use std::process::Command;
use tracing::warn;

/// Version metadata for one build, as far as git could provide it.
#[derive(Debug, Clone, Default)]
pub struct GitMetadata {
    /// Latest reachable tag (`git describe --tags --abbrev=0`).
    pub version: Option<String>,
    /// Full commit hash of HEAD (`git rev-parse HEAD`).
    pub commit: Option<String>,
}

impl GitMetadata {
    /// Run both git queries in the given checkout directory.
    pub fn collect(dir: &Path) -> Self {
        Self {
            version: git_stdout(dir, &["describe", "--tags", "--abbrev=0"]),
            commit: git_stdout(dir, &["rev-parse", "HEAD"]),
        }
    }
}

/// Run a git command and return its trimmed stdout, or `None` on any
/// failure (spawn error, non-zero exit, empty output).
fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    let output = match Command::new("git").args(args).current_dir(dir).output() {
        Ok(output) => output,
        Err(err) => {
            warn!("git {}: failed to run: {}", args.join(" "), err);
            return None;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!("git {}: {}", args.join(" "), stderr.trim());
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        None
    } else {
        Some(stdout)
    }
}
