//! Dotenv loading with first-writer-wins semantics.
//!
//! The `.env` format here is deliberately primitive, matching what firmware
//! developers actually keep next to their checkouts: one `KEY=VALUE` per
//! line, split on the first `=`, no quoting, no escaping, no comments.
//! Values already present in the process environment always win over file
//! contents, so CI can override a developer's local file without editing it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DotenvError {
    /// A non-blank line with no `=` separator. Carries the 1-based line
    /// number so the developer can find it.
    #[error("malformed line {line} in {path}: expected KEY=VALUE")]
    MissingDelimiter { path: PathBuf, line: usize },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse dotenv content into ordered key/value entries.
///
/// Blank lines are skipped. Whitespace is trimmed per line before splitting,
/// so trailing newlines never end up inside values.
pub fn parse(contents: &str, path: &Path) -> Result<Vec<(String, String)>, DotenvError> {
    let mut entries = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| DotenvError::MissingDelimiter {
                path: path.to_path_buf(),
                line: idx + 1,
            })?;
        entries.push((key.to_string(), value.to_string()));
    }
    Ok(entries)
}

/// Read and parse the dotenv file. A missing file is not an error; it is the
/// common case for CI builds that configure everything via the environment.
pub fn load(path: &Path) -> Result<Option<Vec<(String, String)>>, DotenvError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no dotenv file at {}, continuing without it", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(DotenvError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse(&contents, path).map(Some)
}

/// Select the entries that should be written, given a snapshot of the
/// current environment. Pure merge logic: an entry survives only when its
/// key is absent from the snapshot (first-writer-wins).
pub fn merge(
    entries: &[(String, String)],
    env_snapshot: &HashMap<String, String>,
) -> Vec<(String, String)> {
    entries
        .iter()
        .filter(|(key, _)| !env_snapshot.contains_key(key))
        .cloned()
        .collect()
}

/// Load the dotenv file and apply the surviving entries to the process
/// environment. Returns the number of variables actually set.
pub fn apply(path: &Path) -> Result<usize, DotenvError> {
    let Some(entries) = load(path)? else {
        return Ok(0);
    };

    let snapshot: HashMap<String, String> = std::env::vars().collect();
    let fresh = merge(&entries, &snapshot);
    for (key, value) in &fresh {
        debug!("dotenv: setting {}", key);
        std::env::set_var(key, value);
    }
    Ok(fresh.len())
}
