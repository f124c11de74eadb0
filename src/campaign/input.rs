//! Campaign input loaders.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CredprobeError, Result};

/// One username/password pair from a credentials file.
///
/// Keys missing from the JSON deserialize to `None` and flow through to the
/// classifier unvalidated; absent values fill the form as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialPair {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Load a JSON array of `{"username": ..., "password": ...}` objects.
pub fn load_credential_pairs(path: &Path) -> Result<Vec<CredentialPair>> {
    if !path.exists() {
        return Err(CredprobeError::InputNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| CredprobeError::MalformedInput(path.display().to_string(), e.to_string()))
}

/// Load a newline-delimited usernames file. Blank lines and `#` comment
/// lines are skipped; nothing else is normalized away.
pub fn load_usernames(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(CredprobeError::InputNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}
