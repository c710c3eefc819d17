use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::DEFAULT_BASE_URL;
use crate::utils::url::normalize_base_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Backend origin, e.g. "http://localhost:8000"
    pub base_url: Option<String>,
    /// Append every chat message to this file
    pub transcript_log: Option<String>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Effective backend URL: command-line override, then config file, then default.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        let chosen = cli_override
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .or_else(|| {
                self.base_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
            })
            .unwrap_or(DEFAULT_BASE_URL);
        normalize_base_url(chosen)
    }

    pub fn resolve_transcript_log(&self, cli_override: Option<&str>) -> Option<String> {
        cli_override
            .map(str::to_string)
            .or_else(|| self.transcript_log.clone())
            .filter(|path| !path.trim().is_empty())
    }
}
