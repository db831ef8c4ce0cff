//! Settings loading and saving.
//!
//! Settings live in a small JSON file. Missing keys fall back to the defaults,
//! so a file only needs to mention what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Header lines recognized out of the box.
pub const DEFAULT_SOURCE_HEADERS: &[&str] = &["Quellen", "Sources", "Citations:"];

/// User configuration for the rewriter and its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Complete lines that mark the start of the sources section
    pub source_headers: Vec<String>,
    /// Use the whole document when no selection is given
    #[serde(alias = "autoSelectOnMobile")]
    pub auto_select_all: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_headers: DEFAULT_SOURCE_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            auto_select_all: true,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses settings from JSON text. Blank text yields the defaults.
    pub fn from_json(content: &str) -> Result<Settings, SettingsError> {
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Writes settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        fs::write(path, data)?;
        Ok(())
    }

    /// The header list in its editable form, one header per line.
    pub fn headers_text(&self) -> String {
        self.source_headers.join("\n")
    }
}

/// Parses the newline-separated header list.
///
/// Trailing whitespace at the end of the whole text is dropped and blank lines
/// are skipped. Each remaining line is kept as typed, including any
/// surrounding spaces.
///
/// # Examples
///
/// ```
/// use cite_links::settings::parse_headers;
///
/// assert_eq!(parse_headers("Sources\n\nReferences\n"), vec!["Sources", "References"]);
/// ```
pub fn parse_headers(text: &str) -> Vec<String> {
    text.trim_end()
        .split('\n')
        .filter(|item| !item.trim().is_empty())
        .map(|item| item.to_string())
        .collect()
}
