//! Per-project settings, read from an optional `yukon.toml`.

use crate::error::{Result, YukonError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Settings file looked up in the project directory.
pub const SETTINGS_FILE: &str = "yukon.toml";

/// What to do when the use-case document does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDocumentPolicy {
    /// Treat a missing document as an empty config (first run).
    #[default]
    Empty,
    /// Report the missing document as an I/O failure.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder under the project directory holding the tool's files.
    pub data_dir: String,
    /// Use-case document file name.
    pub document_file: String,
    /// Notification feed file name.
    pub feed_file: String,
    pub missing_document: MissingDocumentPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: "yukon".to_string(),
            document_file: "input.xml".to_string(),
            feed_file: "output.json".to_string(),
            missing_document: MissingDocumentPolicy::Empty,
        }
    }
}

impl Settings {
    /// Load `yukon.toml` from `project_dir`, or defaults if it is absent.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(SETTINGS_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| YukonError::io(&path, e))?;
        Self::from_toml(&content)
            .map_err(|e| YukonError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
