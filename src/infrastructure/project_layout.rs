use crate::config::{MissingDocumentPolicy, Settings};
use crate::error::{Result, YukonError};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved on-disk locations for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    project_root: PathBuf,
    document_path: PathBuf,
    feed_path: PathBuf,
    pub missing_document: MissingDocumentPolicy,
}

impl ProjectLayout {
    pub fn new(project_root: &Path, settings: &Settings) -> Self {
        let data_dir = project_root.join(&settings.data_dir);
        Self {
            project_root: project_root.to_path_buf(),
            document_path: data_dir.join(&settings.document_file),
            feed_path: data_dir.join(&settings.feed_file),
            missing_document: settings.missing_document,
        }
    }

    /// Layout from the project's `yukon.toml`, or defaults.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let settings = Settings::load(project_root)?;
        Ok(Self::new(project_root, &settings))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn feed_path(&self) -> &Path {
        &self.feed_path
    }

    /// Create the folder holding the document, if needed.
    pub fn ensure_data_dir(&self) -> Result<()> {
        match self.document_path.parent() {
            Some(dir) => fs::create_dir_all(dir).map_err(|e| YukonError::io(dir, e)),
            None => Ok(()),
        }
    }
}
