use crate::domain::notification::Notification;
use crate::domain::use_case::ProjectConfig;
use crate::error::Result;
use std::path::Path;

pub mod tree_exporter;

/// Persistence for the use-case document.
pub trait ConfigStore {
    fn read(&self, path: &Path) -> Result<ProjectConfig>;
    fn write(&self, config: &ProjectConfig, path: &Path) -> Result<()>;
}

/// Source of the notification feed written by the analysis tool.
pub trait NotificationSource {
    fn load(&self, path: &Path) -> Result<Vec<Notification>>;
}
