use crate::config::MissingDocumentPolicy;
use crate::domain::callgraph::CallGraphNode;
use crate::domain::store::NotificationStore;
use crate::domain::use_case::{ProjectConfig, DEFAULT_METHOD_SIGNATURE, DEFAULT_USE_CASE_NAME};
use crate::error::Result;
use crate::infrastructure::ProjectLayout;
use crate::ports::{ConfigStore, NotificationSource};
use tracing::{debug, warn};

/// One project's editing session: the loaded use cases, the latest
/// notification feed, and whether edits have happened since that feed.
///
/// Every edit is written back to the document immediately. An edit only
/// takes effect in memory once that write succeeds.
pub struct ImpactSession<'a> {
    store: &'a dyn ConfigStore,
    source: &'a dyn NotificationSource,
    layout: ProjectLayout,
    config: ProjectConfig,
    notifications: NotificationStore,
    needs_rerun: bool,
}

impl<'a> ImpactSession<'a> {
    /// Write an empty document for the layout's project unless one exists.
    /// Returns whether a document was created. The missing-document policy
    /// does not apply here.
    pub fn init(store: &dyn ConfigStore, layout: &ProjectLayout) -> Result<bool> {
        if layout.document_path().exists() {
            return Ok(false);
        }
        let config = ProjectConfig::new(&layout.project_root().to_string_lossy());
        layout.ensure_data_dir()?;
        store.write(&config, layout.document_path())?;
        Ok(true)
    }

    /// Load the project's document. A missing document yields an empty
    /// config when the layout's policy allows it.
    pub fn open(
        store: &'a dyn ConfigStore,
        source: &'a dyn NotificationSource,
        layout: ProjectLayout,
    ) -> Result<Self> {
        let config = match store.read(layout.document_path()) {
            Ok(config) => config,
            Err(e) if e.is_not_found() && layout.missing_document == MissingDocumentPolicy::Empty => {
                warn!(
                    path = %layout.document_path().display(),
                    "No use-case document yet, starting empty"
                );
                ProjectConfig::new(&layout.project_root().to_string_lossy())
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            store,
            source,
            layout,
            config,
            notifications: NotificationStore::default(),
            needs_rerun: false,
        })
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Whether use cases changed since the last feed was loaded.
    pub fn needs_rerun(&self) -> bool {
        self.needs_rerun
    }

    pub fn save(&self) -> Result<()> {
        self.layout.ensure_data_dir()?;
        self.store.write(&self.config, self.layout.document_path())
    }

    /// Apply `change` to a copy, write it, then commit it. A failed change
    /// or write leaves the session untouched.
    fn edit<T>(&mut self, change: impl FnOnce(&mut ProjectConfig) -> Result<T>) -> Result<T> {
        let mut draft = self.config.clone();
        let out = change(&mut draft)?;
        self.layout.ensure_data_dir()?;
        self.store.write(&draft, self.layout.document_path())?;
        self.config = draft;
        self.needs_rerun = true;
        Ok(out)
    }

    pub fn set_project_directory(&mut self, dir: &str) -> Result<()> {
        self.edit(|config| {
            config.set_project_directory(dir);
            Ok(())
        })
    }

    /// Add a use case (named `MyUseCase` if `name` is `None`).
    pub fn create_use_case(&mut self, name: Option<&str>) -> Result<usize> {
        let name = name.unwrap_or(DEFAULT_USE_CASE_NAME).to_string();
        debug!(name = %name, "create use case");
        self.edit(|config| Ok(config.add_use_case(name)))
    }

    pub fn delete_use_case(&mut self, index: usize) -> Result<()> {
        debug!(index, "delete use case");
        self.edit(|config| config.remove_use_case(index).map(|_| ()))
    }

    pub fn rename_use_case(&mut self, index: usize, name: &str) -> Result<()> {
        debug!(index, name, "rename use case");
        self.edit(|config| config.rename_use_case(index, name))
    }

    /// Add a method (`void myMethod(T)` if `signature` is `None`).
    pub fn add_method(&mut self, use_case: usize, signature: Option<&str>) -> Result<usize> {
        let signature = signature.unwrap_or(DEFAULT_METHOD_SIGNATURE).to_string();
        debug!(use_case, signature = %signature, "add method");
        self.edit(|config| Ok(config.use_case_mut(use_case)?.add_method(signature)))
    }

    pub fn remove_method(&mut self, use_case: usize, index: usize) -> Result<()> {
        debug!(use_case, index, "remove method");
        self.edit(|config| config.use_case_mut(use_case)?.remove_method(index).map(|_| ()))
    }

    pub fn set_method(&mut self, use_case: usize, index: usize, signature: &str) -> Result<()> {
        debug!(use_case, index, signature, "set method");
        self.edit(|config| config.use_case_mut(use_case)?.set_method(index, signature))
    }

    /// Replace the notifications with the current feed. On failure the
    /// previous notifications are kept.
    pub fn reload_notifications(&mut self) -> Result<usize> {
        let loaded = self.source.load(self.layout.feed_path())?;
        self.notifications.replace_all(loaded);
        self.needs_rerun = false;
        Ok(self.notifications.len())
    }

    /// Tree for the notification at `index`; `None` if its path is empty.
    pub fn select(&self, index: isize) -> Result<Option<CallGraphNode>> {
        self.notifications.call_tree(index)
    }
}
