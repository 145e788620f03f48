//! Use-case definitions and the project configuration that owns them.

use crate::error::{check_index, Result};
use tracing::debug;

/// Name given to a use case created without one.
pub const DEFAULT_USE_CASE_NAME: &str = "MyUseCase";
/// Signature given to a method added without one.
pub const DEFAULT_METHOD_SIGNATURE: &str = "void myMethod(T)";

/// A named application scenario and the method signatures it depends on.
///
/// Names are not required to be unique, and a method list may repeat a
/// signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseCaseDefinition {
    pub name: String,
    pub methods: Vec<String>,
}

impl UseCaseDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Append a signature, returning its position.
    pub fn add_method(&mut self, signature: impl Into<String>) -> usize {
        self.methods.push(signature.into());
        self.methods.len() - 1
    }

    pub fn remove_method(&mut self, index: usize) -> Result<String> {
        let index = check_index(index, self.methods.len())?;
        Ok(self.methods.remove(index))
    }

    pub fn set_method(&mut self, index: usize, signature: impl Into<String>) -> Result<()> {
        let index = check_index(index, self.methods.len())?;
        self.methods[index] = signature.into();
        Ok(())
    }
}

impl std::fmt::Display for UseCaseDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The persisted use-case configuration of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    project_directory: String,
    pub use_cases: Vec<UseCaseDefinition>,
}

impl ProjectConfig {
    /// Create a config with a normalized project directory.
    pub fn new(project_directory: &str) -> Self {
        let mut config = Self::default();
        config.set_project_directory(project_directory);
        config
    }

    /// Build a config exactly as stored, without normalizing the directory.
    pub(crate) fn from_parts(project_directory: String, use_cases: Vec<UseCaseDefinition>) -> Self {
        Self {
            project_directory,
            use_cases,
        }
    }

    pub fn project_directory(&self) -> &str {
        &self.project_directory
    }

    /// Set the project directory, appending `/` unless it already ends
    /// with a path separator. An empty value is stored as-is.
    pub fn set_project_directory(&mut self, dir: &str) {
        self.project_directory = normalize_directory(dir);
    }

    /// Append a use case, returning its position.
    pub fn add_use_case(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if self.use_cases.iter().any(|uc| uc.name == name) {
            debug!(name = %name, "adding use case with a duplicate name");
        }
        self.use_cases.push(UseCaseDefinition::new(name));
        self.use_cases.len() - 1
    }

    pub fn remove_use_case(&mut self, index: usize) -> Result<UseCaseDefinition> {
        let index = check_index(index, self.use_cases.len())?;
        Ok(self.use_cases.remove(index))
    }

    pub fn use_case(&self, index: usize) -> Result<&UseCaseDefinition> {
        let index = check_index(index, self.use_cases.len())?;
        Ok(&self.use_cases[index])
    }

    pub fn use_case_mut(&mut self, index: usize) -> Result<&mut UseCaseDefinition> {
        let index = check_index(index, self.use_cases.len())?;
        Ok(&mut self.use_cases[index])
    }

    pub fn rename_use_case(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.use_case_mut(index)?.name = name.into();
        Ok(())
    }
}

fn normalize_directory(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') || dir.ends_with('\\') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YukonError;

    #[test]
    fn test_directory_normalization() {
        assert_eq!(ProjectConfig::new("C:\\work\\proj").project_directory(), "C:\\work\\proj/");
        assert_eq!(ProjectConfig::new("C:\\work\\proj\\").project_directory(), "C:\\work\\proj\\");
        assert_eq!(ProjectConfig::new("/home/me/proj/").project_directory(), "/home/me/proj/");
        assert_eq!(ProjectConfig::new("/home/me/proj").project_directory(), "/home/me/proj/");
        assert_eq!(ProjectConfig::new("").project_directory(), "");
    }

    #[test]
    fn test_use_case_editing() {
        let mut config = ProjectConfig::new("/proj");
        let first = config.add_use_case("Create New File");
        let second = config.add_use_case(DEFAULT_USE_CASE_NAME);
        assert_eq!((first, second), (0, 1));

        config.rename_use_case(1, "Save File").unwrap();
        let uc = config.use_case_mut(1).unwrap();
        uc.add_method(DEFAULT_METHOD_SIGNATURE);
        uc.add_method("void FileIO::save(string)");
        uc.set_method(0, "void FileIO::flush()").unwrap();
        assert_eq!(uc.remove_method(1).unwrap(), "void FileIO::save(string)");

        let uc = config.use_case(1).unwrap();
        assert_eq!(uc.name, "Save File");
        assert_eq!(uc.methods, vec!["void FileIO::flush()"]);

        let removed = config.remove_use_case(0).unwrap();
        assert_eq!(removed.to_string(), "Create New File");
        assert_eq!(config.use_cases.len(), 1);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut config = ProjectConfig::default();
        config.add_use_case("Same");
        config.add_use_case("Same");
        let uc = config.use_case_mut(0).unwrap();
        uc.add_method("f()");
        uc.add_method("f()");
        assert_eq!(config.use_cases.len(), 2);
        assert_eq!(config.use_cases[0].methods.len(), 2);
    }

    #[test]
    fn test_stale_indices_rejected() {
        let mut config = ProjectConfig::default();
        assert!(matches!(
            config.use_case(0),
            Err(YukonError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(config.remove_use_case(3).is_err());
        assert!(config.rename_use_case(0, "x").is_err());

        config.add_use_case("A");
        let uc = config.use_case_mut(0).unwrap();
        assert!(uc.remove_method(0).is_err());
        assert!(uc.set_method(0, "x").is_err());
    }
}
