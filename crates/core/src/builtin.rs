//! Seeding the store with the built-in library.

use crate::error::SnapshotError;
use crate::snapshot;
use rubyscope_api::models::Definition;
use std::path::{Path, PathBuf};
use tracing::info;

/// Source of the built-in definitions, consulted once before any document is indexed.
pub trait BuiltinLoader {
    fn load(&self) -> Result<Vec<Definition>, SnapshotError>;
}

/// The built-in library persisted as a snapshot file.
#[derive(Debug, Clone)]
pub struct BuiltinLibrary {
    path: PathBuf,
}

impl BuiltinLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_from(path: &Path) -> Result<Vec<Definition>, SnapshotError> {
        if !path.exists() {
            return Err(SnapshotError::Missing(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let definitions = snapshot::load(&bytes)?;
        info!(path = %path.display(), count = definitions.len(), "loaded built-in library");
        Ok(definitions)
    }

    pub fn write_to(path: &Path, definitions: &[Definition]) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, snapshot::dump(definitions)?)?;
        info!(path = %path.display(), count = definitions.len(), "wrote built-in library");
        Ok(())
    }
}

impl BuiltinLoader for BuiltinLibrary {
    fn load(&self) -> Result<Vec<Definition>, SnapshotError> {
        Self::load_from(&self.path)
    }
}

/// Definitions already in memory.
impl BuiltinLoader for Vec<Definition> {
    fn load(&self) -> Result<Vec<Definition>, SnapshotError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DefinitionStore;
    use rubyscope_api::models::{ClassDefinition, MethodDefinition};
    use tempfile::tempdir;

    #[test]
    fn test_file_round_trip_seeds_identical_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("builtin.snapshot");
        let definitions: Vec<Definition> = vec![
            ClassDefinition::new("Integer").inherit("Numeric").into(),
            MethodDefinition::instance("Integer", "succ")
                .returning("()", "Integer")
                .into(),
        ];
        BuiltinLibrary::write_to(&path, &definitions).unwrap();

        let mut store = DefinitionStore::new();
        store.bulk_add(BuiltinLibrary::new(&path).load().unwrap());
        for original in &definitions {
            let found = store
                .find_definition_by_qualified_name(&original.qualified_name())
                .unwrap();
            assert_eq!(found, original);
        }
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.snapshot");
        assert!(matches!(
            BuiltinLibrary::load_from(&path),
            Err(SnapshotError::Missing(p)) if p == path
        ));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.snapshot");
        std::fs::write(&path, b"garbage").unwrap();
        assert!(BuiltinLibrary::load_from(&path).is_err());
    }
}
