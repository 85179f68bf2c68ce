//! Document lifecycle on top of the store.
//!
//! Every lifecycle event reindexes through [`DefinitionStore::update_from`]
//! exactly once. The workspace is single-threaded: a mutation completes
//! before the next query is served.

use crate::builtin::BuiltinLoader;
use crate::document::Document;
use crate::error::SnapshotError;
use crate::inspector::NodeInspector;
use crate::plugin::LanguagePlugin;
use crate::store::DefinitionStore;
use rubyscope_api::models::Position;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct Workspace {
    store: DefinitionStore,
    documents: HashMap<String, Document>,
    plugin: Arc<dyn LanguagePlugin>,
}

impl Workspace {
    pub fn new(plugin: Arc<dyn LanguagePlugin>) -> Self {
        Self {
            store: DefinitionStore::new(),
            documents: HashMap::new(),
            plugin,
        }
    }

    /// Seeds the store with the built-in library. Call once, before any document.
    pub fn seed(&mut self, loader: &dyn BuiltinLoader) -> Result<usize, SnapshotError> {
        let definitions = loader.load()?;
        let count = definitions.len();
        self.store.bulk_add(definitions);
        Ok(count)
    }

    pub fn store(&self) -> &DefinitionStore {
        &self.store
    }

    pub fn plugin(&self) -> &Arc<dyn LanguagePlugin> {
        &self.plugin
    }

    pub fn open(&mut self, uri: &str, text: &str) {
        let document = Document::new(uri, text, self.plugin.clone());
        self.store.update_from(&document);
        self.documents.insert(uri.to_string(), document);
        debug!(%uri, "opened document");
    }

    /// Replaces the whole text of a document.
    pub fn change(&mut self, uri: &str, text: &str) {
        self.open(uri, text);
    }

    /// Indexes a file without keeping it open.
    pub fn index(&mut self, uri: &str, text: &str) {
        let document = Document::new(uri, text, self.plugin.clone());
        self.store.update_from(&document);
    }

    /// Drops the open buffer. Its definitions stay indexed.
    pub fn close(&mut self, uri: &str) -> Option<Document> {
        self.documents.remove(uri)
    }

    /// Forgets a file entirely.
    pub fn delete(&mut self, uri: &str) {
        self.documents.remove(uri);
        let removed = self.store.remove_uri(uri);
        debug!(%uri, removed, "deleted document");
    }

    pub fn document(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    /// Inspector for the innermost node at `position` in an open document.
    pub fn inspect_at(&self, uri: &str, position: Position) -> Option<NodeInspector<'_>> {
        let node = self.documents.get(uri)?.node_at(position)?;
        Some(NodeInspector::new(&self.store, node))
    }
}
