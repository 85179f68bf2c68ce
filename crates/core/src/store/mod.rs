//! The definition index.
//!
//! Every definition is keyed by its qualified name; inserting an existing key
//! overwrites it. Definitions indexed from a document are also recorded under
//! the document URI so that the next edit can drop them before re-extracting.
//! Built-in definitions are added with [`DefinitionStore::bulk_add`], have no
//! owning URI and are never removed.

mod ancestors;
mod resolve;

use crate::document::Document;
use indexmap::IndexMap;
use rubyscope_api::models::{
    Definition, MethodKind, method_qualified_name, singleton_type_target,
};
use std::collections::HashMap;
use tracing::debug;

const CLASS: &str = "Class";
const MODULE: &str = "Module";

#[derive(Debug, Default)]
pub struct DefinitionStore {
    definitions_by_qualified_name: IndexMap<String, Definition>,
    qualified_names_by_uri: HashMap<String, Vec<String>>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.definitions_by_qualified_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions_by_qualified_name.is_empty()
    }

    /// All definitions, in insertion order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions_by_qualified_name.values()
    }

    /// URIs that currently own at least one definition.
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.qualified_names_by_uri.keys().map(String::as_str)
    }

    /// Unconditional insert/overwrite, without URI bookkeeping.
    pub fn bulk_add(&mut self, definitions: impl IntoIterator<Item = Definition>) {
        let before = self.len();
        for definition in definitions {
            self.insert(definition);
        }
        debug!(added = self.len() - before, total = self.len(), "bulk-added definitions");
    }

    fn insert(&mut self, definition: Definition) -> String {
        let qualified_name = definition.qualified_name().into_owned();
        self.definitions_by_qualified_name
            .insert(qualified_name.clone(), definition);
        qualified_name
    }

    /// Replaces everything previously indexed from `document`.
    ///
    /// Runs in three phases: drop the URI's definitions, insert the freshly
    /// extracted ones under the URI each declares, then resolve the constant
    /// references of the modules and classes just inserted.
    pub fn update_from(&mut self, document: &Document) {
        let uri = document.uri();
        let removed = self.remove_uri(uri);

        let mut inserted = 0;
        let mut namespaces = Vec::new();
        for definition in document.definitions() {
            let owner = definition.uri().unwrap_or(uri).to_string();
            let is_namespace = definition.as_module().is_some();
            let qualified_name = self.insert(definition.clone());
            if is_namespace {
                namespaces.push(qualified_name.clone());
            }
            self.qualified_names_by_uri
                .entry(owner)
                .or_default()
                .push(qualified_name);
            inserted += 1;
        }

        self.resolve_namespaces(&namespaces);
        debug!(%uri, removed, inserted, total = self.len(), "reindexed document");
    }

    /// Drops every definition recorded under `uri`, returning how many were removed.
    ///
    /// An entry that was since overwritten by a definition from another URI is kept.
    pub fn remove_uri(&mut self, uri: &str) -> usize {
        let Some(qualified_names) = self.qualified_names_by_uri.remove(uri) else {
            return 0;
        };
        let mut removed = 0;
        for qualified_name in qualified_names {
            let owned = self
                .definitions_by_qualified_name
                .get(&qualified_name)
                .is_some_and(|definition| definition.uri().is_none_or(|owner| owner == uri));
            if owned {
                self.definitions_by_qualified_name
                    .shift_remove(&qualified_name);
                removed += 1;
            }
        }
        removed
    }

    pub fn find_definition_by_qualified_name(&self, qualified_name: &str) -> Option<&Definition> {
        self.definitions_by_qualified_name.get(qualified_name)
    }

    /// Method lookup in dispatch order: the first ancestor of `namespace`
    /// that defines `method_name` wins.
    ///
    /// A namespace without a definition is searched directly. A singleton
    /// miss falls back to the instance methods every class object responds
    /// to (`Class`, then `Module`).
    pub fn find_method_definition_by(
        &self,
        method_name: &str,
        namespace: &str,
        singleton: bool,
    ) -> Option<&Definition> {
        let found = match self.find_definition_by_qualified_name(namespace) {
            Some(definition) => self.ancestors(definition).into_iter().find_map(|ancestor| {
                self.find_definition_by_qualified_name(&method_qualified_name(
                    &ancestor.qualified_name(),
                    method_name,
                    singleton,
                ))
            }),
            None => self.find_definition_by_qualified_name(&method_qualified_name(
                namespace,
                method_name,
                singleton,
            )),
        };

        found.or_else(|| {
            if !singleton {
                return None;
            }
            [CLASS, MODULE]
                .into_iter()
                .find_map(|meta| self.find_method_definition_by(method_name, meta, false))
        })
    }

    /// Every instance method callable on `type_name`, nearest ancestor first.
    ///
    /// `singleton<X>` is answered with the singleton methods of `X`.
    pub fn instance_method_definitions_of(&self, type_name: &str) -> Vec<&Definition> {
        match singleton_type_target(type_name) {
            Some(target) => self.singleton_method_definitions_of(target),
            None => self.methods_along_chain(type_name, MethodKind::Instance),
        }
    }

    /// Every singleton method callable on `type_name`, followed by the
    /// instance methods of `Class`.
    pub fn singleton_method_definitions_of(&self, type_name: &str) -> Vec<&Definition> {
        let mut methods = self.methods_along_chain(type_name, MethodKind::Singleton);
        methods.extend(self.methods_along_chain(CLASS, MethodKind::Instance));
        methods
    }

    fn methods_along_chain(&self, type_name: &str, kind: MethodKind) -> Vec<&Definition> {
        let chain: Vec<String> = match self.find_definition_by_qualified_name(type_name) {
            Some(definition) => self
                .ancestors(definition)
                .into_iter()
                .map(|ancestor| ancestor.qualified_name().into_owned())
                .collect(),
            None => vec![type_name.to_string()],
        };

        let mut rank: HashMap<&str, usize> = HashMap::new();
        for (index, name) in chain.iter().enumerate() {
            rank.entry(name.as_str()).or_insert(index);
        }

        let mut methods: Vec<(usize, &Definition)> = self
            .definitions()
            .filter_map(|definition| {
                let method = definition.as_method()?;
                if method.kind != kind {
                    return None;
                }
                rank.get(method.namespace.as_str())
                    .map(|&index| (index, definition))
            })
            .collect();
        methods.sort_by_key(|(index, _)| *index);
        methods.into_iter().map(|(_, definition)| definition).collect()
    }

    /// Constants (including modules and classes) declared directly inside `namespace`.
    pub fn constant_definitions_under(&self, namespace: &str) -> Vec<&Definition> {
        self.definitions()
            .filter(|definition| definition.is_constant() && definition.namespace() == namespace)
            .collect()
    }
}
