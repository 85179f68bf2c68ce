use super::DefinitionStore;
use rubyscope_api::models::Definition;
use std::collections::HashSet;
use tracing::warn;

impl DefinitionStore {
    /// Ancestor chain of the definition named `qualified_name`, empty if it is not indexed.
    pub fn ancestors_of(&self, qualified_name: &str) -> Vec<&Definition> {
        self.find_definition_by_qualified_name(qualified_name)
            .map(|definition| self.ancestors(definition))
            .unwrap_or_default()
    }

    /// Method-lookup order for `definition`.
    ///
    /// A class contributes itself and then each superclass (stopping at the
    /// first one that is not indexed); each of those bases is then expanded
    /// into `[prepends reversed, base, includes reversed]`. Mixins that cannot
    /// be found are skipped.
    pub(crate) fn ancestors<'s>(&'s self, definition: &'s Definition) -> Vec<&'s Definition> {
        self.bases(definition)
            .into_iter()
            .flat_map(|base| self.module_ancestors(base))
            .collect()
    }

    fn bases<'s>(&'s self, definition: &'s Definition) -> Vec<&'s Definition> {
        let mut bases = vec![definition];
        let mut seen: HashSet<String> = HashSet::from([definition.qualified_name().into_owned()]);

        let mut current = definition;
        while let Some(super_name) = current
            .as_class()
            .and_then(|class| class.super_class_qualified_name.as_deref())
        {
            let Some(super_class) = self.find_definition_by_qualified_name(super_name) else {
                break;
            };
            if !seen.insert(super_name.to_string()) {
                warn!(
                    class = %definition.qualified_name(),
                    repeated = super_name,
                    "superclass cycle, truncating ancestor chain"
                );
                break;
            }
            bases.push(super_class);
            current = super_class;
        }
        bases
    }

    fn module_ancestors<'s>(&'s self, definition: &'s Definition) -> Vec<&'s Definition> {
        let Some(module) = definition.as_module() else {
            return vec![definition];
        };
        let resolve = |names: &'s [String]| {
            names
                .iter()
                .rev()
                .filter_map(move |name| self.find_definition_by_qualified_name(name))
        };

        resolve(&module.prepended_module_qualified_names)
            .chain(std::iter::once(definition))
            .chain(resolve(&module.included_module_qualified_names))
            .collect()
    }
}
