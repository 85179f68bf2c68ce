use super::DefinitionStore;
use rubyscope_api::models::{Definition, UnqualifiedName};

const OBJECT: &str = "Object";
const BASIC_OBJECT: &str = "BasicObject";

impl DefinitionStore {
    /// Resolves a constant reference against the lexical nesting it was written in.
    ///
    /// Candidates are tried innermost scope first, the bare name last. If none
    /// is indexed the bare `chained_name` is returned as is, so a miss looks
    /// exactly like a top-level constant of that spelling.
    pub fn resolve_constant(&self, name: &UnqualifiedName) -> String {
        name.candidates()
            .into_iter()
            .find(|candidate| self.definitions_by_qualified_name.contains_key(candidate))
            .unwrap_or_else(|| name.chained_name.clone())
    }

    /// Fills the qualified mixin and superclass names of the given modules
    /// and classes from what extraction recorded.
    ///
    /// Lists that extraction left empty keep whatever qualified names the
    /// definition already carried.
    pub(super) fn resolve_namespaces(&mut self, qualified_names: &[String]) {
        for qualified_name in qualified_names {
            let Some(definition) = self.find_definition_by_qualified_name(qualified_name) else {
                continue;
            };
            let Some(module) = definition.as_module() else {
                continue;
            };

            let resolve_all = |names: &[UnqualifiedName]| -> Option<Vec<String>> {
                (!names.is_empty())
                    .then(|| names.iter().map(|name| self.resolve_constant(name)).collect())
            };
            let included = resolve_all(&module.included_module_unqualified_names);
            let prepended = resolve_all(&module.prepended_module_unqualified_names);
            let super_class = definition.as_class().and_then(|class| {
                match (&class.super_class_unqualified_name, &class.super_class_qualified_name) {
                    (Some(name), _) => Some(self.resolve_constant(name)),
                    (None, Some(_)) => None,
                    (None, None) => implicit_super_class(qualified_name).map(str::to_string),
                }
            });

            let Some(definition) = self.definitions_by_qualified_name.get_mut(qualified_name)
            else {
                continue;
            };
            if let Some(module) = definition.as_module_mut() {
                if let Some(included) = included {
                    module.included_module_qualified_names = included;
                }
                if let Some(prepended) = prepended {
                    module.prepended_module_qualified_names = prepended;
                }
            }
            if let (Some(super_class), Definition::Class(class)) =
                (super_class, definition)
            {
                class.super_class_qualified_name = Some(super_class);
            }
        }
    }
}

/// Superclass of a class written without one.
fn implicit_super_class(qualified_name: &str) -> Option<&'static str> {
    match qualified_name {
        BASIC_OBJECT => None,
        OBJECT => Some(BASIC_OBJECT),
        _ => Some(OBJECT),
    }
}

#[cfg(test)]
mod tests {
    use crate::store::DefinitionStore;
    use rubyscope_api::models::{ClassDefinition, Definition, ModuleDefinition, UnqualifiedName};

    fn store() -> DefinitionStore {
        let mut store = DefinitionStore::new();
        store.bulk_add(vec![
            Definition::from(ModuleDefinition::new("A")),
            ClassDefinition::new("A::Foo").into(),
            ClassDefinition::new("Foo").into(),
            ModuleDefinition::new("A::B").into(),
        ]);
        store
    }

    #[test]
    fn test_innermost_scope_wins() {
        let name = UnqualifiedName::new("Foo", vec!["A".into()]);
        assert_eq!(store().resolve_constant(&name), "A::Foo");
    }

    #[test]
    fn test_bare_name_when_nesting_misses() {
        let name = UnqualifiedName::new("Foo", vec!["Other".into()]);
        assert_eq!(store().resolve_constant(&name), "Foo");
    }

    #[test]
    fn test_chained_name_through_nesting() {
        let name = UnqualifiedName::new("B", vec!["A::Foo".into(), "A".into()]);
        assert_eq!(store().resolve_constant(&name), "A::B");
    }

    #[test]
    fn test_miss_returns_chained_name_unchanged() {
        let name = UnqualifiedName::new("Missing::Thing", vec!["A::B".into(), "A".into()]);
        assert_eq!(store().resolve_constant(&name), "Missing::Thing");
    }

    #[test]
    fn test_implicit_superclasses() {
        assert_eq!(super::implicit_super_class("Foo"), Some("Object"));
        assert_eq!(super::implicit_super_class("Object"), Some("BasicObject"));
        assert_eq!(super::implicit_super_class("BasicObject"), None);
    }
}
