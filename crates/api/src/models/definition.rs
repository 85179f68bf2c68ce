//! The indexed symbol model: constants, modules, classes and methods.

use super::naming::{
    SCOPE_SEPARATOR, constant_leaf_name, constant_namespace, join_constant, method_qualified_name,
};
use super::position::Location;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A constant reference as literally written, plus the lexical scopes enclosing it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct UnqualifiedName {
    /// e.g. `Bar::Baz`
    pub chained_name: String,
    /// Enclosing namespaces, innermost first.
    pub module_nesting: Vec<String>,
}

impl UnqualifiedName {
    pub fn new(chained_name: impl Into<String>, module_nesting: Vec<String>) -> Self {
        Self {
            chained_name: chained_name.into(),
            module_nesting,
        }
    }

    /// Resolution candidates, innermost scope first and the bare name last.
    pub fn candidates(&self) -> Vec<String> {
        self.module_nesting
            .iter()
            .map(|scope| join_constant(scope, &self.chained_name))
            .chain(std::iter::once(self.chained_name.clone()))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ConstantDefinition {
    pub qualified_name: String,
    pub description: Option<String>,
    pub location: Option<Location>,
}

impl ConstantDefinition {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            description: None,
            location: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// The leaf name, e.g. `C` for `A::B::C`.
    pub fn name(&self) -> &str {
        constant_leaf_name(&self.qualified_name)
    }

    pub fn namespace(&self) -> &str {
        constant_namespace(&self.qualified_name)
    }
}

/// A module, with the mixins it declares.
///
/// The `*_unqualified_names` lists are what extraction saw in source; the
/// `*_qualified_names` lists are filled by the store's resolution pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ModuleDefinition {
    pub constant: ConstantDefinition,
    #[serde(default)]
    pub included_module_qualified_names: Vec<String>,
    #[serde(default)]
    pub included_module_unqualified_names: Vec<UnqualifiedName>,
    #[serde(default)]
    pub prepended_module_qualified_names: Vec<String>,
    #[serde(default)]
    pub prepended_module_unqualified_names: Vec<UnqualifiedName>,
}

impl ModuleDefinition {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self::from_constant(ConstantDefinition::new(qualified_name))
    }

    pub fn from_constant(constant: ConstantDefinition) -> Self {
        Self {
            constant,
            included_module_qualified_names: Vec::new(),
            included_module_unqualified_names: Vec::new(),
            prepended_module_qualified_names: Vec::new(),
            prepended_module_unqualified_names: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.constant.qualified_name
    }

    pub fn include(mut self, qualified_name: impl Into<String>) -> Self {
        self.included_module_qualified_names
            .push(qualified_name.into());
        self
    }

    pub fn prepend(mut self, qualified_name: impl Into<String>) -> Self {
        self.prepended_module_qualified_names
            .push(qualified_name.into());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ClassDefinition {
    pub module: ModuleDefinition,
    pub super_class_qualified_name: Option<String>,
    pub super_class_unqualified_name: Option<UnqualifiedName>,
}

impl ClassDefinition {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self::from_module(ModuleDefinition::new(qualified_name))
    }

    pub fn from_module(module: ModuleDefinition) -> Self {
        Self {
            module,
            super_class_qualified_name: None,
            super_class_unqualified_name: None,
        }
    }

    pub fn qualified_name(&self) -> &str {
        self.module.qualified_name()
    }

    pub fn inherit(mut self, qualified_name: impl Into<String>) -> Self {
        self.super_class_qualified_name = Some(qualified_name.into());
        self
    }

    pub fn include(mut self, qualified_name: impl Into<String>) -> Self {
        self.module = self.module.include(qualified_name);
        self
    }

    pub fn prepend(mut self, qualified_name: impl Into<String>) -> Self {
        self.module = self.module.prepend(qualified_name);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Instance,
    Singleton,
}

impl MethodKind {
    pub fn is_singleton(self) -> bool {
        matches!(self, MethodKind::Singleton)
    }
}

/// One signature of a method. Overloads are modeled as several entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodType {
    pub parameters_string: String,
    pub return_type: String,
}

impl MethodType {
    pub fn new(parameters_string: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            parameters_string: parameters_string.into(),
            return_type: return_type.into(),
        }
    }
}

/// A named parameter with its declared types.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodParameter {
    pub name: String,
    pub types: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodDefinition {
    pub kind: MethodKind,
    pub method_name: String,
    /// Qualified name of the owning class or module. It need not be indexed itself.
    pub namespace: String,
    pub types: Vec<MethodType>,
    #[serde(default)]
    pub parameters: Vec<MethodParameter>,
    pub description: Option<String>,
    pub location: Option<Location>,
}

impl MethodDefinition {
    pub fn new(
        kind: MethodKind,
        namespace: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            method_name: method_name.into(),
            namespace: namespace.into(),
            types: Vec::new(),
            parameters: Vec::new(),
            description: None,
            location: None,
        }
    }

    pub fn instance(namespace: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self::new(MethodKind::Instance, namespace, method_name)
    }

    pub fn singleton(namespace: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self::new(MethodKind::Singleton, namespace, method_name)
    }

    pub fn returning(mut self, parameters_string: &str, return_type: &str) -> Self {
        self.types.push(MethodType::new(parameters_string, return_type));
        self
    }

    pub fn qualified_name(&self) -> String {
        method_qualified_name(&self.namespace, &self.method_name, self.kind.is_singleton())
    }

    pub fn return_types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.return_type.as_str())
    }

    pub fn parameter(&self, name: &str) -> Option<&MethodParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Human-readable signatures, e.g. `String#sub(pattern, replacement) -> String`.
    pub fn signatures(&self) -> Vec<String> {
        let qualified_name = self.qualified_name();
        self.types
            .iter()
            .map(|t| format!("{}{} -> {}", qualified_name, t.parameters_string, t.return_type))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Definition {
    Constant(ConstantDefinition),
    Module(ModuleDefinition),
    Class(ClassDefinition),
    Method(MethodDefinition),
}

impl Definition {
    /// The globally unique key of this definition.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        match self {
            Definition::Constant(c) => Cow::Borrowed(c.qualified_name.as_str()),
            Definition::Module(m) => Cow::Borrowed(m.qualified_name()),
            Definition::Class(c) => Cow::Borrowed(c.qualified_name()),
            Definition::Method(m) => Cow::Owned(m.qualified_name()),
        }
    }

    fn constant(&self) -> Option<&ConstantDefinition> {
        match self {
            Definition::Constant(c) => Some(c),
            Definition::Module(m) => Some(&m.constant),
            Definition::Class(c) => Some(&c.module.constant),
            Definition::Method(_) => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Definition::Method(m) => m.description.as_deref(),
            _ => self.constant().and_then(|c| c.description.as_deref()),
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Definition::Method(m) => m.location.as_ref(),
            _ => self.constant().and_then(|c| c.location.as_ref()),
        }
    }

    /// URI of the document that declared this definition, if any.
    pub fn uri(&self) -> Option<&str> {
        self.location().map(|l| l.uri.as_str())
    }

    /// The namespace this definition lives in: the owner for methods, the
    /// enclosing scope for constants.
    pub fn namespace(&self) -> &str {
        match self {
            Definition::Method(m) => &m.namespace,
            _ => self
                .constant()
                .map(ConstantDefinition::namespace)
                .unwrap_or_default(),
        }
    }

    /// Leaf name: the method name for methods, last `::` segment for constants.
    pub fn name(&self) -> &str {
        match self {
            Definition::Method(m) => &m.method_name,
            _ => self.constant().map(ConstantDefinition::name).unwrap_or_default(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Definition::Constant(_) => "constant",
            Definition::Module(_) => "module",
            Definition::Class(_) => "class",
            Definition::Method(m) if m.kind.is_singleton() => "singleton method",
            Definition::Method(_) => "instance method",
        }
    }

    /// Constants, modules and classes are all constants.
    pub fn is_constant(&self) -> bool {
        self.constant().is_some()
    }

    /// The module part of a module or class definition.
    pub fn as_module(&self) -> Option<&ModuleDefinition> {
        match self {
            Definition::Module(m) => Some(m),
            Definition::Class(c) => Some(&c.module),
            _ => None,
        }
    }

    pub fn as_module_mut(&mut self) -> Option<&mut ModuleDefinition> {
        match self {
            Definition::Module(m) => Some(m),
            Definition::Class(c) => Some(&mut c.module),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDefinition> {
        match self {
            Definition::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDefinition> {
        match self {
            Definition::Method(m) => Some(m),
            _ => None,
        }
    }
}

impl From<ConstantDefinition> for Definition {
    fn from(value: ConstantDefinition) -> Self {
        Definition::Constant(value)
    }
}

impl From<ModuleDefinition> for Definition {
    fn from(value: ModuleDefinition) -> Self {
        Definition::Module(value)
    }
}

impl From<ClassDefinition> for Definition {
    fn from(value: ClassDefinition) -> Self {
        Definition::Class(value)
    }
}

impl From<MethodDefinition> for Definition {
    fn from(value: MethodDefinition) -> Self {
        Definition::Method(value)
    }
}

/// Splits a chained name like `A::B::C` into its segments.
pub fn chained_name_segments(chained_name: &str) -> impl Iterator<Item = &str> {
    chained_name
        .split(SCOPE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}
