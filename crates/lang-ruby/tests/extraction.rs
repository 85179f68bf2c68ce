mod common;

use common::{document, names};
use rubyscope_api::models::{Definition, MethodKind, MethodType, UnqualifiedName};

const SOURCE: &str = r#"module A
  # A foo.
  #
  # Second paragraph.
  class Foo < Base
    include Bar, ::Qux
    prepend Baz

    VERSION = "1"

    # Counts things.
    # @param name [String] what to count
    # @param [Integer] limit
    # @return [Integer, nil]
    def size(name, limit = 10, *rest, key:, **opts, &blk); end

    def self.build; end

    # @return [String]
    attr_accessor :value

    class << self
      def create; end
      attr_reader :registry
    end

    def helper
      attr_reader :ignored
    end
  end
end

def top_level; end
"#;

fn definitions() -> Vec<Definition> {
    document(SOURCE).definitions().to_vec()
}

fn find<'a>(definitions: &'a [Definition], qualified_name: &str) -> &'a Definition {
    definitions
        .iter()
        .find(|definition| definition.qualified_name() == qualified_name)
        .unwrap_or_else(|| panic!("{qualified_name} not extracted"))
}

#[test]
fn test_extracts_every_declaration() {
    let definitions = definitions();
    assert_eq!(
        names(&definitions),
        vec![
            "A",
            "A::Foo",
            "A::Foo::VERSION",
            "A::Foo#size",
            "A::Foo.build",
            "A::Foo#value",
            "A::Foo#value=",
            "A::Foo.create",
            "A::Foo.registry",
            "A::Foo#helper",
            "Object#top_level",
        ]
    );
}

#[test]
fn test_class_records_references_as_written() {
    let definitions = definitions();
    let class = find(&definitions, "A::Foo").as_class().unwrap();
    assert_eq!(
        class.super_class_unqualified_name,
        Some(UnqualifiedName::new("Base", vec!["A".into()]))
    );
    assert_eq!(class.super_class_qualified_name, None);
    assert_eq!(
        class.module.included_module_unqualified_names,
        vec![
            UnqualifiedName::new("Bar", vec!["A::Foo".into(), "A".into()]),
            UnqualifiedName::new("Qux", vec![]),
        ]
    );
    assert_eq!(
        class.module.prepended_module_unqualified_names,
        vec![UnqualifiedName::new("Baz", vec!["A::Foo".into(), "A".into()])]
    );
    assert_eq!(
        class.module.constant.description.as_deref(),
        Some("A foo.\n\nSecond paragraph.")
    );
}

#[test]
fn test_method_signature_from_doc_tags() {
    let definitions = definitions();
    let method = find(&definitions, "A::Foo#size").as_method().unwrap();
    assert_eq!(method.kind, MethodKind::Instance);
    assert_eq!(method.namespace, "A::Foo");
    assert_eq!(method.description.as_deref(), Some("Counts things."));
    let params = "(String name, ?Integer limit, *rest, key:, **opts, &blk)";
    assert_eq!(
        method.types,
        vec![MethodType::new(params, "Integer"), MethodType::new(params, "nil")]
    );
    assert_eq!(method.parameters.len(), 2);
    assert_eq!(method.parameter("limit").unwrap().types, vec!["Integer"]);
}

#[test]
fn test_undocumented_method_is_untyped() {
    let definitions = definitions();
    let method = find(&definitions, "A::Foo.build").as_method().unwrap();
    assert_eq!(method.kind, MethodKind::Singleton);
    assert_eq!(method.types, vec![MethodType::new("()", "untyped")]);
    assert!(method.description.is_none());
}

#[test]
fn test_attribute_methods() {
    let definitions = definitions();
    let reader = find(&definitions, "A::Foo#value").as_method().unwrap();
    assert_eq!(reader.types, vec![MethodType::new("()", "String")]);
    let writer = find(&definitions, "A::Foo#value=").as_method().unwrap();
    assert_eq!(writer.types, vec![MethodType::new("(String value)", "String")]);

    let registry = find(&definitions, "A::Foo.registry").as_method().unwrap();
    assert_eq!(registry.kind, MethodKind::Singleton);
    assert!(
        !names(&definitions).contains(&"A::Foo#ignored".to_string()),
        "attr_reader inside a method body is not a declaration"
    );
}

#[test]
fn test_locations_point_into_the_document() {
    let definitions = definitions();
    let constant = find(&definitions, "A::Foo::VERSION");
    let location = constant.location().unwrap();
    assert_eq!(location.uri, "file:///test.rb");
    assert_eq!(location.range.begin.line, 9);
    assert_eq!(location.range.begin.column, 4);
    assert_eq!(constant.namespace(), "A::Foo");
}

#[test]
fn test_explicit_receiver_methods() {
    let doc = document("class Foo; end\ndef Foo.bar; end\n");
    assert_eq!(names(doc.definitions()), vec!["Foo", "Foo.bar"]);
}

#[test]
fn test_explicit_receiver_methods_inside_namespace() {
    let doc = document("module A\n  class Foo; end\n  def Foo.build; end\nend\n");
    assert_eq!(names(doc.definitions()), vec!["A", "A::Foo", "A::Foo.build"]);
}

#[test]
fn test_compact_and_rooted_names() {
    let doc = document("module A\n  class B::C; end\n  module ::D; end\nend\n");
    assert_eq!(names(doc.definitions()), vec!["A", "A::B::C", "D"]);
}
