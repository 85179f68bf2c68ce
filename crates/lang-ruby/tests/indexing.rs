mod common;

use common::{names, position_of, workspace};
use rubyscope_core::ast::NodeKind;

const HIERARCHY: &str = r#"module M; end
module P; end
module FM; end

class Foo
  include FM
end

class Bar < Foo
  include M
  prepend P
end
"#;

#[test]
fn test_ancestors_from_source() {
    let mut ws = workspace();
    ws.open("file:///hierarchy.rb", HIERARCHY);

    assert_eq!(
        names(ws.store().ancestors_of("Bar")),
        vec!["P", "Bar", "M", "Foo", "FM", "Object", "BasicObject"]
    );
}

#[test]
fn test_constants_resolve_through_nesting() {
    let mut ws = workspace();
    ws.open(
        "file:///nested.rb",
        "module A\n  class Foo; end\n  class Bar < Foo; end\nend\nclass Baz < A::Foo; end\n",
    );

    let bar = ws.store().find_definition_by_qualified_name("A::Bar").unwrap();
    assert_eq!(
        bar.as_class().unwrap().super_class_qualified_name.as_deref(),
        Some("A::Foo")
    );
    let baz = ws.store().find_definition_by_qualified_name("Baz").unwrap();
    assert_eq!(
        baz.as_class().unwrap().super_class_qualified_name.as_deref(),
        Some("A::Foo")
    );
    let foo = ws.store().find_definition_by_qualified_name("A::Foo").unwrap();
    assert_eq!(
        foo.as_class().unwrap().super_class_qualified_name.as_deref(),
        Some("Object")
    );
}

#[test]
fn test_definitions_span_files() {
    let mut ws = workspace();
    ws.open("file:///a.rb", "class A\n  # @return [Integer]\n  def foo; end\nend\n");
    ws.open("file:///b.rb", "class B < A\nend\n");

    let found = ws.store().find_method_definition_by("foo", "B", false).unwrap();
    assert_eq!(found.qualified_name(), "A#foo");

    ws.change("file:///b.rb", "class B < A\n  def foo; end\nend\n");
    let found = ws.store().find_method_definition_by("foo", "B", false).unwrap();
    assert_eq!(found.qualified_name(), "B#foo");
}

#[test]
fn test_reindex_replaces_a_file() {
    let mut ws = workspace();
    ws.open("file:///a.rb", "class Foo\n  def old; end\nend\n");
    assert!(ws.store().find_definition_by_qualified_name("Foo#old").is_some());

    ws.change("file:///a.rb", "class Foo\n  def new_name; end\nend\n");
    assert!(ws.store().find_definition_by_qualified_name("Foo#old").is_none());
    assert!(ws.store().find_definition_by_qualified_name("Foo#new_name").is_some());

    ws.change("file:///a.rb", "class Foo\n");
    assert!(ws.store().find_definition_by_qualified_name("Foo").is_none());
    assert!(ws.store().find_definition_by_qualified_name("String").is_some());

    ws.delete("file:///a.rb");
    assert_eq!(ws.store().uris().count(), 0);
}

#[test]
fn test_constants_under_namespace() {
    let mut ws = workspace();
    ws.open(
        "file:///c.rb",
        "module A\n  X = 1\n  class B; end\n  module C\n    Y = 2\n  end\nend\n",
    );
    assert_eq!(
        names(ws.store().constant_definitions_under("A")),
        vec!["A::X", "A::B", "A::C"]
    );
}

const INFERENCE: &str = r#"class Animal
  # @return [String]
  def name; end

  # @return [Integer?]
  def age; end
end

class Dog < Animal
  def speak
    name
  end

  def self.create
    self
  end
end

dog = Dog.new
dog.name.length
"hi"
Dog
"#;

#[test]
fn test_inspect_literal() {
    let mut ws = workspace();
    ws.open("file:///i.rb", INFERENCE);
    let position = position_of(INFERENCE, "\"hi\"", 0, 1);
    let inspector = ws.inspect_at("file:///i.rb", position).unwrap();
    assert_eq!(inspector.node().kind(), NodeKind::Str);
    assert_eq!(inspector.return_types().into_iter().collect::<Vec<_>>(), vec!["String"]);
}

#[test]
fn test_inspect_implicit_self_call() {
    let mut ws = workspace();
    ws.open("file:///i.rb", INFERENCE);
    let position = position_of(INFERENCE, "    name\n", 0, 5);
    let inspector = ws.inspect_at("file:///i.rb", position).unwrap();
    assert_eq!(inspector.node().method_name(), Some("name"));
    assert_eq!(
        inspector.method_receiver_types().into_iter().collect::<Vec<_>>(),
        vec!["Dog"]
    );
    assert_eq!(inspector.return_types().into_iter().collect::<Vec<_>>(), vec!["String"]);
    assert_eq!(names(inspector.method_definitions()), vec!["Animal#name"]);
}

#[test]
fn test_inspect_chained_calls_through_local() {
    let mut ws = workspace();
    ws.open("file:///i.rb", INFERENCE);
    let position = position_of(INFERENCE, "length", 0, 1);
    let inspector = ws.inspect_at("file:///i.rb", position).unwrap();
    assert_eq!(inspector.node().method_name(), Some("length"));
    assert_eq!(
        inspector.method_receiver_types().into_iter().collect::<Vec<_>>(),
        vec!["String"]
    );
    assert_eq!(inspector.return_types().into_iter().collect::<Vec<_>>(), vec!["Integer"]);
}

#[test]
fn test_inspect_constant() {
    let mut ws = workspace();
    ws.open("file:///i.rb", INFERENCE);
    let position = position_of(INFERENCE, "Dog\n", 0, 1);
    let inspector = ws.inspect_at("file:///i.rb", position).unwrap();
    assert_eq!(
        inspector.return_types().into_iter().collect::<Vec<_>>(),
        vec!["singleton<Dog>"]
    );
    assert_eq!(names(inspector.definitions()), vec!["Dog"]);
}

#[test]
fn test_inspect_self_in_singleton_method() {
    let mut ws = workspace();
    ws.open("file:///i.rb", INFERENCE);
    let position = position_of(INFERENCE, "    self\n", 0, 5);
    let inspector = ws.inspect_at("file:///i.rb", position).unwrap();
    assert_eq!(inspector.node().kind(), NodeKind::SelfRef);
    assert_eq!(
        inspector.return_types().into_iter().collect::<Vec<_>>(),
        vec!["singleton<Dog>"]
    );
}

#[test]
fn test_inspect_local_from_operator_assignment() {
    let text = "x ||= \"s\"\nx.length\n";
    let mut ws = workspace();
    ws.open("file:///o.rb", text);
    let position = position_of(text, "length", 0, 1);
    let inspector = ws.inspect_at("file:///o.rb", position).unwrap();
    assert_eq!(
        inspector.method_receiver_types().into_iter().collect::<Vec<_>>(),
        vec!["String"]
    );
    assert_eq!(inspector.return_types().into_iter().collect::<Vec<_>>(), vec!["Integer"]);
}
