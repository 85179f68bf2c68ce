#![allow(dead_code)]

use rubyscope_api::models::{ClassDefinition, Definition, MethodDefinition, ModuleDefinition, Position};
use rubyscope_core::Workspace;
use rubyscope_core::document::Document;
use rubyscope_ruby::RubyPlugin;
use std::sync::Arc;

pub fn plugin() -> Arc<RubyPlugin> {
    Arc::new(RubyPlugin::new().expect("ruby grammar loads"))
}

pub fn document(text: &str) -> Document {
    Document::new("file:///test.rb", text, plugin())
}

pub fn workspace() -> Workspace {
    let mut ws = Workspace::new(plugin());
    ws.seed(&core_classes()).unwrap();
    ws
}

/// The few built-ins the tests rely on.
pub fn core_classes() -> Vec<Definition> {
    vec![
        ClassDefinition::new("BasicObject").into(),
        ClassDefinition::new("Object").inherit("BasicObject").into(),
        ModuleDefinition::new("Kernel").into(),
        ClassDefinition::new("Module").inherit("Object").into(),
        ClassDefinition::new("Class").inherit("Module").into(),
        MethodDefinition::instance("Class", "new")
            .returning("()", "instance")
            .into(),
        ClassDefinition::new("String").inherit("Object").into(),
        MethodDefinition::instance("String", "length")
            .returning("()", "Integer")
            .into(),
        ClassDefinition::new("Integer").inherit("Object").into(),
    ]
}

/// Position of the `nth` occurrence of `needle`, offset by `column_offset` characters.
pub fn position_of(text: &str, needle: &str, nth: usize, column_offset: u32) -> Position {
    let offset = text
        .match_indices(needle)
        .nth(nth)
        .map(|(offset, _)| offset)
        .expect("needle present");
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = text[line_start..offset].chars().count() as u32;
    Position::from_zero_based(line, column + column_offset)
}

pub fn names<'a>(definitions: impl IntoIterator<Item = &'a Definition>) -> Vec<String> {
    definitions
        .into_iter()
        .map(|definition| definition.qualified_name().into_owned())
        .collect()
}
