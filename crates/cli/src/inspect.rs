use crate::BuiltinArgs;
use crate::sources;
use crate::view::DefinitionRow;
use rubyscope_api::models::Position;
use std::path::{Path, PathBuf};
use tabled::Table;
use tabled::settings::Style;

pub fn run(
    file: &Path,
    line: u32,
    column: u32,
    with: &[PathBuf],
    builtins: &BuiltinArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = builtins.workspace()?;
    sources::index_all(&mut workspace, with)?;

    let uri = sources::uri_for(file)?;
    let text = std::fs::read_to_string(file)?;
    workspace.open(&uri, &text);

    if workspace
        .document(&uri)
        .is_some_and(|document| document.failed_to_parse())
    {
        return Err(format!("{} has syntax errors", file.display()).into());
    }

    let position = Position::new(line, column);
    let Some(inspector) = workspace.inspect_at(&uri, position) else {
        println!("No expression at {position}.");
        return Ok(());
    };

    let node = inspector.node();
    println!("Node:           {}", node.kind());
    if let Some(range) = node.location() {
        println!("Range:          {} - {}", range.begin, range.end);
    }
    if node.kind().is_call() {
        println!("Receiver types: {}", join(inspector.method_receiver_types()));
    }
    println!("Types:          {}", join(inspector.return_types()));

    let rows: Vec<DefinitionRow> = inspector
        .definitions()
        .into_iter()
        .map(DefinitionRow::from_definition)
        .collect();
    if !rows.is_empty() {
        println!("\nDefinitions:");
        println!("{}", Table::new(&rows).with(Style::psql()));
    }
    Ok(())
}

fn join(types: impl IntoIterator<Item = String>) -> String {
    let types: Vec<String> = types.into_iter().collect();
    if types.is_empty() {
        "(unknown)".to_string()
    } else {
        types.join(", ")
    }
}
