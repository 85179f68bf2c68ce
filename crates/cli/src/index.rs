use crate::BuiltinArgs;
use crate::sources;
use crate::view::DefinitionRow;
use std::path::PathBuf;
use tabled::Table;
use tabled::settings::Style;
use tracing::info;

pub fn run(
    paths: &[PathBuf],
    builtins: &BuiltinArgs,
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = builtins.workspace()?;
    let builtin_count = workspace.store().len();

    let files = sources::index_all(&mut workspace, paths)?;
    info!(
        files,
        definitions = workspace.store().len() - builtin_count,
        "indexing complete"
    );

    let rows: Vec<DefinitionRow> = workspace
        .store()
        .definitions()
        .filter(|definition| all || definition.uri().is_some())
        .map(DefinitionRow::from_definition)
        .collect();

    if rows.is_empty() {
        println!("No definitions found in {files} file(s).");
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
        println!("{} definition(s) in {files} file(s).", rows.len());
    }
    Ok(())
}
