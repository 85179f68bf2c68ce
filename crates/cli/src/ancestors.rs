use crate::BuiltinArgs;
use crate::sources;
use std::path::PathBuf;

pub fn run(
    paths: &[PathBuf],
    name: &str,
    builtins: &BuiltinArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = builtins.workspace()?;
    sources::index_all(&mut workspace, paths)?;

    let store = workspace.store();
    if store.find_definition_by_qualified_name(name).is_none() {
        return Err(format!("{name} is not indexed").into());
    }
    for (depth, ancestor) in store.ancestors_of(name).into_iter().enumerate() {
        println!("{:>3}. {} ({})", depth + 1, ancestor.qualified_name(), ancestor.kind_name());
    }
    Ok(())
}
