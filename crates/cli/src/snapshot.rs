use clap::Subcommand;
use rubyscope_api::models::Definition;
use rubyscope_core::builtin::BuiltinLibrary;
use rubyscope_core::snapshot;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Encode a JSON array of definitions into a snapshot file
    Build {
        /// JSON file holding `[Definition, ...]`
        #[arg(value_name = "JSON")]
        input: PathBuf,

        /// Where to write the snapshot
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Summarize a snapshot file
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn run(cmd: SnapshotCommands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        SnapshotCommands::Build { input, output } => {
            let definitions = read_definitions(&input)?;
            BuiltinLibrary::write_to(&output, &definitions)?;
            println!(
                "Wrote {} definition(s) to {}",
                definitions.len(),
                output.display()
            );
        }
        SnapshotCommands::Inspect { file } => {
            let bytes = std::fs::read(&file)?;
            let (header, definitions) = snapshot::load_with_header(&bytes)?;
            println!("Snapshot:    {}", file.display());
            println!("Version:     {}", header.version);
            println!("Created at:  {} (unix seconds)", header.created_at);
            println!("Definitions: {}", definitions.len());

            let rows: Vec<KindRow> = count_kinds(&definitions)
                .into_iter()
                .map(|(kind, count)| KindRow { kind, count })
                .collect();
            println!("{}", Table::new(rows));
        }
    }
    Ok(())
}

fn read_definitions(path: &Path) -> Result<Vec<Definition>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn count_kinds(definitions: &[Definition]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for definition in definitions {
        *counts.entry(definition.kind_name()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubyscope_api::models::{ClassDefinition, MethodDefinition};

    #[test]
    fn test_build_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("core.json");
        let output = dir.path().join("out/builtin.snapshot");
        let definitions: Vec<Definition> = vec![
            ClassDefinition::new("String").inherit("Object").into(),
            MethodDefinition::instance("String", "length")
                .returning("()", "Integer")
                .into(),
        ];
        std::fs::write(&input, serde_json::to_string(&definitions).unwrap()).unwrap();

        run(SnapshotCommands::Build {
            input,
            output: output.clone(),
        })
        .unwrap();

        assert_eq!(BuiltinLibrary::load_from(&output).unwrap(), definitions);
    }

    #[test]
    fn test_count_kinds() {
        let definitions: Vec<Definition> = vec![
            ClassDefinition::new("A").into(),
            ClassDefinition::new("B").into(),
            MethodDefinition::singleton("A", "x").into(),
        ];
        let counts = count_kinds(&definitions);
        assert_eq!(counts.get("class"), Some(&2));
        assert_eq!(counts.get("singleton method"), Some(&1));
    }
}
