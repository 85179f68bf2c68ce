mod ancestors;
mod index;
mod inspect;
mod schema;
mod snapshot;
mod sources;
mod view;

use clap::{Args, Parser, Subcommand};
use rubyscope_core::Workspace;
use rubyscope_core::config::Config;
use rubyscope_runtime::Builtins;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rubyscope",
    version,
    about = "A static index of Ruby definitions with best-effort type inference",
    long_about = "Rubyscope indexes the classes, modules, constants and methods declared in Ruby \
                  source, resolves their ancestor chains the way method dispatch does, and infers \
                  the candidate types of expressions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index Ruby files and list the definitions found
    Index {
        /// Files or directories to index
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        builtins: BuiltinArgs,

        /// Also list the built-in definitions
        #[arg(long)]
        all: bool,
    },
    /// Show the inferred types and definitions of the expression at a position
    Inspect {
        /// The file to open
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 1-based line
        line: u32,

        /// 0-based column, in characters
        column: u32,

        /// Extra files or directories to index first
        #[arg(long = "with", value_name = "PATH")]
        with: Vec<PathBuf>,

        #[command(flatten)]
        builtins: BuiltinArgs,
    },
    /// Print the ancestor chain of a class or module
    Ancestors {
        /// Files or directories to index
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Qualified name, e.g. `Foo::Bar`
        #[arg(long)]
        name: String,

        #[command(flatten)]
        builtins: BuiltinArgs,
    },
    /// Build or inspect a built-in library snapshot
    #[command(subcommand)]
    Snapshot(snapshot::SnapshotCommands),
    /// Print the JSON schema of the definition model
    Schema,
}

#[derive(Args, Debug, Clone)]
pub struct BuiltinArgs {
    /// Built-in library snapshot (overrides RUBYSCOPE_SNAPSHOT)
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Do not load the built-in library
    #[arg(long, conflicts_with = "snapshot")]
    no_builtins: bool,
}

impl BuiltinArgs {
    fn workspace(&self) -> Result<Workspace, Box<dyn std::error::Error>> {
        let mut config = Config::from_env();
        if let Some(path) = &self.snapshot {
            config = config.with_snapshot_path(path.clone());
        }
        let builtins = if self.no_builtins {
            Builtins::None
        } else {
            Builtins::Snapshot
        };
        Ok(rubyscope_runtime::build_default_workspace(&config, builtins)?)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = rubyscope_runtime::init_logging("cli", false);

    match cli.command {
        Commands::Index {
            paths,
            builtins,
            all,
        } => index::run(&paths, &builtins, all),
        Commands::Inspect {
            file,
            line,
            column,
            with,
            builtins,
        } => inspect::run(&file, line, column, &with, &builtins),
        Commands::Ancestors {
            paths,
            name,
            builtins,
        } => ancestors::run(&paths, &name, &builtins),
        Commands::Snapshot(cmd) => snapshot::run(cmd),
        Commands::Schema => schema::run(),
    }
}
