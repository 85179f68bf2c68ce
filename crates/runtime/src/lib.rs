use rubyscope_api::models::Definition;
use rubyscope_core::Workspace;
use rubyscope_core::builtin::BuiltinLibrary;
use rubyscope_core::config::Config;
use rubyscope_core::error::Result;
use std::sync::Arc;
use tracing::info;

/// Where the built-in library comes from when a workspace is assembled.
#[derive(Debug, Clone, Default)]
pub enum Builtins {
    /// The snapshot file named by the configuration.
    #[default]
    Snapshot,
    /// Already decoded definitions, e.g. from a test fixture.
    Definitions(Vec<Definition>),
    /// Index user code only.
    None,
}

/// Assembles a workspace with the Ruby plugin and seeds it with the built-in library.
///
/// A missing or corrupt snapshot is an error: the index is not useful without it.
pub fn build_default_workspace(config: &Config, builtins: Builtins) -> Result<Workspace> {
    let plugin = rubyscope_ruby::RubyPlugin::new()?;
    let mut workspace = Workspace::new(Arc::new(plugin));

    let seeded = match builtins {
        Builtins::Snapshot => workspace.seed(&BuiltinLibrary::new(&config.snapshot_path))?,
        Builtins::Definitions(definitions) => workspace.seed(&definitions)?,
        Builtins::None => 0,
    };
    info!(seeded, "workspace ready");
    Ok(workspace)
}

/// Initializes logging for a component, writing under the configured log directory.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    let config = Config::from_env();
    Some(rubyscope_core::logging::init_logging(
        &config.log_dir,
        component,
        to_stderr,
    ))
}
