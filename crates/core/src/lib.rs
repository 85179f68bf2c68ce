pub mod ast;
pub mod builtin;
pub mod config;
pub mod document;
pub mod error;
pub mod inspector;
pub mod logging;
pub mod plugin;
pub mod snapshot;
pub mod store;
pub mod workspace;

#[cfg(test)]
mod test_support;

pub use document::Document;
pub use error::{Result, RubyscopeError, SnapshotError};
pub use inspector::NodeInspector;
pub use store::DefinitionStore;
pub use workspace::Workspace;
