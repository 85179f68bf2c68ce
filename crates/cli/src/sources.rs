//! Finding Ruby files on disk and feeding them to a workspace.

use rubyscope_core::Workspace;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Every file under `paths` the workspace's plugin can parse, in a stable order.
pub fn collect(workspace: &Workspace, paths: &[PathBuf]) -> Vec<PathBuf> {
    let plugin = workspace.plugin();
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry.file_name().to_str()));
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && plugin.supports_path(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => warn!("skipping unreadable entry: {}", e),
            }
        }
    }
    files
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|name| name.len() > 1 && name.starts_with('.'))
}

/// `file://` URI of a path, made absolute first.
pub fn uri_for(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let absolute = std::fs::canonicalize(path)?;
    url::Url::from_file_path(&absolute)
        .map(|url| url.to_string())
        .map_err(|_| format!("cannot build a URI for {}", absolute.display()).into())
}

/// Indexes every file; returns how many were read.
pub fn index_all(
    workspace: &mut Workspace,
    paths: &[PathBuf],
) -> Result<usize, Box<dyn std::error::Error>> {
    let files = collect(workspace, paths);
    for file in &files {
        let text = std::fs::read_to_string(file)?;
        let uri = uri_for(file)?;
        debug!(%uri, "indexing");
        workspace.index(&uri, &text);
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_directories_are_skipped() {
        assert!(is_hidden(Some(".git")));
        assert!(!is_hidden(Some(".")));
        assert!(!is_hidden(Some("lib")));
    }

    #[test]
    fn test_uri_for_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a b.rb");
        std::fs::write(&file, "").unwrap();
        let uri = uri_for(&file).unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("/a%20b.rb"));
    }
}
