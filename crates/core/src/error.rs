use thiserror::Error;

#[derive(Error, Debug)]
pub enum RubyscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Built-in snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures reading or writing the persisted built-in library.
///
/// The server cannot answer anything useful without the built-in index, so
/// callers treat these as fatal at startup.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot not found at {0}")]
    Missing(std::path::PathBuf),
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("snapshot compression failed: {0}")]
    Compression(std::io::Error),
    #[error("not a rubyscope snapshot (bad magic)")]
    BadMagic,
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, RubyscopeError>;
