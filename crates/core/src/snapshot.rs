//! Binary snapshot of the built-in library.
//!
//! Layout: a MessagePack map `{ header, definitions }` (named fields, so
//! older readers skip unknown keys) compressed with zstd. The header is
//! checked before the definitions are decoded.

use crate::error::SnapshotError;
use rubyscope_api::models::Definition;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

pub const SNAPSHOT_MAGIC: &str = "rubyscope-builtins";
pub const SNAPSHOT_VERSION: u32 = 1;

const COMPRESSION_LEVEL: i32 = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: String,
    pub version: u32,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

impl SnapshotHeader {
    fn current() -> Self {
        let created_at = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            magic: SNAPSHOT_MAGIC.to_string(),
            version: SNAPSHOT_VERSION,
            created_at,
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    header: SnapshotHeader,
    definitions: &'a [Definition],
}

#[derive(Deserialize)]
struct SnapshotFile {
    header: SnapshotHeader,
    definitions: Vec<Definition>,
}

#[derive(Deserialize)]
struct HeaderOnly {
    header: SnapshotHeader,
}

pub fn dump(definitions: &[Definition]) -> Result<Vec<u8>, SnapshotError> {
    let snapshot = SnapshotRef {
        header: SnapshotHeader::current(),
        definitions,
    };
    let encoded = rmp_serde::to_vec_named(&snapshot)?;
    zstd::encode_all(encoded.as_slice(), COMPRESSION_LEVEL).map_err(SnapshotError::Compression)
}

pub fn load(bytes: &[u8]) -> Result<Vec<Definition>, SnapshotError> {
    load_with_header(bytes).map(|(_, definitions)| definitions)
}

/// Like [`load`], also returning the header.
pub fn load_with_header(bytes: &[u8]) -> Result<(SnapshotHeader, Vec<Definition>), SnapshotError> {
    let decoded = zstd::decode_all(bytes).map_err(SnapshotError::Compression)?;

    let HeaderOnly { header } = rmp_serde::from_slice(&decoded)?;
    if header.magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    if header.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: header.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let SnapshotFile {
        header,
        definitions,
    } = rmp_serde::from_slice(&decoded)?;
    Ok((header, definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubyscope_api::models::{
        ClassDefinition, ConstantDefinition, Location, MethodDefinition, MethodParameter,
        ModuleDefinition, Position, Range, UnqualifiedName,
    };

    fn sample() -> Vec<Definition> {
        let mut comparable = ModuleDefinition::new("Comparable");
        comparable.constant.description = Some("Ordering helpers".into());
        vec![
            comparable.into(),
            ClassDefinition::new("String")
                .inherit("Object")
                .include("Comparable")
                .into(),
            ClassDefinition {
                super_class_unqualified_name: Some(UnqualifiedName::new("Base", vec!["A".into()])),
                ..ClassDefinition::new("A::Thing")
            }
            .into(),
            MethodDefinition {
                parameters: vec![MethodParameter {
                    name: "other".into(),
                    types: vec!["String".into()],
                }],
                ..MethodDefinition::instance("String", "+").returning("(String other)", "String")
            }
            .into(),
            ConstantDefinition::new("RUBY_VERSION")
                .with_location(Location::new(
                    "file:///core.rbs",
                    Range::new(Position::new(3, 0), Position::new(3, 12)),
                ))
                .into(),
        ]
    }

    #[test]
    fn test_round_trip_is_exact() {
        let definitions = sample();
        let bytes = dump(&definitions).unwrap();
        let (header, loaded) = load_with_header(&bytes).unwrap();
        assert_eq!(header.magic, SNAPSHOT_MAGIC);
        assert_eq!(header.version, SNAPSHOT_VERSION);
        assert_eq!(loaded, definitions);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            load(b"definitely not zstd"),
            Err(SnapshotError::Compression(_))
        ));
    }

    #[test]
    fn test_rejects_foreign_magic() {
        let header = SnapshotHeader {
            magic: "something-else".into(),
            ..SnapshotHeader::current()
        };
        let encoded = rmp_serde::to_vec_named(&SnapshotRef {
            header,
            definitions: &[],
        })
        .unwrap();
        let bytes = zstd::encode_all(encoded.as_slice(), 0).unwrap();
        assert!(matches!(load(&bytes), Err(SnapshotError::BadMagic)));
    }

    #[test]
    fn test_rejects_other_versions() {
        let header = SnapshotHeader {
            version: SNAPSHOT_VERSION + 1,
            ..SnapshotHeader::current()
        };
        let encoded = rmp_serde::to_vec_named(&SnapshotRef {
            header,
            definitions: &[],
        })
        .unwrap();
        let bytes = zstd::encode_all(encoded.as_slice(), 0).unwrap();
        assert!(matches!(
            load(&bytes),
            Err(SnapshotError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }
}
