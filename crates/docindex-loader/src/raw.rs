//! Raw snapshot shape
//!
//! Mirrors the index object emitted by the documentation generator. Only
//! `packages` and `types` feed the catalog; `docs` and `modules` are carried
//! through untouched.

use crate::error::LoadError;
use docindex_symbol::{Attributes, Batch, PackageRef, SymbolKind, SymbolRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index object as found in a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    /// Opaque document references
    pub docs: Vec<Value>,

    /// Opaque module references
    pub modules: Vec<Value>,

    /// Declared packages
    pub packages: Vec<String>,

    /// Type descriptors
    pub types: Vec<RawType>,
}

/// Type descriptor as found in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawType {
    /// Simple or dotted nested name
    pub name: String,

    /// Owning package
    #[serde(rename = "packageName")]
    pub package_name: String,

    /// Kind string, validated on conversion
    #[serde(rename = "type")]
    pub kind: String,

    /// Opaque modifiers
    #[serde(default)]
    pub modifiers: Attributes,
}

impl RawType {
    /// Convert into a symbol record
    ///
    /// # Errors
    /// Returns [`LoadError::UnknownKind`] if `kind` is not a known kind.
    pub fn into_record(self, index: usize) -> Result<SymbolRecord, LoadError> {
        let kind: SymbolKind = self
            .kind
            .parse()
            .map_err(|_| LoadError::UnknownKind {
                index,
                value: self.kind.clone(),
            })?;

        Ok(SymbolRecord {
            name: self.name,
            package: PackageRef::new(self.package_name),
            kind,
            attributes: self.modifiers,
        })
    }
}

impl RawSnapshot {
    /// Map descriptors 1:1 onto a catalog batch
    ///
    /// Pass-through fields are dropped; use [`RawSnapshot::split`] to keep
    /// them.
    ///
    /// # Errors
    /// Returns [`LoadError::UnknownKind`] for the first descriptor with an
    /// unknown kind.
    pub fn into_batch(self) -> Result<Batch, LoadError> {
        self.split().map(|(batch, _)| batch)
    }

    /// Separate the catalog batch from the pass-through fields
    ///
    /// # Errors
    /// Same as [`RawSnapshot::into_batch`].
    pub fn split(self) -> Result<(Batch, PassThrough), LoadError> {
        let symbols = self
            .types
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_record(i))
            .collect::<Result<Vec<_>, _>>()?;

        let batch = Batch {
            packages: self.packages.into_iter().map(PackageRef::new).collect(),
            symbols,
        };
        let rest = PassThrough {
            docs: self.docs,
            modules: self.modules,
        };

        Ok((batch, rest))
    }
}

/// Snapshot fields the catalog does not interpret
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassThrough {
    /// Opaque document references
    pub docs: Vec<Value>,

    /// Opaque module references
    pub modules: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(name: &str, kind: &str) -> RawType {
        RawType {
            name: name.to_string(),
            package_name: "primavera.map".to_string(),
            kind: kind.to_string(),
            modifiers: Attributes::new(),
        }
    }

    #[test]
    fn descriptor_decodes_from_json() {
        let value = json!({
            "modifiers": { "#": "java.util.Collections$UnmodifiableSet" },
            "name": "IntMap.IntComparator",
            "packageName": "primavera.map",
            "type": "Functional"
        });

        let raw: RawType = serde_json::from_value(value).unwrap();
        let record = raw.into_record(0).unwrap();

        assert_eq!(record.name, "IntMap.IntComparator");
        assert_eq!(record.package.as_str(), "primavera.map");
        assert_eq!(record.kind, SymbolKind::Functional);
        assert_eq!(
            record.attributes.get("#"),
            Some(&json!("java.util.Collections$UnmodifiableSet"))
        );
    }

    #[test]
    fn descriptor_without_modifiers() {
        let raw: RawType = serde_json::from_value(json!({
            "name": "IntSet",
            "packageName": "primavera.set",
            "type": "Interface"
        }))
        .unwrap();

        assert!(raw.modifiers.is_empty());
    }

    #[test]
    fn unknown_kind_reports_position() {
        let snapshot = RawSnapshot {
            types: vec![raw("IntMap", "Interface"), raw("IntMap.X", "Enum")],
            ..RawSnapshot::default()
        };

        match snapshot.into_batch() {
            Err(LoadError::UnknownKind { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "Enum");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let snapshot: RawSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, RawSnapshot::default());
    }

    #[test]
    fn split_keeps_pass_through_fields() {
        let snapshot: RawSnapshot = serde_json::from_value(json!({
            "docs": [{ "title": "Overview" }],
            "modules": ["primavera"],
            "packages": ["primavera.map", "primavera.array"],
            "types": []
        }))
        .unwrap();

        let (batch, rest) = snapshot.split().unwrap();
        assert_eq!(
            batch.packages,
            vec![PackageRef::new("primavera.map"), PackageRef::new("primavera.array")]
        );
        assert_eq!(rest.docs, vec![json!({ "title": "Overview" })]);
        assert_eq!(rest.modules, vec![json!("primavera")]);
    }
}
