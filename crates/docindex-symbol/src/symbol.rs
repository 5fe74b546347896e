//! Symbol records - the documented types of an index
//!
//! Provides [`SymbolRecord`] together with its identity [`SymbolKey`],
//! owning [`PackageRef`] and [`SymbolKind`] classification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Opaque per-symbol metadata, stored and returned verbatim
pub type Attributes = IndexMap<String, serde_json::Value>;

/// Dotted namespace path owning a set of symbols
///
/// Purely lexical: `primavera.map` is not required to have a declared
/// `primavera` parent.
///
/// # Example
/// ```
/// use docindex_symbol::PackageRef;
///
/// let pkg = PackageRef::new("primavera.map");
/// assert_eq!(pkg.segments().collect::<Vec<_>>(), ["primavera", "map"]);
/// assert!(pkg.is_within(&PackageRef::new("primavera")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageRef(String);

impl PackageRef {
    /// Create package reference from its dotted path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Dotted path
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments from outermost to innermost
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Check if this package equals `other` or sits lexically below it
    #[must_use]
    pub fn is_within(&self, other: &PackageRef) -> bool {
        match self.0.strip_prefix(other.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl Display for PackageRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageRef {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for PackageRef {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl Borrow<str> for PackageRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Symbol kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Ordinary interface type
    Interface,

    /// Concrete class
    Class,

    /// Single-method callable type
    Functional,
}

impl SymbolKind {
    /// Every kind, in declaration order
    pub const ALL: [SymbolKind; 3] = [Self::Interface, Self::Class, Self::Functional];

    /// Name as it appears in an index snapshot
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "Interface",
            Self::Class => "Class",
            Self::Functional => "Functional",
        }
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Interface" => Ok(Self::Interface),
            "Class" => Ok(Self::Class),
            "Functional" => Ok(Self::Functional),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Kind name outside the closed [`SymbolKind`] set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol kind: {0:?} (expected Interface, Class or Functional)")]
pub struct UnknownKind(pub String);

/// `(package, name)` identity of a symbol
///
/// Orders by package first, then by name, both byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolKey {
    /// Owning package
    pub package: PackageRef,

    /// Symbol name, possibly dotted
    pub name: String,
}

impl SymbolKey {
    /// Create new key
    #[inline]
    #[must_use]
    pub fn new(package: impl Into<PackageRef>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Key of the enclosing symbol, if the name is nested
    #[must_use]
    pub fn enclosing(&self) -> Option<Self> {
        split_nested(&self.name).map(|(outer, _)| Self {
            package: self.package.clone(),
            name: outer.to_string(),
        })
    }
}

impl Display for SymbolKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.package.as_str().is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// A documented type
///
/// Serializes with the field names of an index snapshot, so a record
/// round-trips through the same shape it was ingested from.
///
/// # Example
/// ```
/// use docindex_symbol::{SymbolKind, SymbolRecord};
///
/// let rec = SymbolRecord::new("primavera.map", "IntMap.IntComparator", SymbolKind::Functional);
/// assert_eq!(rec.enclosing_name(), Some("IntMap"));
/// assert_eq!(rec.simple_name(), "IntComparator");
/// assert_eq!(rec.qualified_name(), "primavera.map.IntMap.IntComparator");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Simple or dotted nested name
    pub name: String,

    /// Owning package
    #[serde(rename = "packageName")]
    pub package: PackageRef,

    /// Kind classification
    #[serde(rename = "type")]
    pub kind: SymbolKind,

    /// Opaque pass-through metadata
    #[serde(rename = "modifiers", default)]
    pub attributes: Attributes,
}

impl SymbolRecord {
    /// Create record without attributes
    #[inline]
    #[must_use]
    pub fn new(package: impl Into<PackageRef>, name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            attributes: Attributes::new(),
        }
    }

    /// Attach an attribute, returning the record
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Identity key
    #[inline]
    #[must_use]
    pub fn key(&self) -> SymbolKey {
        SymbolKey {
            package: self.package.clone(),
            name: self.name.clone(),
        }
    }

    /// Check if the name is dotted
    #[inline]
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.name.contains('.')
    }

    /// Name of the enclosing symbol (everything before the final dot)
    #[inline]
    #[must_use]
    pub fn enclosing_name(&self) -> Option<&str> {
        split_nested(&self.name).map(|(outer, _)| outer)
    }

    /// Last name segment
    #[inline]
    #[must_use]
    pub fn simple_name(&self) -> &str {
        split_nested(&self.name).map_or(self.name.as_str(), |(_, inner)| inner)
    }

    /// Number of dotted name segments
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.name.split('.').count()
    }

    /// `package.name`
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.as_str().is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

impl Display for SymbolRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name())
    }
}

/// Split a nested name at its final dot into `(enclosing, suffix)`
///
/// Returns `None` for simple names.
#[inline]
#[must_use]
pub fn split_nested(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('.')
}
