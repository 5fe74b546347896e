//! Immutable symbol catalog
//!
//! Provides [`Catalog`], built once from a [`Batch`] and never mutated
//! afterwards. Records live in a single arena; every index stores arena
//! positions, so lookups hand out borrows instead of clones.

use crate::query::QueryEngine;
use crate::symbol::{split_nested, PackageRef, SymbolKey, SymbolKind, SymbolRecord};
use crate::validation::{BatchValidator, CatalogError};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Name-ordered arena positions
pub(crate) type NameIndex = BTreeMap<String, usize>;

/// Ingestion batch: declared packages plus symbol records
///
/// # Example
/// ```
/// use docindex_symbol::{Batch, Catalog, SymbolKind, SymbolRecord};
///
/// let batch = Batch::new()
///     .with_package("primavera.map")
///     .with_symbol(SymbolRecord::new("primavera.map", "IntMap", SymbolKind::Interface));
///
/// let catalog = Catalog::from_batch(batch).unwrap();
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Declared packages, in curatorial order
    pub packages: Vec<PackageRef>,

    /// Symbol records, in ingestion order
    pub symbols: Vec<SymbolRecord>,
}

impl Batch {
    /// Create empty batch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declared package
    #[inline]
    #[must_use]
    pub fn with_package(mut self, package: impl Into<PackageRef>) -> Self {
        self.packages.push(package.into());
        self
    }

    /// Append a symbol record
    #[inline]
    #[must_use]
    pub fn with_symbol(mut self, symbol: SymbolRecord) -> Self {
        self.symbols.push(symbol);
        self
    }
}

/// Indexed, read-only collection of symbols
///
/// All indexes are derived during [`Catalog::build`]; there is no way to
/// add or remove a record afterwards. A changed index means building a new
/// catalog. Share between threads through `Arc<Catalog>`.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Declared packages, verbatim
    packages: Vec<PackageRef>,

    /// Record arena, ingestion order
    records: Vec<SymbolRecord>,

    /// package -> name -> position
    exact: HashMap<PackageRef, HashMap<String, usize>>,

    /// package -> top-level (undotted) names
    top_level: HashMap<PackageRef, NameIndex>,

    /// package -> every name, nested ones included
    members: HashMap<PackageRef, NameIndex>,

    /// kind -> (package, name) ordered positions
    by_kind: HashMap<SymbolKind, BTreeMap<SymbolKey, usize>>,

    /// package -> enclosing name -> suffix -> position
    nested: HashMap<PackageRef, HashMap<String, NameIndex>>,

    /// (simple name, key) -> position, for cross-package search
    by_simple_name: BTreeMap<(String, SymbolKey), usize>,

    /// Nested symbols without a recorded enclosing symbol
    orphans: Vec<SymbolKey>,
}

impl Catalog {
    /// Validate and index a batch
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateSymbol`] if two records share
    /// `(package, name)`. Nothing is built in that case.
    pub fn build(
        packages: impl IntoIterator<Item = PackageRef>,
        symbols: impl IntoIterator<Item = SymbolRecord>,
    ) -> Result<Self, CatalogError> {
        let packages: Vec<PackageRef> = packages.into_iter().collect();
        let records: Vec<SymbolRecord> = symbols.into_iter().collect();

        let validator = BatchValidator::new();
        if let Err(err) = validator.check_unique(&records) {
            tracing::warn!("Rejected symbol batch: {}", err);
            return Err(err);
        }

        let mut exact: HashMap<PackageRef, HashMap<String, usize>> = HashMap::new();
        let mut top_level: HashMap<PackageRef, NameIndex> = HashMap::new();
        let mut members: HashMap<PackageRef, NameIndex> = HashMap::new();
        let mut by_kind: HashMap<SymbolKind, BTreeMap<SymbolKey, usize>> = HashMap::new();
        let mut nested: HashMap<PackageRef, HashMap<String, NameIndex>> = HashMap::new();
        let mut by_simple_name = BTreeMap::new();

        for (pos, record) in records.iter().enumerate() {
            exact
                .entry(record.package.clone())
                .or_default()
                .insert(record.name.clone(), pos);

            members
                .entry(record.package.clone())
                .or_default()
                .insert(record.name.clone(), pos);

            match split_nested(&record.name) {
                Some((outer, suffix)) => {
                    nested
                        .entry(record.package.clone())
                        .or_default()
                        .entry(outer.to_string())
                        .or_default()
                        .insert(suffix.to_string(), pos);
                }
                None => {
                    top_level
                        .entry(record.package.clone())
                        .or_default()
                        .insert(record.name.clone(), pos);
                }
            }

            by_kind
                .entry(record.kind)
                .or_default()
                .insert(record.key(), pos);

            by_simple_name.insert((record.simple_name().to_string(), record.key()), pos);
        }

        let orphans = validator.find_orphans(&records);
        for key in &orphans {
            tracing::debug!("Nested symbol {} has no recorded enclosing symbol", key);
        }

        tracing::debug!(
            "Built catalog: {} symbols in {} packages ({} declared), {} orphaned",
            records.len(),
            members.len(),
            packages.len(),
            orphans.len()
        );

        Ok(Self {
            packages,
            records,
            exact,
            top_level,
            members,
            by_kind,
            nested,
            by_simple_name,
            orphans,
        })
    }

    /// Validate and index a [`Batch`]
    ///
    /// # Errors
    /// Same as [`Catalog::build`].
    #[inline]
    pub fn from_batch(batch: Batch) -> Result<Self, CatalogError> {
        Self::build(batch.packages, batch.symbols)
    }

    /// Query engine over this catalog
    #[inline]
    #[must_use]
    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(self)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog holds no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ingestion order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SymbolRecord> {
        self.records.iter()
    }

    /// Exact lookup by `(package, name)`
    #[must_use]
    pub fn get(&self, package: &str, name: &str) -> Option<&SymbolRecord> {
        let pos = *self.exact.get(package)?.get(name)?;
        self.records.get(pos)
    }

    /// Check if `(package, name)` is recorded
    #[inline]
    #[must_use]
    pub fn contains(&self, package: &str, name: &str) -> bool {
        self.get(package, name).is_some()
    }

    /// Declared package list, verbatim
    #[inline]
    #[must_use]
    pub fn declared_packages(&self) -> &[PackageRef] {
        &self.packages
    }

    /// Packages owning at least one record, sorted
    ///
    /// May differ from [`Catalog::declared_packages`]: the declared list is
    /// advisory.
    #[must_use]
    pub fn indexed_packages(&self) -> Vec<&PackageRef> {
        let mut packages: Vec<&PackageRef> = self.members.keys().collect();
        packages.sort();
        packages
    }

    /// Nested symbols whose enclosing symbol is not recorded
    #[inline]
    #[must_use]
    pub fn orphans(&self) -> &[SymbolKey] {
        &self.orphans
    }

    /// Summary counts
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let per_kind = SymbolKind::ALL
            .into_iter()
            .map(|kind| (kind, self.by_kind.get(&kind).map_or(0, BTreeMap::len)))
            .collect();

        CatalogStats {
            symbols: self.records.len(),
            nested: self.records.iter().filter(|r| r.is_nested()).count(),
            orphaned: self.orphans.len(),
            declared_packages: self.packages.len(),
            indexed_packages: self.members.len(),
            per_kind,
        }
    }

    pub(crate) fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub(crate) fn top_level_index(&self, package: &str) -> Option<&NameIndex> {
        self.top_level.get(package)
    }

    pub(crate) fn member_index(&self, package: &str) -> Option<&NameIndex> {
        self.members.get(package)
    }

    pub(crate) fn kind_index(&self, kind: SymbolKind) -> Option<&BTreeMap<SymbolKey, usize>> {
        self.by_kind.get(&kind)
    }

    pub(crate) fn nested_index(&self, package: &str, enclosing: &str) -> Option<&NameIndex> {
        self.nested.get(package)?.get(enclosing)
    }

    pub(crate) fn simple_name_index(&self) -> &BTreeMap<(String, SymbolKey), usize> {
        &self.by_simple_name
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SymbolRecord;
    type IntoIter = std::slice::Iter<'a, SymbolRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Summary counts of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Total records
    pub symbols: usize,

    /// Records with a dotted name
    pub nested: usize,

    /// Nested records without a recorded enclosing symbol
    pub orphaned: usize,

    /// Length of the declared package list, duplicates included
    pub declared_packages: usize,

    /// Distinct packages owning at least one record
    pub indexed_packages: usize,

    /// Records per kind, every kind present
    pub per_kind: BTreeMap<SymbolKind, usize>,
}

impl CatalogStats {
    /// Records of one kind
    #[inline]
    #[must_use]
    pub fn count(&self, kind: SymbolKind) -> usize {
        self.per_kind.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(package: &str, name: &str, kind: SymbolKind) -> SymbolRecord {
        SymbolRecord::new(package, name, kind)
    }

    fn sample() -> Catalog {
        Catalog::build(
            vec![PackageRef::new("primavera.map"), PackageRef::new("primavera.array")],
            vec![
                rec("primavera.map", "IntMap", SymbolKind::Interface),
                rec("primavera.map", "IntMap.IntComparator", SymbolKind::Functional),
                rec("primavera.map", "LongMap.LongEntry", SymbolKind::Interface),
                rec("primavera.array", "IntList", SymbolKind::Class),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::build(Vec::new(), Vec::new()).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.declared_packages().is_empty());
        assert!(catalog.indexed_packages().is_empty());
    }

    #[test]
    fn get_returns_record() {
        let catalog = sample();
        let found = catalog.get("primavera.map", "IntMap.IntComparator").unwrap();

        assert_eq!(found.kind, SymbolKind::Functional);
        assert!(catalog.contains("primavera.array", "IntList"));
        assert!(!catalog.contains("primavera.array", "IntMap"));
        assert!(catalog.get("unknown", "IntMap").is_none());
    }

    #[test]
    fn build_rejects_duplicates() {
        let result = Catalog::build(
            Vec::new(),
            vec![
                rec("p", "A", SymbolKind::Class),
                rec("p", "A", SymbolKind::Class),
            ],
        );

        assert!(matches!(result, Err(CatalogError::DuplicateSymbol { .. })));
    }

    #[test]
    fn iter_keeps_ingestion_order() {
        let catalog = sample();
        let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["IntMap", "IntMap.IntComparator", "LongMap.LongEntry", "IntList"]
        );
    }

    #[test]
    fn indexed_packages_sorted_and_distinct() {
        let catalog = Catalog::build(
            Vec::new(),
            vec![
                rec("b", "X", SymbolKind::Class),
                rec("a", "X", SymbolKind::Class),
                rec("b", "Y", SymbolKind::Class),
            ],
        )
        .unwrap();

        let packages: Vec<&str> = catalog
            .indexed_packages()
            .into_iter()
            .map(PackageRef::as_str)
            .collect();
        assert_eq!(packages, vec!["a", "b"]);
    }

    #[test]
    fn orphans_recorded_at_build() {
        let catalog = sample();
        assert_eq!(
            catalog.orphans(),
            &[SymbolKey::new("primavera.map", "LongMap.LongEntry")]
        );
    }

    #[test]
    fn stats_counts() {
        let stats = sample().stats();

        assert_eq!(stats.symbols, 4);
        assert_eq!(stats.nested, 2);
        assert_eq!(stats.orphaned, 1);
        assert_eq!(stats.declared_packages, 2);
        assert_eq!(stats.indexed_packages, 2);
        assert_eq!(stats.count(SymbolKind::Interface), 2);
        assert_eq!(stats.count(SymbolKind::Class), 1);
        assert_eq!(stats.count(SymbolKind::Functional), 1);
    }

    #[test]
    fn stats_lists_absent_kinds() {
        let catalog = Catalog::build(Vec::new(), vec![rec("p", "A", SymbolKind::Class)]).unwrap();
        let stats = catalog.stats();

        assert_eq!(stats.per_kind.len(), 3);
        assert_eq!(stats.count(SymbolKind::Functional), 0);
    }

    #[test]
    fn batch_builder() {
        let batch = Batch::new()
            .with_package("p")
            .with_symbol(rec("p", "A", SymbolKind::Class));

        assert_eq!(batch.packages, vec![PackageRef::new("p")]);
        assert_eq!(batch.symbols.len(), 1);
        assert_eq!(Catalog::from_batch(batch).unwrap().len(), 1);
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
