//! Read-only queries over a built catalog
//!
//! Provides [`QueryEngine`]. Sequence results are lazy iterators over the
//! catalog's ordered indexes; they are `Clone`, so a consumer can restart
//! a sequence by cloning it before consuming, and stopping early costs
//! nothing beyond the items already produced.

use crate::catalog::{Catalog, NameIndex};
use crate::symbol::{split_nested, PackageRef, SymbolKey, SymbolKind, SymbolRecord};
use std::collections::btree_map;
use std::iter::FusedIterator;
use std::ops::Bound;

/// Stateless query operations over a [`Catalog`]
///
/// Cheap to copy; any number of engines may read the same catalog
/// concurrently.
///
/// # Example
/// ```
/// use docindex_symbol::{Catalog, SymbolKind, SymbolRecord};
///
/// let catalog = Catalog::build(
///     Vec::new(),
///     vec![
///         SymbolRecord::new("primavera.map", "IntMap", SymbolKind::Interface),
///         SymbolRecord::new("primavera.map", "IntMap.IntComparator", SymbolKind::Functional),
///     ],
/// )
/// .unwrap();
///
/// let query = catalog.query();
/// let nested: Vec<_> = query
///     .list_nested("primavera.map", "IntMap")
///     .map(|r| r.simple_name())
///     .collect();
/// assert_eq!(nested, ["IntComparator"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryEngine<'a> {
    /// Create engine reading `catalog`
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Underlying catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Exact `(package, name)` lookup
    ///
    /// # Errors
    /// Returns [`QueryMiss::NotFound`] if the key is not recorded.
    pub fn lookup_exact(&self, package: &str, name: &str) -> Result<&'a SymbolRecord, QueryMiss> {
        self.catalog
            .get(package, name)
            .ok_or_else(|| QueryMiss::not_found(package, name))
    }

    /// Top-level names of `package` starting with `prefix`, ordered by name
    ///
    /// Nested (dotted) names never match. An empty prefix matches every
    /// top-level name. Comparison is case-sensitive and byte-wise.
    #[must_use]
    pub fn find_by_prefix(&self, package: &str, prefix: &str) -> PrefixMatches<'a> {
        Symbols::new(
            self.catalog.records(),
            NamePrefix::new(self.catalog.top_level_index(package), prefix),
        )
    }

    /// Every record of `kind`, ordered by package then name
    #[must_use]
    pub fn find_by_kind(&self, kind: SymbolKind) -> KindMatches<'a> {
        Symbols::new(
            self.catalog.records(),
            Positions::new(self.catalog.kind_index(kind)),
        )
    }

    /// Direct nested children of `enclosing`, ordered by suffix
    ///
    /// Yields nothing if no children are recorded. Children are found by
    /// name alone, so they are listed even if `enclosing` itself is not
    /// recorded.
    #[must_use]
    pub fn list_nested(&self, package: &str, enclosing: &str) -> NestedSymbols<'a> {
        Symbols::new(
            self.catalog.records(),
            Positions::new(self.catalog.nested_index(package, enclosing)),
        )
    }

    /// Declared packages in their original order, duplicates included
    #[inline]
    #[must_use]
    pub fn list_packages(&self) -> Packages<'a> {
        self.catalog.declared_packages().iter()
    }

    /// Enclosing record of a nested name
    ///
    /// # Errors
    /// - [`QueryMiss::NotNested`] if `nested_name` contains no dot
    /// - [`QueryMiss::NotFound`] if the enclosing name is not recorded in
    ///   `package` (orphaned nesting)
    pub fn resolve_enclosing(
        &self,
        package: &str,
        nested_name: &str,
    ) -> Result<&'a SymbolRecord, QueryMiss> {
        let (outer, _) = split_nested(nested_name).ok_or_else(|| QueryMiss::NotNested {
            name: nested_name.to_string(),
        })?;
        self.lookup_exact(package, outer)
    }

    /// Every record of `package`, nested ones included, ordered by name
    #[must_use]
    pub fn list_members(&self, package: &str) -> PrefixMatches<'a> {
        Symbols::new(
            self.catalog.records(),
            NamePrefix::new(self.catalog.member_index(package), ""),
        )
    }

    /// Cross-package search on simple names
    ///
    /// Matches records whose last name segment starts with `prefix`.
    /// Ordered by simple name, then package, then full name.
    #[must_use]
    pub fn search(&self, prefix: &str) -> SearchMatches<'a> {
        Symbols::new(
            self.catalog.records(),
            SimpleNamePrefix::new(self.catalog.simple_name_index(), prefix),
        )
    }

    /// Lookup by fully qualified name such as `primavera.map.IntMap.IntComparator`
    ///
    /// Every split between package and name is tried, longest package
    /// first.
    ///
    /// # Errors
    /// Returns [`QueryMiss::QualifiedNotFound`] if no split names a
    /// recorded symbol.
    pub fn lookup_qualified(&self, qualified: &str) -> Result<&'a SymbolRecord, QueryMiss> {
        qualified
            .rmatch_indices('.')
            .map(|(i, _)| (&qualified[..i], &qualified[i + 1..]))
            .chain(std::iter::once(("", qualified)))
            .find_map(|(package, name)| self.catalog.get(package, name))
            .ok_or_else(|| QueryMiss::QualifiedNotFound {
                qualified: qualified.to_string(),
            })
    }
}

/// Expected, recoverable query outcome carrying no record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryMiss {
    /// No record under this key
    #[error("symbol '{name}' not found in package '{package}'")]
    NotFound {
        /// Queried package
        package: PackageRef,
        /// Queried name
        name: String,
    },

    /// No package/name split of a qualified name is recorded
    #[error("symbol '{qualified}' not found")]
    QualifiedNotFound {
        /// Queried qualified name
        qualified: String,
    },

    /// Name has no dot, so it has no enclosing symbol
    #[error("symbol '{name}' is not nested")]
    NotNested {
        /// Queried name
        name: String,
    },
}

impl QueryMiss {
    fn not_found(package: &str, name: &str) -> Self {
        Self::NotFound {
            package: PackageRef::new(package),
            name: name.to_string(),
        }
    }

    /// Check for [`QueryMiss::NotFound`] or [`QueryMiss::QualifiedNotFound`]
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::QualifiedNotFound { .. })
    }

    /// Check for [`QueryMiss::NotNested`]
    #[inline]
    #[must_use]
    pub fn is_not_nested(&self) -> bool {
        matches!(self, Self::NotNested { .. })
    }
}

/// Records matching a name prefix within a package
pub type PrefixMatches<'a> = Symbols<'a, NamePrefix<'a>>;

/// Records of one kind
pub type KindMatches<'a> = Symbols<'a, Positions<'a, SymbolKey>>;

/// Nested children of an enclosing symbol
pub type NestedSymbols<'a> = Symbols<'a, Positions<'a, String>>;

/// Cross-package simple-name matches
pub type SearchMatches<'a> = Symbols<'a, SimpleNamePrefix<'a>>;

/// Declared packages
pub type Packages<'a> = std::slice::Iter<'a, PackageRef>;

/// Lazy sequence of records resolved from arena positions
#[derive(Debug, Clone)]
pub struct Symbols<'a, I> {
    records: &'a [SymbolRecord],
    positions: I,
}

impl<'a, I> Symbols<'a, I> {
    fn new(records: &'a [SymbolRecord], positions: I) -> Self {
        Self { records, positions }
    }
}

impl<'a, I: Iterator<Item = usize>> Iterator for Symbols<'a, I> {
    type Item = &'a SymbolRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let records = self.records;
        self.positions.next().and_then(|pos| records.get(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'a, I: FusedIterator<Item = usize>> FusedIterator for Symbols<'a, I> {}

/// Positions of every entry of an ordered index
#[derive(Debug, Clone)]
pub struct Positions<'a, K> {
    values: Option<btree_map::Values<'a, K, usize>>,
}

impl<'a, K> Positions<'a, K> {
    fn new(index: Option<&'a btree_map::BTreeMap<K, usize>>) -> Self {
        Self {
            values: index.map(btree_map::BTreeMap::values),
        }
    }
}

impl<'a, K> Iterator for Positions<'a, K> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.values.as_mut()?.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<'a, K> FusedIterator for Positions<'a, K> {}

/// Positions of names starting with a prefix
///
/// Starts at the first name not below the prefix and stops at the first
/// name not starting with it: in a byte-ordered map all such names are
/// contiguous.
#[derive(Debug, Clone)]
pub struct NamePrefix<'a> {
    range: Option<btree_map::Range<'a, String, usize>>,
    prefix: String,
}

impl<'a> NamePrefix<'a> {
    fn new(index: Option<&'a NameIndex>, prefix: &str) -> Self {
        let range = index.map(|names| {
            names.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        });
        Self {
            range,
            prefix: prefix.to_string(),
        }
    }
}

impl<'a> Iterator for NamePrefix<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let range = self.range.as_mut()?;
        match range.next() {
            Some((name, &pos)) if name.starts_with(self.prefix.as_str()) => Some(pos),
            _ => {
                self.range = None;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = self.range.as_ref().and_then(|r| r.size_hint().1);
        (0, upper.or(Some(0)))
    }
}

impl<'a> FusedIterator for NamePrefix<'a> {}

/// Positions of records whose simple name starts with a prefix
#[derive(Debug, Clone)]
pub struct SimpleNamePrefix<'a> {
    range: Option<btree_map::Range<'a, (String, SymbolKey), usize>>,
    prefix: String,
}

impl<'a> SimpleNamePrefix<'a> {
    fn new(index: &'a btree_map::BTreeMap<(String, SymbolKey), usize>, prefix: &str) -> Self {
        // The empty key is the least key sharing this simple name.
        let start = (prefix.to_string(), SymbolKey::new("", ""));
        Self {
            range: Some(index.range((Bound::Included(start), Bound::Unbounded))),
            prefix: prefix.to_string(),
        }
    }
}

impl<'a> Iterator for SimpleNamePrefix<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let range = self.range.as_mut()?;
        match range.next() {
            Some(((simple, _), &pos)) if simple.starts_with(self.prefix.as_str()) => Some(pos),
            _ => {
                self.range = None;
                None
            }
        }
    }
}

impl<'a> FusedIterator for SimpleNamePrefix<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(package: &str, name: &str, kind: SymbolKind) -> SymbolRecord {
        SymbolRecord::new(package, name, kind)
    }

    fn sample() -> Catalog {
        Catalog::build(
            vec![
                PackageRef::new("primavera.map"),
                PackageRef::new("primavera.array"),
            ],
            vec![
                rec("primavera.map", "LongMap", SymbolKind::Interface),
                rec("primavera.map", "IntMap.IntEntry", SymbolKind::Interface),
                rec("primavera.map", "IntMap", SymbolKind::Interface),
                rec("primavera.map", "IntMap.IntComparator", SymbolKind::Functional),
                rec("primavera.array", "LongList", SymbolKind::Class),
                rec("primavera.array", "IntList", SymbolKind::Class),
                rec("primavera.array", "IntMap", SymbolKind::Class),
                rec("primavera.function", "IntTriFunction", SymbolKind::Functional),
            ],
        )
        .unwrap()
    }

    fn names<'a>(iter: impl Iterator<Item = &'a SymbolRecord>) -> Vec<&'a str> {
        iter.map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn lookup_exact_hit_and_miss() {
        let catalog = sample();
        let query = catalog.query();

        let found = query.lookup_exact("primavera.map", "IntMap").unwrap();
        assert_eq!(found.kind, SymbolKind::Interface);

        let miss = query.lookup_exact("primavera.map", "IntList").unwrap_err();
        assert!(miss.is_not_found());
    }

    #[test]
    fn lookup_exact_unknown_package() {
        let catalog = sample();
        assert!(catalog.query().lookup_exact("nowhere", "IntMap").is_err());
    }

    #[test]
    fn prefix_orders_by_name() {
        let catalog = sample();
        let found = names(catalog.query().find_by_prefix("primavera.array", "Int"));

        assert_eq!(found, vec!["IntList", "IntMap"]);
    }

    #[test]
    fn empty_prefix_lists_top_level_only() {
        let catalog = sample();
        let found = names(catalog.query().find_by_prefix("primavera.map", ""));

        assert_eq!(found, vec!["IntMap", "LongMap"]);
    }

    #[test]
    fn prefix_is_case_sensitive() {
        let catalog = sample();
        assert_eq!(catalog.query().find_by_prefix("primavera.array", "int").count(), 0);
    }

    #[test]
    fn prefix_does_not_reach_nested_names() {
        let catalog = sample();
        let found = names(catalog.query().find_by_prefix("primavera.map", "IntMap."));

        assert!(found.is_empty());
    }

    #[test]
    fn prefix_unknown_package_is_empty() {
        let catalog = sample();
        assert_eq!(catalog.query().find_by_prefix("nowhere", "").count(), 0);
    }

    #[test]
    fn prefix_sequence_is_restartable() {
        let catalog = sample();
        let mut matches = catalog.query().find_by_prefix("primavera.array", "");

        let first = matches.next().unwrap();
        let restart = matches.clone();

        assert_eq!(first.name, "IntList");
        assert_eq!(names(matches), names(restart));
    }

    #[test]
    fn kind_orders_by_package_then_name() {
        let catalog = sample();

        let functional = names(catalog.query().find_by_kind(SymbolKind::Functional));
        assert_eq!(functional, vec!["IntTriFunction", "IntMap.IntComparator"]);

        let classes: Vec<String> = catalog
            .query()
            .find_by_kind(SymbolKind::Class)
            .map(SymbolRecord::qualified_name)
            .collect();
        assert_eq!(
            classes,
            vec![
                "primavera.array.IntList",
                "primavera.array.IntMap",
                "primavera.array.LongList",
            ]
        );
    }

    #[test]
    fn kind_without_records_is_empty() {
        let catalog = Catalog::build(Vec::new(), vec![rec("p", "A", SymbolKind::Class)]).unwrap();
        assert_eq!(catalog.query().find_by_kind(SymbolKind::Interface).count(), 0);
    }

    #[test]
    fn nested_orders_by_suffix() {
        let catalog = sample();
        let found: Vec<&str> = catalog
            .query()
            .list_nested("primavera.map", "IntMap")
            .map(SymbolRecord::simple_name)
            .collect();

        assert_eq!(found, vec!["IntComparator", "IntEntry"]);
    }

    #[test]
    fn nested_without_children_is_empty() {
        let catalog = sample();
        let query = catalog.query();

        assert_eq!(query.list_nested("primavera.map", "LongMap").count(), 0);
        assert_eq!(query.list_nested("primavera.array", "IntMap").count(), 0);
        assert_eq!(query.list_nested("nowhere", "IntMap").count(), 0);
    }

    #[test]
    fn nested_only_direct_children() {
        let catalog = Catalog::build(
            Vec::new(),
            vec![
                rec("p", "A", SymbolKind::Class),
                rec("p", "A.B", SymbolKind::Class),
                rec("p", "A.B.C", SymbolKind::Class),
            ],
        )
        .unwrap();
        let query = catalog.query();

        assert_eq!(names(query.list_nested("p", "A")), vec!["A.B"]);
        assert_eq!(names(query.list_nested("p", "A.B")), vec!["A.B.C"]);
    }

    #[test]
    fn packages_keep_declared_order() {
        let catalog = Catalog::build(
            vec![
                PackageRef::new("z"),
                PackageRef::new("a"),
                PackageRef::new("z"),
            ],
            Vec::new(),
        )
        .unwrap();

        let packages: Vec<&str> = catalog.query().list_packages().map(PackageRef::as_str).collect();
        assert_eq!(packages, vec!["z", "a", "z"]);
    }

    #[test]
    fn resolve_enclosing_found() {
        let catalog = sample();
        let outer = catalog
            .query()
            .resolve_enclosing("primavera.map", "IntMap.IntComparator")
            .unwrap();

        assert_eq!(outer.name, "IntMap");
        assert_eq!(outer.package.as_str(), "primavera.map");
    }

    #[test]
    fn resolve_enclosing_not_nested() {
        let catalog = sample();
        let miss = catalog
            .query()
            .resolve_enclosing("primavera.map", "IntMap")
            .unwrap_err();

        assert_eq!(miss, QueryMiss::NotNested { name: "IntMap".to_string() });
    }

    #[test]
    fn resolve_enclosing_orphan_is_not_found() {
        let catalog =
            Catalog::build(Vec::new(), vec![rec("p", "Outer.Inner", SymbolKind::Class)]).unwrap();
        let miss = catalog.query().resolve_enclosing("p", "Outer.Inner").unwrap_err();

        assert!(miss.is_not_found());
        assert!(!miss.is_not_nested());
    }

    #[test]
    fn resolve_enclosing_does_not_require_nested_record() {
        let catalog = sample();
        let outer = catalog
            .query()
            .resolve_enclosing("primavera.map", "IntMap.Undocumented")
            .unwrap();

        assert_eq!(outer.name, "IntMap");
    }

    #[test]
    fn members_include_nested() {
        let catalog = sample();
        let found = names(catalog.query().list_members("primavera.map"));

        assert_eq!(
            found,
            vec!["IntMap", "IntMap.IntComparator", "IntMap.IntEntry", "LongMap"]
        );
    }

    #[test]
    fn search_spans_packages_and_nesting() {
        let catalog = sample();
        let found: Vec<String> = catalog
            .query()
            .search("Int")
            .map(SymbolRecord::qualified_name)
            .collect();

        assert_eq!(
            found,
            vec![
                "primavera.map.IntMap.IntComparator",
                "primavera.map.IntMap.IntEntry",
                "primavera.array.IntList",
                "primavera.array.IntMap",
                "primavera.map.IntMap",
                "primavera.function.IntTriFunction",
            ]
        );
    }

    #[test]
    fn search_without_match_is_empty() {
        let catalog = sample();
        assert_eq!(catalog.query().search("Zzz").count(), 0);
    }

    #[test]
    fn lookup_qualified_splits_package() {
        let catalog = sample();
        let query = catalog.query();

        let nested = query.lookup_qualified("primavera.map.IntMap.IntComparator").unwrap();
        assert_eq!(nested.name, "IntMap.IntComparator");

        let top = query.lookup_qualified("primavera.array.IntMap").unwrap();
        assert_eq!(top.kind, SymbolKind::Class);

        assert!(query.lookup_qualified("primavera.map.Missing").unwrap_err().is_not_found());
    }

    #[test]
    fn lookup_qualified_prefers_longest_package() {
        let catalog = Catalog::build(
            Vec::new(),
            vec![
                rec("a", "b.C", SymbolKind::Class),
                rec("a.b", "C", SymbolKind::Interface),
            ],
        )
        .unwrap();

        let found = catalog.query().lookup_qualified("a.b.C").unwrap();
        assert_eq!(found.package.as_str(), "a.b");
    }

    #[test]
    fn lookup_qualified_miss_names_whole_path() {
        let catalog = sample();
        let miss = catalog
            .query()
            .lookup_qualified("primavera.map.Missing")
            .unwrap_err();

        assert_eq!(
            miss,
            QueryMiss::QualifiedNotFound {
                qualified: "primavera.map.Missing".to_string()
            }
        );
        assert_eq!(miss.to_string(), "symbol 'primavera.map.Missing' not found");
        assert!(!miss.to_string().contains("package ''"));
    }

    #[test]
    fn miss_messages() {
        let not_found = QueryMiss::not_found("primavera.map", "X");
        assert_eq!(
            not_found.to_string(),
            "symbol 'X' not found in package 'primavera.map'"
        );

        let not_nested = QueryMiss::NotNested { name: "X".to_string() };
        assert_eq!(not_nested.to_string(), "symbol 'X' is not nested");
    }
}
