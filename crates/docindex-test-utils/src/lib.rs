//! Testing utilities for docindex workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use docindex_loader::SnapshotLoader;
use docindex_symbol::{Batch, Catalog, PackageRef, SymbolKind, SymbolRecord};
use once_cell::sync::Lazy;
use serde_json::json;

/// Generator output for the primavera collections library, verbatim
pub const PRIMAVERA_SNAPSHOT: &str = include_str!("../fixtures/primavera_root.js");

/// Modifier tag carried by every primavera record
pub const PRIMAVERA_MODIFIER: &str = "java.util.Collections$UnmodifiableSet";

static PRIMAVERA: Lazy<Catalog> = Lazy::new(|| {
    SnapshotLoader::new()
        .load_str(PRIMAVERA_SNAPSHOT)
        .expect("primavera fixture loads")
        .catalog
});

/// Catalog built once from [`PRIMAVERA_SNAPSHOT`]
pub fn primavera_catalog() -> &'static Catalog {
    &PRIMAVERA
}

pub fn record(package: &str, name: &str, kind: SymbolKind) -> SymbolRecord {
    SymbolRecord::new(package, name, kind)
}

/// Record tagged the way the generator tags them
pub fn tagged_record(package: &str, name: &str, kind: SymbolKind) -> SymbolRecord {
    record(package, name, kind).with_attribute("#", json!(PRIMAVERA_MODIFIER))
}

/// Small map/array batch with one nested family and one orphan
pub fn sample_batch() -> Batch {
    Batch::new()
        .with_package("primavera.map")
        .with_package("primavera.array")
        .with_symbol(tagged_record("primavera.map", "IntMap", SymbolKind::Interface))
        .with_symbol(tagged_record("primavera.map", "IntMap.IntComparator", SymbolKind::Functional))
        .with_symbol(tagged_record("primavera.map", "IntMap.IntEntry", SymbolKind::Interface))
        .with_symbol(tagged_record("primavera.map", "LongMap.LongEntry", SymbolKind::Interface))
        .with_symbol(tagged_record("primavera.array", "LongList", SymbolKind::Class))
        .with_symbol(tagged_record("primavera.array", "IntList", SymbolKind::Class))
}

pub fn sample_catalog() -> Catalog {
    Catalog::from_batch(sample_batch()).expect("sample batch is valid")
}

/// Reverse the symbol order, keeping the package list as declared
pub fn reversed(batch: &Batch) -> Batch {
    Batch {
        packages: batch.packages.clone(),
        symbols: batch.symbols.iter().rev().cloned().collect(),
    }
}

pub fn package_names<'a>(packages: impl IntoIterator<Item = &'a PackageRef>) -> Vec<&'a str> {
    packages.into_iter().map(PackageRef::as_str).collect()
}

pub fn names<'a>(records: impl IntoIterator<Item = &'a SymbolRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.name.as_str()).collect()
}
