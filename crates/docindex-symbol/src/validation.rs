//! Batch validation ahead of indexing
//!
//! Provides [`BatchValidator`] for the uniqueness check that guards
//! catalog construction, plus orphan diagnostics for nested symbols.

use crate::symbol::{PackageRef, SymbolKey, SymbolRecord};
use std::collections::{HashMap, HashSet};

/// Uniqueness validation for an ingestion batch
///
/// Runs before any index is built so a rejected batch never produces a
/// partial catalog.
#[derive(Debug, Clone, Copy)]
pub struct BatchValidator;

impl BatchValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate that no two records share `(package, name)`
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateSymbol`] for the first collision
    /// in ingestion order.
    pub fn check_unique(&self, symbols: &[SymbolRecord]) -> Result<(), CatalogError> {
        let mut seen: HashMap<(&str, &str), usize> = HashMap::with_capacity(symbols.len());

        for (i, record) in symbols.iter().enumerate() {
            let key = (record.package.as_str(), record.name.as_str());
            if let Some(&first) = seen.get(&key) {
                return Err(CatalogError::DuplicateSymbol {
                    package: record.package.clone(),
                    name: record.name.clone(),
                    first_index: first,
                    duplicate_index: i,
                });
            }
            seen.insert(key, i);
        }

        Ok(())
    }

    /// Nested records whose enclosing symbol is not part of the batch
    ///
    /// Orphans are accepted; this is purely diagnostic. Keys are returned
    /// in ingestion order.
    #[must_use]
    pub fn find_orphans(&self, symbols: &[SymbolRecord]) -> Vec<SymbolKey> {
        let names: HashSet<(&str, &str)> = symbols
            .iter()
            .map(|r| (r.package.as_str(), r.name.as_str()))
            .collect();

        symbols
            .iter()
            .filter(|r| {
                r.enclosing_name()
                    .is_some_and(|outer| !names.contains(&(r.package.as_str(), outer)))
            })
            .map(SymbolRecord::key)
            .collect()
    }
}

impl Default for BatchValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog construction errors
///
/// Construction is all-or-nothing: any of these means no catalog was built
/// and the batch has to be discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two records share `(package, name)`
    #[error("duplicate symbol '{name}' in package '{package}' (records {first_index} and {duplicate_index})")]
    DuplicateSymbol {
        /// Package of the colliding records
        package: PackageRef,
        /// Name of the colliding records
        name: String,
        /// Position of the first occurrence in the batch
        first_index: usize,
        /// Position of the rejected occurrence in the batch
        duplicate_index: usize,
    },
}

impl CatalogError {
    /// Check if this is a duplicate-symbol rejection
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateSymbol { .. })
    }

    /// Offending `(package, name)` key
    #[must_use]
    pub fn key(&self) -> SymbolKey {
        match self {
            Self::DuplicateSymbol { package, name, .. } => SymbolKey {
                package: package.clone(),
                name: name.clone(),
            },
        }
    }
}
