//! docindex Symbol Catalog
//!
//! Immutable registry of documented types with ordered lookup indexes.
//!
//! # Overview
//!
//! The symbol system provides:
//! - **SymbolRecord**: A documented type (interface, class, functional type)
//! - **Catalog**: Validated, indexed, read-only collection built from a batch
//! - **QueryEngine**: Exact, prefix, kind and nesting queries over a catalog
//!
//! # Example
//!
//! ```rust
//! use docindex_symbol::{Catalog, PackageRef, SymbolKind, SymbolRecord};
//!
//! let catalog = Catalog::build(
//!     vec![PackageRef::new("primavera.array")],
//!     vec![
//!         SymbolRecord::new("primavera.array", "IntList", SymbolKind::Class),
//!         SymbolRecord::new("primavera.array", "IntMap", SymbolKind::Class),
//!         SymbolRecord::new("primavera.array", "LongList", SymbolKind::Class),
//!     ],
//! )
//! .unwrap();
//!
//! let names: Vec<_> = catalog
//!     .query()
//!     .find_by_prefix("primavera.array", "Int")
//!     .map(|r| r.name.as_str())
//!     .collect();
//! assert_eq!(names, ["IntList", "IntMap"]);
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod query;
pub mod symbol;
pub mod validation;

// Re-exports
pub use catalog::{Batch, Catalog, CatalogStats};
pub use query::{
    KindMatches, NestedSymbols, Packages, PrefixMatches, QueryEngine, QueryMiss, SearchMatches,
};
pub use symbol::{
    split_nested, Attributes, PackageRef, SymbolKey, SymbolKind, SymbolRecord, UnknownKind,
};
pub use validation::{BatchValidator, CatalogError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog operations
    pub use crate::{
        Batch, Catalog, CatalogError, PackageRef, QueryEngine, QueryMiss, SymbolKey, SymbolKind,
        SymbolRecord,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
