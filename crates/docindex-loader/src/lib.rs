//! docindex Snapshot Loader
//!
//! Decodes documentation index snapshots into [`Catalog`]s.
//!
//! # Overview
//!
//! - **RawSnapshot**: The index object exactly as the generator writes it
//! - **SnapshotLoader**: JSON or `const root = {...}` text to catalog
//! - **LoaderConfig**: Leniency switches for generator quirks
//!
//! # Example
//!
//! ```rust
//! use docindex_loader::SnapshotLoader;
//!
//! let text = r#"const root = {
//!     "packages": ["primavera.set",],
//!     "types": [
//!         {"name": "IntSet", "packageName": "primavera.set", "type": "Interface"},
//!     ]
//! }"#;
//!
//! let loaded = SnapshotLoader::new().load_str(text).unwrap();
//! assert!(loaded.catalog.contains("primavera.set", "IntSet"));
//! ```
//!
//! [`Catalog`]: docindex_symbol::Catalog

#![warn(missing_docs)]

mod config;
mod error;
mod raw;
mod snapshot;

// Re-exports
pub use config::LoaderConfig;
pub use error::LoadError;
pub use raw::{PassThrough, RawSnapshot, RawType};
pub use snapshot::{LoadedIndex, SnapshotFormat, SnapshotLoader};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
