//! Snapshot decoding
//!
//! Accepts either plain JSON or the script form written by the
//! documentation generator:
//!
//! ```text
//! const root = {
//!     "packages": ["primavera.map",],
//!     "types": [ ... ]
//! }
//! ```
//!
//! Leniencies are applied by overwriting the offending characters with
//! spaces, so decoder line and column numbers still point into the
//! original text. A leading byte-order mark is always blanked the same
//! way.

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::raw::{PassThrough, RawSnapshot};
use docindex_symbol::Catalog;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::path::Path;

const BYTE_ORDER_MARK: char = '\u{feff}';

static SCRIPT_WRAPPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:const|let|var)\s+[A-Za-z_$][A-Za-z0-9_$]*\s*=\s*")
        .expect("script wrapper pattern is valid")
});

// String literals are matched first so commas inside them are left alone.
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|,(\s*[}\]])"#).expect("trailing comma pattern is valid")
});

/// Snapshot text format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Bare JSON object
    Json,

    /// Object assigned to a variable in a script
    Script,
}

impl SnapshotFormat {
    /// Guess the format from the leading text
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        if text.trim_start().starts_with('{') {
            Some(Self::Json)
        } else if SCRIPT_WRAPPER.is_match(text) {
            Some(Self::Script)
        } else {
            None
        }
    }

    /// File extensions conventionally used (without dot)
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Script => &["js"],
        }
    }
}

/// Decoded index: the catalog plus uninterpreted snapshot fields
#[derive(Debug, Clone)]
pub struct LoadedIndex {
    /// Built catalog
    pub catalog: Catalog,

    /// Fields carried through verbatim
    pub pass_through: PassThrough,
}

/// Turns snapshot text into a [`Catalog`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotLoader {
    config: LoaderConfig,
}

impl SnapshotLoader {
    /// Create loader with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create loader with explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Decode snapshot text into its raw shape
    ///
    /// # Errors
    /// - [`LoadError::MissingObject`] if the text is neither a JSON object
    ///   nor an accepted script wrapper around one
    /// - [`LoadError::Syntax`] if the object is malformed
    pub fn parse_str(&self, text: &str) -> Result<RawSnapshot, LoadError> {
        let normalized = self.normalize(text)?;
        let snapshot = serde_json::from_str(&normalized)?;
        Ok(snapshot)
    }

    /// Decode text and build a catalog
    ///
    /// # Errors
    /// Any [`LoadError`]; catalog validation failures arrive as
    /// [`LoadError::Catalog`].
    pub fn load_str(&self, text: &str) -> Result<LoadedIndex, LoadError> {
        let raw = self.parse_str(text)?;
        let (batch, pass_through) = raw.split()?;

        let catalog = Catalog::from_batch(batch)?;
        tracing::info!(
            "Loaded {} symbols, {} declared packages",
            catalog.len(),
            catalog.declared_packages().len()
        );

        Ok(LoadedIndex {
            catalog,
            pass_through,
        })
    }

    /// Read a snapshot file and build a catalog
    ///
    /// # Errors
    /// [`LoadError::Io`] if the file cannot be read, otherwise as
    /// [`SnapshotLoader::load_str`].
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadedIndex, LoadError> {
        let path = path.as_ref();
        tracing::debug!("Reading snapshot {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
        self.load_str(&text)
    }

    /// Apply configured leniencies
    fn normalize<'t>(&self, text: &'t str) -> Result<Cow<'t, str>, LoadError> {
        let text: Cow<'t, str> = match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => Cow::Owned(format!(" {rest}")),
            None => Cow::Borrowed(text),
        };

        let mut out = match SnapshotFormat::detect(&text) {
            Some(SnapshotFormat::Json) => text,
            Some(SnapshotFormat::Script) if self.config.script_wrapper => {
                tracing::debug!("Stripping script wrapper from snapshot");
                Cow::Owned(strip_script_wrapper(&text))
            }
            _ => return Err(LoadError::MissingObject),
        };

        if self.config.trailing_commas {
            let cleaned = match blank_trailing_commas(&out) {
                Cow::Owned(cleaned) => Some(cleaned),
                Cow::Borrowed(_) => None,
            };
            if let Some(cleaned) = cleaned {
                out = Cow::Owned(cleaned);
            }
        }

        Ok(out)
    }
}

/// Blank the `const root =` prefix and a final `;`
fn strip_script_wrapper(text: &str) -> String {
    let mut out = SCRIPT_WRAPPER
        .replace(text, |caps: &Captures<'_>| blank(&caps[0]))
        .into_owned();

    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(';') {
        out.replace_range(trimmed_len - 1..trimmed_len, " ");
    }
    out
}

/// Replace each trailing comma with a space, preserving string literals
fn blank_trailing_commas(text: &str) -> Cow<'_, str> {
    TRAILING_COMMA.replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
        Some(close) => format!(" {}", close.as_str()),
        None => caps[0].to_string(),
    })
}

/// Same-length whitespace, newlines kept
fn blank(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' { '\n' } else { ' ' })
        .collect()
}
