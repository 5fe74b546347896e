//! Loader configuration

/// Leniency settings for snapshot decoding
///
/// Defaults accept the generator's `root.js` output as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Accept a `const root = { ... };` script wrapper around the object
    pub script_wrapper: bool,

    /// Accept trailing commas before `}` and `]`
    pub trailing_commas: bool,
}

impl LoaderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain JSON only, no leniency
    #[inline]
    #[must_use]
    pub fn strict() -> Self {
        Self {
            script_wrapper: false,
            trailing_commas: false,
        }
    }

    /// With script wrapper acceptance
    #[inline]
    #[must_use]
    pub fn with_script_wrapper(mut self, enabled: bool) -> Self {
        self.script_wrapper = enabled;
        self
    }

    /// With trailing comma acceptance
    #[inline]
    #[must_use]
    pub fn with_trailing_commas(mut self, enabled: bool) -> Self {
        self.trailing_commas = enabled;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            script_wrapper: true,
            trailing_commas: true,
        }
    }
}
