//! Shim configuration

use crate::defaults::DEFAULT_BACKING_FIELD_PREFIX;
use crate::reflect::MatchMode;

/// Configuration for a [`Shim`](crate::Shim)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimOptions {
    /// Member name matching (default: exact)
    pub match_mode: MatchMode,
    /// Prefix used to locate backing fields of synthesized objects (default: `"_"`)
    pub backing_field_prefix: String,
}

impl Default for ShimOptions {
    fn default() -> Self {
        ShimOptions {
            match_mode: MatchMode::Exact,
            backing_field_prefix: DEFAULT_BACKING_FIELD_PREFIX.to_string(),
        }
    }
}

impl ShimOptions {
    /// Exact (case-sensitive) matching; same as `default()`
    pub fn exact() -> Self {
        Self::default()
    }

    /// Fuzzy (case-insensitive) matching with argument reordering
    pub fn fuzzy() -> Self {
        ShimOptions {
            match_mode: MatchMode::Fuzzy,
            ..Self::default()
        }
    }

    /// Set the match mode
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the backing field prefix
    pub fn with_backing_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.backing_field_prefix = prefix.into();
        self
    }

    /// Whether lookups are case-insensitive
    pub fn is_fuzzy(&self) -> bool {
        self.match_mode == MatchMode::Fuzzy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ShimOptions::default();
        assert_eq!(options.match_mode, MatchMode::Exact);
        assert_eq!(options.backing_field_prefix, "_");
        assert!(!options.is_fuzzy());
        assert_eq!(ShimOptions::exact(), options);
    }

    #[test]
    fn test_builders() {
        let options = ShimOptions::fuzzy().with_backing_field_prefix("m_");
        assert!(options.is_fuzzy());
        assert_eq!(options.backing_field_prefix, "m_");

        let options = options.with_match_mode(MatchMode::Exact);
        assert!(!options.is_fuzzy());
    }
}
