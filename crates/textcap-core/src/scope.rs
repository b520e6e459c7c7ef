//! Glob-based scope matching.
//!
//! Decides whether a document falls under the limit by matching its path
//! against the configured `file_pattern`. Without `literal_separator`, `*`
//! crosses directory boundaries, so `*.md` matches `notes/today.md`.

use globset::{Glob, GlobMatcher};

use crate::config::LimitConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::host::ScopeMatcher;

/// Compiled scope pattern.
#[derive(Debug, Clone)]
pub struct GlobScope {
    pattern: String,
    matcher: GlobMatcher,
}

impl GlobScope {
    /// Compile `pattern` into a scope matcher.
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Compile the pattern from a limit configuration.
    pub fn from_config(config: &LimitConfig) -> ConfigResult<Self> {
        Self::new(&config.file_pattern)
    }

    /// The pattern as written.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl ScopeMatcher for GlobScope {
    fn is_in_scope(&self, document: &str) -> bool {
        let matched = self.matcher.is_match(document);
        tracing::trace!(document, pattern = %self.pattern, matched, "scope check");
        matched
    }
}
