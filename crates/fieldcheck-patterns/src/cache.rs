//! Compiled-pattern cache for caller-supplied expressions.

use crate::error::{PatternError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static GLOBAL: OnceLock<PatternCache> = OnceLock::new();

/// Thread-safe cache of compiled expressions keyed by their source text.
///
/// Used by rules that take a pattern as an argument so a hot validation path
/// compiles each distinct expression once.
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: RwLock<HashMap<String, Arc<Regex>>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static PatternCache {
        GLOBAL.get_or_init(PatternCache::new)
    }

    /// Return the compiled form of `pattern`, compiling and storing it on a miss.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Regex>> {
        if let Some(regex) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pattern)
        {
            return Ok(Arc::clone(regex));
        }

        let compiled = Regex::new(pattern).map_err(|e| PatternError::invalid(pattern, e))?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let regex = entries
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::new(compiled));
        tracing::trace!(pattern, "Cached compiled pattern");
        Ok(Arc::clone(regex))
    }

    /// Whether `pattern` has already been compiled.
    pub fn contains(&self, pattern: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(pattern)
    }

    /// Number of cached expressions.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached expression.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
