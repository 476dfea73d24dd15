//! Name → compiled regex table.

use crate::error::{PatternError, Result};
use crate::patterns::PatternName;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<PatternLibrary> = OnceLock::new();

/// Wrap a caller-supplied expression so it must match the whole input.
pub fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

/// An immutable-by-convention table of named, compiled patterns.
///
/// The built-in table is compiled once per process and shared through
/// [`PatternLibrary::global`]. Callers who need different or additional
/// patterns clone it and register their own entries; the rule engine only
/// ever looks patterns up by name.
///
/// ## Example
///
/// ```rust
/// use fieldcheck_patterns::PatternLibrary;
///
/// let library = PatternLibrary::builtin()
///     .with_pattern("zip", r"^\d{5}$")
///     .unwrap();
///
/// assert!(library.is_match("zip", "90210"));
/// assert!(library.is_match("alpha", "abc"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: HashMap<String, Arc<Regex>>,
}

impl PatternLibrary {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    /// Compile every built-in pattern into a fresh table.
    pub fn builtin() -> Self {
        let mut patterns = HashMap::with_capacity(PatternName::ALL.len());
        for name in PatternName::ALL {
            // Built-in sources are constants covered by the crate's tests.
            let regex = Regex::new(name.source())
                .unwrap_or_else(|e| panic!("built-in pattern `{name}` must compile: {e}"));
            patterns.insert(name.as_str().to_string(), Arc::new(regex));
        }
        tracing::debug!(count = patterns.len(), "Compiled built-in pattern library");
        Self { patterns }
    }

    /// The process-wide built-in table, compiled on first use.
    pub fn global() -> &'static PatternLibrary {
        GLOBAL.get_or_init(PatternLibrary::builtin)
    }

    /// Register (or replace) a pattern under `name`.
    ///
    /// The expression is wrapped with [`anchored`], so `"[a-z]+"` only
    /// matches inputs made entirely of lowercase letters.
    pub fn insert(&mut self, name: impl Into<String>, pattern: &str) -> Result<()> {
        let regex =
            Regex::new(&anchored(pattern)).map_err(|e| PatternError::invalid(pattern, e))?;
        self.patterns.insert(name.into(), Arc::new(regex));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_pattern(mut self, name: impl Into<String>, pattern: &str) -> Result<Self> {
        self.insert(name, pattern)?;
        Ok(self)
    }

    /// Look a pattern up by name.
    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.patterns.get(name).map(|r| r.as_ref())
    }

    /// Look a pattern up by name, failing if it is missing.
    pub fn require(&self, name: &str) -> Result<&Regex> {
        self.get(name)
            .ok_or_else(|| PatternError::Unknown(name.to_string()))
    }

    /// Full-string match of `text` against the pattern registered as `name`.
    ///
    /// Unknown names never match.
    pub fn is_match(&self, name: &str, text: &str) -> bool {
        match self.get(name) {
            Some(regex) => regex.is_match(text),
            None => {
                tracing::debug!(pattern = name, "Pattern not registered");
                false
            }
        }
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        PatternLibrary::global().clone()
    }
}
