//! # fieldcheck patterns
//!
//! The named regular expressions consulted by the `fieldcheck` rule engine.
//!
//! The library is a plain name → compiled [`Regex`](regex::Regex) table. The
//! engine looks entries up by fixed keys (`"alpha"`, `"email"`, `"url"`, ...)
//! and never mutates the table, so callers can substitute or extend it
//! without touching rule logic.
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck_patterns::{PatternLibrary, PatternName};
//!
//! let library = PatternLibrary::global();
//! assert!(library.is_match(PatternName::HexColor.as_str(), "#1e90ff"));
//! assert!(!library.is_match("email", "not-an-email"));
//! ```
//!
//! Patterns supplied at runtime go through [`PatternCache`], which compiles
//! each distinct expression once.

mod cache;
mod error;
mod library;
pub mod patterns;

pub use cache::PatternCache;
pub use error::{PatternError, Result};
pub use library::{anchored, PatternLibrary};
pub use patterns::PatternName;
