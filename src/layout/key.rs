//! Route key derivation.
//!
//! A request path and language map to the file stem of a route artifact:
//! `/Products/Shoes/` + `en` → `products-shoes-en`.
//!
//! # Design Decisions
//! - Keys are lower-case; Unicode and spaces pass through untouched
//! - Backslashes, drive colons, control characters and dot segments are
//!   rejected, never resolved
//! - Derivation is a pure function of (path, language)

use std::fmt;
use thiserror::Error;

/// Stem used when a path normalizes to nothing (e.g. `//`).
pub const HOME_STEM: &str = "home";

/// Language used when neither the request nor the config supplies one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Longest key accepted, leaving room for the `.json` suffix in a 255-byte file name.
const MAX_KEY_LEN: usize = 250;

/// Longest accepted language code (BCP 47 tags top out at 35 characters).
const MAX_LANGUAGE_LEN: usize = 35;

/// Reasons a path cannot be turned into a route key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("character {0:?} is not allowed in a route key")]
    InvalidCharacter(char),

    #[error("dot segments are not allowed in a route key")]
    DotSegment,

    #[error("route key is {0} bytes long")]
    TooLong(usize),
}

/// A validated, lower-case language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

impl Language {
    /// Parse a language code, returning `None` for empty or malformed input.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        let valid = !code.is_empty()
            && code.len() <= MAX_LANGUAGE_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        valid.then(|| Self(code.to_ascii_lowercase()))
    }

    /// Pick the requested language, or `default` when it is absent or invalid.
    pub fn resolve(requested: Option<&str>, default: &Language) -> Language {
        requested
            .and_then(Self::parse)
            .unwrap_or_else(|| default.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File stem of a route artifact in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    /// Derive the key for a page path in the given language.
    pub fn derive(path: &str, language: &Language) -> Result<Self, KeyError> {
        let stem = normalize_path(path)?;
        Self::checked(format!("{stem}-{language}"))
    }

    /// Key of a language's default (home) document.
    pub fn default_document(language: &Language) -> Self {
        Self(language.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the artifact file holding this key's document.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    fn checked(key: String) -> Result<Self, KeyError> {
        if key.len() > MAX_KEY_LEN {
            return Err(KeyError::TooLong(key.len()));
        }
        Ok(Self(key))
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn a request path into a key stem.
///
/// Query strings and fragments are dropped, empty segments collapse, and
/// the remaining segments are lower-cased and joined with `-`.
pub fn normalize_path(path: &str) -> Result<String, KeyError> {
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let mut segments = Vec::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment.chars().all(|c| c == '.') {
            return Err(KeyError::DotSegment);
        }
        if let Some(c) = segment.chars().find(|&c| is_forbidden(c)) {
            return Err(KeyError::InvalidCharacter(c));
        }
        segments.push(segment.to_lowercase());
    }

    if segments.is_empty() {
        return Ok(HOME_STEM.to_string());
    }
    Ok(segments.join("-"))
}

/// Characters that could escape the data directory or break a file name.
fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | ':') || c.is_control()
}
