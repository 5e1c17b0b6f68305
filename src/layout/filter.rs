//! Static asset and system route detection.
//!
//! # Responsibilities
//! - Recognise build-tool internals, well-known URIs, asset files and devtools requests
//! - Keep those paths away from the route store and the warning log
//!
//! # Design Decisions
//! - Matching is case-sensitive, like the rendering host's own routing
//! - Any matcher hit classifies the path (OR semantics)
//! - No regex; prefix and substring checks only

/// Path prefixes owned by the rendering host or the web server.
pub const DEFAULT_STATIC_PREFIXES: &[&str] = &["/_next/", "/.well-known/"];

/// Substrings marking asset files and tooling requests.
pub const DEFAULT_STATIC_SUBSTRINGS: &[&str] =
    &[".css", ".js", ".webpack", "devtools", "favicon"];

/// Trait for matching request paths against a condition.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches paths starting with a fixed prefix.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl PathMatcher for PrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches paths containing a fixed substring anywhere.
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    needle: String,
}

impl ContainsMatcher {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl PathMatcher for ContainsMatcher {
    fn matches(&self, path: &str) -> bool {
        path.contains(&self.needle)
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn PathMatcher>>,
}

impl AnyMatcher {
    pub fn push(&mut self, matcher: impl PathMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }
}

impl PathMatcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

/// Classifies paths that must never reach the route store.
#[derive(Debug)]
pub struct StaticAssetFilter {
    matcher: AnyMatcher,
}

impl StaticAssetFilter {
    /// Build the filter from the built-in patterns plus configured extras.
    pub fn new(extra_prefixes: &[String], extra_substrings: &[String]) -> Self {
        let mut matcher = AnyMatcher::default();

        let prefixes = DEFAULT_STATIC_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .chain(extra_prefixes.iter().cloned());
        for prefix in prefixes.filter(|p| !p.is_empty()) {
            matcher.push(PrefixMatcher::new(prefix));
        }

        let substrings = DEFAULT_STATIC_SUBSTRINGS
            .iter()
            .map(|s| s.to_string())
            .chain(extra_substrings.iter().cloned());
        for needle in substrings.filter(|s| !s.is_empty()) {
            matcher.push(ContainsMatcher::new(needle));
        }

        Self { matcher }
    }

    /// Returns true if the path is a static asset or system route.
    pub fn is_static(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Number of active patterns.
    pub fn pattern_count(&self) -> usize {
        self.matcher.matchers.len()
    }
}

impl Default for StaticAssetFilter {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}
