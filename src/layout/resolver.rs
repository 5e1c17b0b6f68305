//! Route-to-layout resolution.
//!
//! # Responsibilities
//! - Skip static asset and system routes without touching the store
//! - Load the artifact for the derived route key
//! - Fall back to a language default document on a miss
//! - Synthesize a "not found" document when nothing can be loaded
//!
//! # Design Decisions
//! - `resolve` never fails; failure is reported through `route: null`
//! - Missing routes fall back to the configured default language unless
//!   `FallbackLanguage::Requested` is set
//! - Each call is independent; no state is shared between calls

use std::time::Instant;

use crate::config::schema::{FallbackLanguage, LayoutConfig};
use crate::layout::filter::StaticAssetFilter;
use crate::layout::key::{Language, RouteKey};
use crate::layout::store::{FileRouteStore, RouteDataStore, StoreError};
use crate::layout::types::LayoutDocument;
use crate::observability::metrics;

/// Settings passed explicitly into a resolver.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Site name reported in synthesized documents.
    pub site_name: String,
    /// Language used when a request has none.
    pub default_language: Language,
    /// Fallback policy for missing routes.
    pub fallback: FallbackLanguage,
}

impl ResolverSettings {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let default_language = Language::parse(&config.default_language).unwrap_or_else(|| {
            tracing::warn!(
                language = %config.default_language,
                "Invalid default language, using built-in default"
            );
            Language::default()
        });

        Self {
            site_name: config.site_name.clone(),
            default_language,
            fallback: config.fallback_language,
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

/// How a document was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The artifact for the requested page was found.
    Route { key: RouteKey },
    /// A language default document was served instead.
    Fallback { language: Language },
    /// The path is a static asset or system route; nothing was looked up.
    StaticAsset,
    /// Nothing could be loaded; the document is synthetic.
    NotFound,
}

impl Resolution {
    /// Stable label used in headers and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Route { .. } => "route",
            Resolution::Fallback { .. } => "fallback",
            Resolution::StaticAsset => "static-asset",
            Resolution::NotFound => "not-found",
        }
    }

    /// True when the document came from the store.
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Route { .. } | Resolution::Fallback { .. })
    }
}

/// A resolved document and how it was obtained.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub document: LayoutDocument,
    pub resolution: Resolution,
}

/// Resolves request paths to layout documents.
#[derive(Debug)]
pub struct LayoutResolver<S> {
    store: S,
    filter: StaticAssetFilter,
    settings: ResolverSettings,
}

impl LayoutResolver<FileRouteStore> {
    /// Build a file-backed resolver from the `[layout]` config section.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(
            FileRouteStore::new(&config.data_dir),
            StaticAssetFilter::new(&config.extra_static_prefixes, &config.extra_static_substrings),
            ResolverSettings::from_config(config),
        )
    }
}

impl<S: RouteDataStore> LayoutResolver<S> {
    pub fn new(store: S, filter: StaticAssetFilter, settings: ResolverSettings) -> Self {
        Self {
            store,
            filter,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve a path and optional language to a layout document.
    pub async fn resolve(&self, path: &str, language: Option<&str>) -> LayoutDocument {
        self.resolve_detailed(path, language).await.document
    }

    /// Like [`resolve`](Self::resolve), also reporting how the document was found.
    pub async fn resolve_detailed(&self, path: &str, language: Option<&str>) -> Resolved {
        let started = Instant::now();
        let resolved = self.lookup(path, language).await;
        metrics::record_resolution(resolved.resolution.as_str(), started);
        resolved
    }

    async fn lookup(&self, path: &str, requested: Option<&str>) -> Resolved {
        let language = Language::resolve(requested, &self.settings.default_language);

        // Static assets are answered silently, before anything else is inspected.
        if self.filter.is_static(path) {
            return Resolved {
                document: self.not_found(&language),
                resolution: Resolution::StaticAsset,
            };
        }

        if let Some(code) = requested.filter(|c| !c.is_empty() && Language::parse(c).is_none()) {
            tracing::debug!(language = %code, "Ignoring malformed language code");
        }

        let is_home = path.is_empty() || path == "/";
        if !is_home {
            match RouteKey::derive(path, &language) {
                Ok(key) => match self.store.load(&key).await {
                    Ok(document) => {
                        return Resolved {
                            document,
                            resolution: Resolution::Route { key },
                        };
                    }
                    Err(e) => log_miss(path, &e),
                },
                Err(e) => {
                    tracing::debug!(path = %path, error = %e, "Path cannot be mapped to a route key");
                }
            }
        }

        for candidate in self.default_candidates(&language, is_home) {
            let key = RouteKey::default_document(&candidate);
            match self.store.load(&key).await {
                Ok(document) => {
                    let resolution = if is_home && candidate == language {
                        Resolution::Route { key }
                    } else {
                        tracing::debug!(path = %path, fallback = %candidate, "Serving default document");
                        Resolution::Fallback {
                            language: candidate,
                        }
                    };
                    return Resolved {
                        document,
                        resolution,
                    };
                }
                Err(e) => log_miss(path, &e),
            }
        }

        tracing::warn!(
            path = %path,
            language = %language,
            "No layout data found"
        );

        Resolved {
            document: self.not_found(&language),
            resolution: Resolution::NotFound,
        }
    }

    /// Languages whose default document may stand in for the page, in order.
    fn default_candidates(&self, language: &Language, is_home: bool) -> Vec<Language> {
        let default = &self.settings.default_language;
        let requested_first = is_home || self.settings.fallback == FallbackLanguage::Requested;

        let mut candidates = Vec::with_capacity(2);
        if requested_first && language != default {
            candidates.push(language.clone());
        }
        candidates.push(default.clone());
        candidates
    }

    fn not_found(&self, language: &Language) -> LayoutDocument {
        LayoutDocument::not_found(&self.settings.site_name, language.as_str())
    }
}

fn log_miss(path: &str, error: &StoreError) {
    if error.is_not_found() {
        tracing::debug!(path = %path, error = %error, "Layout artifact missing");
    } else {
        tracing::warn!(path = %path, error = %error, "Layout artifact unreadable");
    }
}
