//! Layout document types.
//!
//! Mirrors the JSON shape emitted by the CMS layout service:
//! `{"sitecore": {"context": {...}, "route": {...} | null}}`.
//! Fields this service does not interpret are kept verbatim, and optional
//! keys absent from a route file stay absent, so exported documents pass
//! through unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A page's layout data, as read from a route file or synthesized on a miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub sitecore: SitecoreData,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `sitecore` block of a layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitecoreData {
    pub context: LayoutContext,

    /// The route's layout tree.
    ///
    /// `None` when the key is absent, `Some(None)` for an explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub route: Option<Option<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request context carried alongside the layout tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutContext {
    #[serde(
        rename = "pageEditing",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub page_editing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Marks a key as present, keeping `null` distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(Some)
}

impl LayoutDocument {
    /// Minimal document telling the renderer the page does not exist.
    pub fn not_found(site_name: &str, language: &str) -> Self {
        Self {
            sitecore: SitecoreData {
                context: LayoutContext {
                    page_editing: Some(false),
                    site: Some(SiteInfo {
                        name: Some(site_name.to_string()),
                        extra: Map::new(),
                    }),
                    language: Some(language.to_string()),
                    extra: Map::new(),
                },
                route: Some(None),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// The layout tree, if the document has one.
    pub fn route(&self) -> Option<&Value> {
        self.sitecore.route.as_ref().and_then(Option::as_ref)
    }

    /// True when the document carries no route.
    pub fn is_not_found(&self) -> bool {
        self.route().is_none()
    }

    pub fn page_editing(&self) -> bool {
        self.sitecore.context.page_editing.unwrap_or(false)
    }

    pub fn language(&self) -> &str {
        self.sitecore.context.language.as_deref().unwrap_or_default()
    }

    pub fn site_name(&self) -> &str {
        self.sitecore
            .context
            .site
            .as_ref()
            .and_then(|site| site.name.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_shape() {
        let doc = LayoutDocument::not_found("website", "da-dk");
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value,
            json!({
                "sitecore": {
                    "context": {
                        "pageEditing": false,
                        "site": { "name": "website" },
                        "language": "da-dk"
                    },
                    "route": null
                }
            })
        );
        assert!(doc.is_not_found());
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "sitecore": {
                "context": {
                    "pageEditing": false,
                    "site": { "name": "website", "hostName": "example.com" },
                    "language": "en",
                    "itemPath": "/about",
                    "pageState": "normal"
                },
                "route": {
                    "name": "about",
                    "placeholders": { "jss-main": [] }
                }
            }
        });

        let doc: LayoutDocument = serde_json::from_value(raw.clone()).unwrap();
        assert!(!doc.is_not_found());
        assert_eq!(doc.language(), "en");
        assert_eq!(doc.sitecore.context.extra["itemPath"], "/about");
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn test_absent_keys_stay_absent() {
        let raw = json!({
            "sitecore": {
                "context": { "site": { "hostName": "example.com" } }
            }
        });

        let doc: LayoutDocument = serde_json::from_value(raw.clone()).unwrap();
        assert!(doc.is_not_found());
        assert!(!doc.page_editing());
        assert_eq!(doc.site_name(), "");
        assert_eq!(doc.language(), "");
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn test_explicit_null_route_is_kept() {
        let raw = json!({ "sitecore": { "context": {}, "route": null } });

        let doc: LayoutDocument = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.sitecore.route, Some(None));
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }
}
