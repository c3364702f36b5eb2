//! Result types produced by the pipeline stages.
//!
//! Each stage hands back a plain value (`FetchResult`, `ResolvedMetadata`,
//! `ImageSet`, ...) that the [`Article`](crate::Article) commits under its
//! state guard.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one Loader invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// Raw HTML of the final document; empty on failure.
    pub html: String,

    /// URL the HTML was ultimately taken from.
    pub final_url: String,

    /// HTTP status of the last response, when one was received.
    pub status_code: Option<u16>,

    /// Human-readable failure reason. `None` means the fetch succeeded.
    pub failure_reason: Option<String>,
}

impl FetchResult {
    /// Successful result.
    #[must_use]
    pub fn success(html: String, final_url: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            html,
            final_url: final_url.into(),
            status_code,
            failure_reason: None,
        }
    }

    /// Failed result carrying a reason.
    #[must_use]
    pub fn failure(
        final_url: impl Into<String>,
        status_code: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            html: String::new(),
            final_url: final_url.into(),
            status_code,
            failure_reason: Some(reason.into()),
        }
    }

    /// Whether the fetch succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure_reason.is_none()
    }
}

/// Pipeline state of one article.
///
/// Advances `NotStarted -> Fetched -> Parsed`, or `NotStarted ->
/// FailedFetch`. `Parsed` and `FailedFetch` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionState {
    #[default]
    NotStarted,
    FailedFetch,
    Fetched,
    Parsed,
}

impl ExtractionState {
    /// Whether a transition from `self` to `next` is allowed.
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Fetched | Self::FailedFetch) | (Self::Fetched, Self::Parsed)
        )
    }
}

/// A node of the namespaced meta tree.
///
/// `og:image:width = 1200` is stored as
/// `{"og": {"image": {"width": 1200}}}`. When a key is both a leaf and a
/// prefix (`og:image` and `og:image:width`) the leaf moves under the
/// synthetic `identifier` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(i64),
    Text(String),
    Map(BTreeMap<String, MetaValue>),
}

impl MetaValue {
    /// Synthetic field holding a scalar that was displaced by deeper keys.
    pub const IDENTIFIER: &'static str = "identifier";

    /// Follow a `:`-separated path through nested maps.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&MetaValue> {
        let mut current = self;
        for part in path.split(':') {
            match current {
                MetaValue::Map(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Scalar view of the value; maps answer with their `identifier`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            MetaValue::Number(n) => Some(n.to_string()),
            MetaValue::Text(s) => Some(s.clone()),
            MetaValue::Map(map) => map.get(Self::IDENTIFIER).and_then(MetaValue::as_text),
        }
    }
}

/// Output of the Metadata Extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    /// Best-guess title; empty when the document has none.
    pub title: String,

    /// Author names, case-insensitively unique, first-seen order.
    pub authors: Vec<String>,

    /// Best-scoring publish date candidate.
    pub publish_date: Option<DateTime<Utc>>,

    /// Two-letter language declared by the document, or empty.
    pub language: String,

    /// `og:type`.
    pub meta_type: String,

    /// `og:site_name`.
    pub site_name: String,

    /// `<meta name="description">`.
    pub description: String,

    /// Canonical link, absolute when the document's link could be resolved.
    pub canonical_link: String,

    /// Keywords from `<meta name="keywords">`, in declaration order.
    pub keywords: Vec<String>,

    /// Text of `rel="tag"` anchors.
    pub tags: BTreeSet<String>,

    /// All namespaced meta properties.
    pub meta_data: BTreeMap<String, MetaValue>,
}

impl ResolvedMetadata {
    /// Look up a namespaced meta property such as `og:image:width`.
    #[must_use]
    pub fn meta(&self, path: &str) -> Option<&MetaValue> {
        let (head, rest) = match path.split_once(':') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let root = self.meta_data.get(head)?;
        match rest {
            Some(rest) => root.get(rest),
            None => Some(root),
        }
    }
}

/// Images discovered for an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    /// Representative image: meta image when present, else the first
    /// image inside the top node.
    pub top_image: String,

    /// `og:image` or `link[rel=image_src]`.
    pub meta_image: String,

    /// All image URLs in the document, absolute, first-seen order.
    pub images: Vec<String>,

    /// Site favicon.
    pub favicon: String,
}

/// An embedded video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Embed URL.
    pub src: String,

    /// Known provider (`youtube`, `vimeo`, ...), when recognised.
    pub provider: Option<String>,

    /// Embed tag the video was found in.
    pub embed_type: String,

    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Serializable snapshot of an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleOutput {
    pub url: String,
    pub original_url: String,
    pub source_url: String,
    pub state: ExtractionState,
    pub download_failure: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub text: String,
    pub top_image: String,
    pub meta_image: String,
    pub images: Vec<String>,
    pub movies: Vec<String>,
    pub keywords: Vec<String>,
    pub meta_keywords: Vec<String>,
    pub tags: BTreeSet<String>,
    pub summary: String,
    pub meta_description: String,
    pub meta_lang: String,
    pub meta_site_name: String,
    pub meta_favicon: String,
    pub canonical_link: String,
    pub meta_data: BTreeMap<String, MetaValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        use ExtractionState::{FailedFetch, Fetched, NotStarted, Parsed};

        assert!(NotStarted.can_advance_to(Fetched));
        assert!(NotStarted.can_advance_to(FailedFetch));
        assert!(Fetched.can_advance_to(Parsed));
        assert!(!FailedFetch.can_advance_to(Fetched));
        assert!(!Parsed.can_advance_to(Fetched));
        assert!(!NotStarted.can_advance_to(Parsed));
    }

    #[test]
    fn test_meta_value_path_lookup() {
        let mut image = BTreeMap::new();
        image.insert("identifier".to_string(), MetaValue::Text("a.jpg".to_string()));
        image.insert("width".to_string(), MetaValue::Number(1200));
        let mut og = BTreeMap::new();
        og.insert("image".to_string(), MetaValue::Map(image));

        let metadata = ResolvedMetadata {
            meta_data: BTreeMap::from([("og".to_string(), MetaValue::Map(og))]),
            ..ResolvedMetadata::default()
        };

        assert_eq!(metadata.meta("og:image:width"), Some(&MetaValue::Number(1200)));
        assert_eq!(
            metadata.meta("og:image").and_then(MetaValue::as_text).as_deref(),
            Some("a.jpg")
        );
        assert!(metadata.meta("og:title").is_none());
    }

    #[test]
    fn test_meta_value_serializes_untagged() {
        let value = MetaValue::Map(BTreeMap::from([
            ("width".to_string(), MetaValue::Number(10)),
            ("alt".to_string(), MetaValue::Text("x".to_string())),
        ]));
        let json = serde_json::to_string(&value).unwrap_or_default();
        assert_eq!(json, r#"{"alt":"x","width":10}"#);
    }
}
