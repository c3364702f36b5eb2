//! Tag links.

use std::collections::BTreeSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::result::ResolvedMetadata;

const REL_TAG_SELECTOR: &str = r#"a[rel="tag"]"#;

const HREF_TAG_SELECTOR: &str =
    r#"a[href*="/tag/"], a[href*="/tags/"], a[href*="/topic/"], a[href*="?keyword="]"#;

/// Resolve tags into `original`.
#[must_use]
pub fn extract_tags_into(doc: &Document, original: ResolvedMetadata) -> ResolvedMetadata {
    ResolvedMetadata {
        tags: extract_tags(doc),
        ..original
    }
}

/// Texts of `rel="tag"` anchors, or of tag-like hrefs when there are none.
#[must_use]
pub fn extract_tags(doc: &Document) -> BTreeSet<String> {
    let mut anchors = doc.select(REL_TAG_SELECTOR);
    if anchors.is_empty() {
        anchors = doc.select(HREF_TAG_SELECTOR);
    }

    anchors
        .nodes()
        .iter()
        .map(|node| dom::normalized_text(&Selection::from(*node)))
        .filter(|text| !text.is_empty())
        .collect()
}
