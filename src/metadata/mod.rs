//! Metadata extraction module.
//!
//! Resolves title, authors, publish date, language, Open Graph fields,
//! canonical link, keywords, tags and the namespaced meta tree from a parsed
//! document. Each stage takes the metadata gathered so far and returns it
//! with its own fields filled in.

pub mod authors;
pub mod canonical;
pub mod dates;
pub mod json_ld;
pub mod meta_tags;
pub mod tags;
pub mod title;

use chrono::{DateTime, Utc};
use dom_query::Document;

use crate::result::ResolvedMetadata;

pub use authors::{extract_authors, get_authors, parse_byline};
pub use canonical::{extract_canonical_link, get_canonical_link};
pub use dates::{get_publishing_date, get_publishing_date_at, parse_date, DateCandidate};
pub use meta_tags::{examine_meta, get_meta_content, get_meta_data, get_meta_lang};
pub use tags::extract_tags;
pub use title::{extract_title, get_title};

/// Extract all metadata from a document.
///
/// `url` is the article's final URL; it feeds the URL date pattern and the
/// canonical link fallback.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{dom, metadata::extract_metadata};
///
/// let doc = dom::parse(r#"<html lang="en"><head>
///     <title>Storm hits coast | Daily</title>
///     <meta name="author" content="Jane Doe">
/// </head></html>"#);
/// let meta = extract_metadata(&doc, "https://example.com/2024/01/15/storm");
/// assert_eq!(meta.title, "Storm hits coast");
/// assert_eq!(meta.authors, vec!["Jane Doe"]);
/// assert_eq!(meta.language, "en");
/// assert!(meta.publish_date.is_some());
/// ```
#[must_use]
pub fn extract_metadata(doc: &Document, url: &str) -> ResolvedMetadata {
    extract_metadata_at(doc, url, Utc::now())
}

/// [`extract_metadata`] with an explicit clock for date scoring.
#[must_use]
pub fn extract_metadata_at(doc: &Document, url: &str, now: DateTime<Utc>) -> ResolvedMetadata {
    let mut metadata = ResolvedMetadata::default();

    metadata = title::extract_title(doc, metadata);
    metadata = authors::extract_authors(doc, metadata);
    metadata = meta_tags::examine_meta(doc, metadata);
    metadata = canonical::extract_canonical_link(doc, url, metadata);
    metadata.publish_date = dates::get_publishing_date_at(doc, url, now);
    metadata = tags::extract_tags_into(doc, metadata);

    tracing::debug!(
        title = %metadata.title,
        authors = metadata.authors.len(),
        publish_date = ?metadata.publish_date,
        language = %metadata.language,
        "resolved metadata"
    );

    metadata
}
