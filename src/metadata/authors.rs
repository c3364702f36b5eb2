//! Author extraction.
//!
//! Scans every element whose `name`, `rel`, `itemprop`, `class`, `id` or
//! `property` attribute mentions an author-ish keyword, then splits the
//! matched bylines into individual names.

use std::collections::HashSet;
use std::sync::LazyLock;

use dom_query::Document;
use regex::Regex;

use crate::dom;
use crate::patterns::{BYLINE_NOISE, BYLINE_PREFIX, BYLINE_SPLIT, DIGIT, TAG_REMNANT};
use crate::result::ResolvedMetadata;

/// Attributes inspected for author markers.
pub const AUTHOR_ATTRS: &[&str] = &["name", "rel", "itemprop", "class", "id", "property"];

/// Attribute values (substring, case-insensitive) that mark a byline.
pub const AUTHOR_VALS: &[&str] = &[
    "author",
    "byline",
    "dc.creator",
    "byl",
    "article:author",
    "article:author_name",
    "story-byline",
    "article-author",
];

/// Agency names and job titles removed from bylines.
pub const AUTHOR_STOP_WORDS: &[&str] = &[
    "By",
    "Reuters",
    "IANS",
    "AP",
    "AFP",
    "PTI",
    "ANI",
    "DPA",
    "Senior Reporter",
    "Reporter",
    "Writer",
    "Opinion Writer",
];

/// Minimum tokens for a trailing name that is not followed by a delimiter.
const MIN_NAME_TOKENS: usize = 2;

#[allow(clippy::expect_used)]
static AUTHOR_STOP_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = AUTHOR_STOP_WORDS
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("AUTHOR_STOP_WORDS regex")
});

/// Resolve the author list into `original`.
#[must_use]
pub fn extract_authors(doc: &Document, original: ResolvedMetadata) -> ResolvedMetadata {
    ResolvedMetadata {
        authors: get_authors(doc),
        ..original
    }
}

/// Author names in first-seen order, unique by case-insensitive comparison.
///
/// Agency names and role words ([`AUTHOR_STOP_WORDS`]) are removed from
/// each accepted name.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{dom, metadata::get_authors};
///
/// let doc = dom::parse(r#"<span class="byline">By Jane Doe and John Smith</span>"#);
/// assert_eq!(get_authors(&doc), vec!["Jane Doe", "John Smith"]);
/// ```
#[must_use]
pub fn get_authors(doc: &Document) -> Vec<String> {
    let root = doc.select("html");
    let mut authors = Vec::new();

    for attr in AUTHOR_ATTRS {
        for val in AUTHOR_VALS {
            for found in dom::elements_by_attr(&root, None, attr, val) {
                let content = if dom::tag_name(&found).as_deref() == Some("meta") {
                    dom::get_attribute(&found, "content").unwrap_or_default()
                } else {
                    found
                        .nodes()
                        .first()
                        .map(|node| {
                            node.descendants()
                                .iter()
                                .filter(|n| n.is_text())
                                .map(|n| n.text().to_string())
                                .collect::<Vec<_>>()
                                .join(" ")
                        })
                        .unwrap_or_default()
                };
                if !content.is_empty() {
                    authors.extend(parse_byline(&content));
                }
            }
        }
    }

    let cleaned = authors
        .iter()
        .map(|name| dom::collapse_whitespace(&AUTHOR_STOP_WORDS_RE.replace_all(name, "")))
        .collect();
    uniqify(cleaned)
}

/// Split one byline into names.
///
/// Tokens are accumulated into a name until a delimiter (`and`, a comma,
/// or an empty token) closes it. Tokens containing digits are dropped. A
/// trailing name needs at least two tokens to count. Role words are left
/// in place; [`get_authors`] strips them.
#[must_use]
pub fn parse_byline(byline: &str) -> Vec<String> {
    let cleaned = TAG_REMNANT.replace_all(byline, "");
    let cleaned = BYLINE_NOISE.replace_all(&cleaned, " ");
    let cleaned = BYLINE_PREFIX.replace_all(&cleaned, "");

    let mut names = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for token in BYLINE_SPLIT.split(cleaned.trim()) {
        let token = token.trim();
        if token == "and" || token == "," || token.is_empty() {
            if !current.is_empty() {
                names.push(current.join(" "));
                current.clear();
            }
        } else if !DIGIT.is_match(token) {
            current.push(token.to_string());
        }
    }

    if current.len() >= MIN_NAME_TOKENS {
        names.push(current.join(" "));
    }

    names
}

/// Remove case-insensitive duplicates, keeping the first spelling seen.
fn uniqify(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors_of(html: &str) -> Vec<String> {
        get_authors(&dom::parse(html))
    }

    #[test]
    fn test_byline_and_delimiter() {
        assert_eq!(parse_byline("By Jane Doe and John Smith"), vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn test_byline_comma_delimiter() {
        assert_eq!(
            parse_byline("Jane Doe, John Smith, Ann Lee"),
            vec!["Jane Doe", "John Smith", "Ann Lee"]
        );
    }

    #[test]
    fn test_byline_strips_agency_and_digits() {
        assert_eq!(parse_byline("By Jane Doe, Reuters 2024"), vec!["Jane Doe"]);
        assert_eq!(parse_byline("Jane Doe, AP Staff"), vec!["Jane Doe", "AP Staff"]);
    }

    #[test]
    fn test_byline_single_trailing_token_dropped() {
        assert!(parse_byline("Staff").is_empty());
    }

    #[test]
    fn test_byline_tag_remnants_and_nbsp() {
        assert_eq!(parse_byline("<b>By</b>\u{a0}Mary\tAnn Jones"), vec!["Mary Ann Jones"]);
    }

    #[test]
    fn test_meta_author_content() {
        let html = r#"<head><meta name="author" content="Jane Doe"></head>"#;
        assert_eq!(authors_of(html), vec!["Jane Doe"]);
    }

    #[test]
    fn test_duplicates_removed_case_insensitively() {
        let html = r#"<head><meta name="author" content="Jane Doe"></head>
            <body><div class="byline">By JANE DOE</div><a rel="author">jane doe</a></body>"#;
        assert_eq!(authors_of(html), vec!["Jane Doe"]);
    }

    #[test]
    fn test_itemprop_and_property_sources() {
        let html = r#"<body><span itemprop="author">Sam Hill</span>
            <meta property="article:author" content="Lee Chan"></body>"#;
        let authors = authors_of(html);
        assert!(authors.contains(&"Sam Hill".to_string()));
        assert!(authors.contains(&"Lee Chan".to_string()));
    }

    #[test]
    fn test_role_words_removed_after_parsing() {
        let html = r#"<div class="author">Jane Doe Senior Reporter</div>"#;
        assert_eq!(authors_of(html), vec!["Jane Doe"]);
    }

    #[test]
    fn test_no_author_markup() {
        assert!(authors_of("<body><p>Nothing here</p></body>").is_empty());
    }
}
