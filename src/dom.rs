//! DOM Operations Adapter
//!
//! Thin layer over `dom_query` giving the heuristics a small, stable set of
//! tree operations: parse, deep clone, attribute/text access, and the
//! case-insensitive attribute-containment query used by the byline and
//! date scanners.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

use crate::patterns::WHITESPACE;

// === Parsing ===

/// Parse HTML string into a document.
///
/// Malformed markup never fails; the parser returns a best-effort tree.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Deep, independent copy of a document.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Attribute Operations ===

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, trimmed, treating empty values as absent.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with whitespace runs collapsed and the ends trimmed.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    collapse_whitespace(&sel.text())
}

/// Collapse whitespace runs into single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Get outer HTML content.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Detached copy of an element as its own document.
///
/// Elements the parser cannot hold at the top of a body (`td`, `tr`,
/// `body`, ...) are re-rooted in a `div` carrying their inner HTML.
#[must_use]
pub fn detached_copy(sel: &Selection) -> Document {
    let tag = tag_name(sel).unwrap_or_default();
    if REROOTED_TAGS.contains(&tag.as_str()) {
        parse(&format!("<div>{}</div>", sel.inner_html()))
    } else {
        parse(&outer_html(sel))
    }
}

/// Tags that [`detached_copy`] re-roots in a `div`.
const REROOTED_TAGS: &[&str] = &[
    "html", "head", "body", "table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption",
    "colgroup", "col",
];

/// First element of a document's body.
#[must_use]
pub fn root_element(doc: &Document) -> Option<Selection<'_>> {
    let root = doc.select("body > *").first();
    (!root.is_empty()).then_some(root)
}

// === Mutation ===

/// Rename an element in place.
#[inline]
pub fn rename(sel: &Selection, new_tag: &str) {
    sel.rename(new_tag);
}

/// Replace the children of an element with parsed HTML.
#[inline]
pub fn set_inner_html(sel: &Selection, html: &str) {
    sel.set_html(html);
}

/// Remove matching descendant tags but keep their children.
#[inline]
pub fn strip_tags(sel: &Selection, tags: &[&str]) {
    sel.strip_elements(tags);
}

// === Tree Navigation ===

/// Get previous element sibling (skipping text nodes).
#[must_use]
pub fn previous_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.prev_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.prev_sibling();
        }
        None
    })
}

/// All element siblings before `sel`, nearest first.
#[must_use]
pub fn previous_element_siblings<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    let mut siblings = Vec::new();
    let mut current = previous_element_sibling(sel);
    while let Some(s) = current {
        current = previous_element_sibling(&s);
        siblings.push(s);
    }
    siblings
}

// === Querying ===

/// Elements whose `attr` value contains `value`, compared case-insensitively.
///
/// `tag` restricts the scan to one element name; `None` scans every element.
/// Results are in document order.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::dom;
///
/// let doc = dom::parse(r#"<div class="Story-Byline">A</div><span rel="author">B</span>"#);
/// let root = doc.select("html");
/// assert_eq!(dom::elements_by_attr(&root, None, "class", "byline").len(), 1);
/// assert_eq!(dom::elements_by_attr(&root, Some("span"), "rel", "AUTHOR").len(), 1);
/// ```
#[must_use]
pub fn elements_by_attr<'a>(
    root: &Selection<'a>,
    tag: Option<&str>,
    attr: &str,
    value: &str,
) -> Vec<Selection<'a>> {
    let selector = format!("{}[{attr}]", tag.unwrap_or(""));
    let needle = value.to_lowercase();

    root.select(&selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| {
            get_attribute(sel, attr).is_some_and(|v| v.to_lowercase().contains(&needle))
        })
        .collect()
}
