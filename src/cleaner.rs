//! Boilerplate Cleaning
//!
//! Strips scripts, navigation, sharing widgets and similar chrome from the
//! working copy of a document before the top node is resolved. Only the
//! working copy is ever passed here; the original tree stays intact.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{self, Document, Selection};

/// Removes boilerplate from a working copy in place.
pub trait DocumentCleaner: Send + Sync {
    fn clean(&self, doc: &Document);
}

/// Tags removed together with their content.
const TAGS_TO_REMOVE: &[&str] = &[
    "script", "style", "noscript", "iframe", "form", "nav", "aside", "footer", "object", "embed",
    "button", "input", "select", "textarea",
];

/// Descendants that keep a `div` from being read as a paragraph.
const BLOCK_CHILDREN: &str = "a, blockquote, dl, div, img, ol, p, pre, table, ul";

/// `id`, `class` or `name` values marking boilerplate containers.
#[allow(clippy::expect_used)]
static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^side$|combx|retweet|mediaarticlerelated|menucontainer|navbar|storytopbar-bucket|utility-bar|inline-share-tools|comment|popularquestions|contact|foot|footnote|cnn_strycaptiontxt|cnn_html_slideshow|cnn_strylftcntnt|^links$|meta$|shoutbox|sponsor|tags|socialnetworking|cnnstryhghlght|cnn_stryspcvbx|^inset$|pagetools|post-attributes|welcome_form|contenttools2|the_answers|communitypromo|runaroundleft|subscribe|vcard|articleheadings|^print$|popup|author-dropdown|socialtools|konafilter|breadcrumbs|^fn$|wp-caption-text|legende|ajoutvideo|timestamp|js_replies",
    )
    .expect("valid regex")
});

/// Default cleaner.
///
/// In order: drops [`TAGS_TO_REMOVE`], drops elements whose `id`, `class`
/// or `name` look like boilerplate, unwraps `span`s inside paragraphs and
/// turns `div`s without block children into paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCleaner;

impl DocumentCleaner for DefaultCleaner {
    fn clean(&self, doc: &Document) {
        doc.select(&TAGS_TO_REMOVE.join(", ")).remove();
        remove_boilerplate(doc);
        dom::strip_tags(&doc.select("p"), &["span"]);
        divs_to_paragraphs(doc);
    }
}

fn remove_boilerplate(doc: &Document) {
    let candidates = doc.select("body [id], body [class], body [name]");
    let mut removed = 0usize;
    for node in candidates.nodes() {
        let sel = Selection::from(*node);
        if is_boilerplate(&sel) {
            sel.remove();
            removed += 1;
        }
    }
    tracing::debug!(removed, "removed boilerplate elements");
}

fn is_boilerplate(sel: &Selection) -> bool {
    ["id", "class", "name"].iter().any(|attr| {
        dom::get_attribute(sel, attr).is_some_and(|value| {
            value
                .split_whitespace()
                .any(|token| BOILERPLATE.is_match(token))
        })
    })
}

/// Innermost first, so a wrapper is judged after its children changed.
fn divs_to_paragraphs(doc: &Document) {
    let divs: Vec<_> = doc.select("div").nodes().to_vec();
    for node in divs.into_iter().rev() {
        let div = Selection::from(node);
        if div.select(BLOCK_CHILDREN).is_empty() && !dom::normalized_text(&div).is_empty() {
            dom::rename(&div, "p");
        }
    }
}
