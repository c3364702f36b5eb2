//! Title resolution.
//!
//! Reconciles three noisy signals: the `<title>` element, the longest `<h1>`,
//! and `og:title`. Comparisons run on both the raw strings and a filtered
//! form (lowercase ASCII alphanumerics, spaces, CJK) so that punctuation and
//! casing differences do not hide a match.

use dom_query::{Document, Selection};

use crate::dom;
use crate::metadata::meta_tags::get_meta_content;
use crate::patterns::{HINT_FILTER, TITLE_FILTER};
use crate::result::ResolvedMetadata;

/// h1 texts with fewer words than this are not title candidates.
const MIN_H1_WORDS: usize = 2;

/// Title delimiters in the order they are tried: (trigger, separator).
///
/// A dash only splits when surrounded by spaces, so hyphenated words
/// survive.
const SPLITTERS: &[(&str, &str)] = &[
    ("|", "|"),
    ("-", " - "),
    ("_", "_"),
    ("/", "/"),
    (" » ", " » "),
];

/// Resolve the title into `original`.
#[must_use]
pub fn extract_title(doc: &Document, original: ResolvedMetadata) -> ResolvedMetadata {
    ResolvedMetadata {
        title: get_title(doc),
        ..original
    }
}

/// Best-guess article title; empty when there is no `<title>` element.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{dom, metadata::get_title};
///
/// let doc = dom::parse("<title>Foo - Bar News</title><h1>Foo</h1>");
/// assert_eq!(get_title(&doc), "Foo");
/// ```
#[must_use]
pub fn get_title(doc: &Document) -> String {
    let Some(title_node) = doc.select("title").nodes().first().copied() else {
        return String::new();
    };
    let mut title_text = dom::normalized_text(&Selection::from(title_node));

    // The longest h1 always serves as the split hint; it only competes as a
    // title candidate when it has enough words.
    let hint = longest_h1(doc);
    let h1 = if hint.split(' ').filter(|w| !w.is_empty()).count() >= MIN_H1_WORDS {
        hint.clone()
    } else {
        String::new()
    };

    let og_title = {
        let by_property = get_meta_content(doc, r#"meta[property="og:title"]"#);
        if by_property.is_empty() {
            get_meta_content(doc, r#"meta[name="og:title"]"#)
        } else {
            by_property
        }
    };

    let filtered_title = filter_title(&title_text);
    let filtered_h1 = filter_title(&h1);
    let filtered_og = filter_title(&og_title);

    let mut settled = true;
    if h1 == title_text {
        // nothing to do
    } else if !filtered_h1.is_empty() && filtered_h1 == filtered_og {
        title_text.clone_from(&h1);
    } else if !filtered_h1.is_empty()
        && filtered_title.contains(&filtered_h1)
        && !filtered_og.is_empty()
        && filtered_title.contains(&filtered_og)
        && h1.chars().count() > og_title.chars().count()
    {
        title_text.clone_from(&h1);
    } else if !filtered_og.is_empty()
        && filtered_og != filtered_title
        && filtered_title.starts_with(&filtered_og)
    {
        title_text.clone_from(&og_title);
    } else {
        settled = false;
    }

    if !settled {
        if let Some((_, separator)) = SPLITTERS
            .iter()
            .find(|(trigger, _)| title_text.contains(trigger))
        {
            title_text = split_title(&title_text, separator, &hint);
        }
    }

    let title = title_text.replace("&#65533;", "").replace('\u{FFFD}', "");

    if !filtered_h1.is_empty() && filter_title(&title) == filtered_h1 {
        return h1;
    }
    title
}

/// Lowercased comparison form of a title.
#[must_use]
pub fn filter_title(text: &str) -> String {
    TITLE_FILTER.replace_all(text, "").to_lowercase()
}

/// Longest h1 text with whitespace collapsed.
fn longest_h1(doc: &Document) -> String {
    doc.select("h1")
        .nodes()
        .iter()
        .map(|node| dom::normalized_text(&Selection::from(*node)))
        .fold(String::new(), |best, text| {
            if text.chars().count() > best.chars().count() {
                text
            } else {
                best
            }
        })
}

/// Split `title` on `separator` and keep the piece matching `hint`, or the
/// longest piece when nothing matches.
#[must_use]
pub fn split_title(title: &str, separator: &str, hint: &str) -> String {
    let hint = HINT_FILTER.replace_all(hint, "").to_lowercase();
    let pieces: Vec<&str> = title.split(separator).collect();

    let mut best_index = 0;
    let mut best_len = 0;
    for (i, piece) in pieces.iter().enumerate() {
        let current = piece.trim();
        if !hint.is_empty() && HINT_FILTER.replace_all(current, "").to_lowercase().contains(&hint) {
            best_index = i;
            break;
        }
        let len = current.chars().count();
        if len > best_len {
            best_len = len;
            best_index = i;
        }
    }

    pieces
        .get(best_index)
        .map(|piece| piece.replace("&raquo;", "»").trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_of(html: &str) -> String {
        get_title(&dom::parse(html))
    }

    #[test]
    fn test_missing_title_element_is_empty() {
        assert_eq!(title_of("<html><body><h1>Some Long Headline</h1></body></html>"), "");
    }

    #[test]
    fn test_exact_h1_match_skips_splitting() {
        assert_eq!(
            title_of("<title>Exact Match</title><body><h1>Exact Match</h1></body>"),
            "Exact Match"
        );
    }

    #[test]
    fn test_h1_hint_directs_split() {
        assert_eq!(title_of("<title>Foo - Bar News</title><body><h1>Foo</h1></body>"), "Foo");
    }

    #[test]
    fn test_longest_piece_without_hint() {
        assert_eq!(
            title_of("<title>Short | The Much Longer Headline</title>"),
            "The Much Longer Headline"
        );
    }

    #[test]
    fn test_h1_similar_to_og_title_wins() {
        let html = r#"<head><title>Site | Storm hits coast</title>
            <meta property="og:title" content="Storm Hits Coast!"></head>
            <body><h1>Storm hits  coast</h1></body>"#;
        assert_eq!(title_of(html), "Storm hits coast");
    }

    #[test]
    fn test_og_title_prefix_of_title() {
        let html = r#"<head><title>Markets rally on news: live updates</title>
            <meta property="og:title" content="Markets rally on news"></head>"#;
        assert_eq!(title_of(html), "Markets rally on news");
    }

    #[test]
    fn test_h1_longer_than_og_inside_title() {
        let html = r#"<head><title>Daily: Big Storm Hits The Coast Today | Big Storm</title>
            <meta property="og:title" content="Big Storm"></head>
            <body><h1>Big Storm Hits The Coast Today</h1></body>"#;
        assert_eq!(title_of(html), "Big Storm Hits The Coast Today");
    }

    #[test]
    fn test_hyphenated_words_not_split() {
        assert_eq!(title_of("<title>Well-known facts</title>"), "Well-known facts");
    }

    #[test]
    fn test_arrow_split_and_raquo_replacement() {
        assert_eq!(split_title("News » World &raquo; Europe", " » ", ""), "World » Europe");
    }

    #[test]
    fn test_final_h1_preference_restores_casing() {
        let html = r#"<title>IPHONE launch event recap | Tech</title>
            <body><h1>iPhone Launch Event Recap</h1></body>"#;
        assert_eq!(title_of(html), "iPhone Launch Event Recap");
    }

    #[test]
    fn test_filter_title_keeps_cjk() {
        assert_eq!(filter_title("你好, World!"), "你好 world");
    }
}
