//! HTML Meta Tag Extraction
//!
//! Simple `<meta>` lookups (language, `og:type`, site name, description,
//! keywords) and the namespaced meta tree built from every
//! `property`/`name` + `content`/`value` pair.

use std::collections::BTreeMap;

use dom_query::{Document, Selection};

use crate::dom;
use crate::result::{MetaValue, ResolvedMetadata};

/// Fill language, type, site name, description, keywords and the meta tree.
#[must_use]
pub fn examine_meta(doc: &Document, original: ResolvedMetadata) -> ResolvedMetadata {
    let mut result = original;

    result.language = get_meta_lang(doc);
    result.meta_type = get_meta_content(doc, r#"meta[property="og:type"]"#);
    result.site_name = get_meta_content(doc, r#"meta[property="og:site_name"]"#);
    result.description = get_meta_content(doc, r#"meta[name="description"]"#);
    result.keywords = split_keywords(&get_meta_content(doc, r#"meta[name="keywords"]"#));
    result.meta_data = get_meta_data(doc);

    result
}

/// `content` of the first element matching `selector`, trimmed.
///
/// Returns an empty string when nothing matches, the selector is invalid,
/// or the first match has no content.
#[must_use]
pub fn get_meta_content(doc: &Document, selector: &str) -> String {
    doc.try_select(selector)
        .and_then(|matches| matches.nodes().first().copied())
        .and_then(|node| dom::get_attribute(&Selection::from(node), "content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Declared two-letter language code, lowercased, or empty.
///
/// Sources in order: `<html lang>`, `<meta http-equiv="content-language">`,
/// `<meta name="lang">`. Only the first two characters are considered and
/// they must both be ASCII letters.
#[must_use]
pub fn get_meta_lang(doc: &Document) -> String {
    let root = doc.select("html");
    let declared = dom::non_empty_attribute(&root, "lang").or_else(|| {
        [("http-equiv", "content-language"), ("name", "lang")]
            .iter()
            .find_map(|(attr, value)| {
                dom::elements_by_attr(&root, Some("meta"), attr, value)
                    .first()
                    .and_then(|meta| dom::get_attribute(meta, "content"))
            })
    });

    let Some(declared) = declared else {
        return String::new();
    };
    let code: String = declared.trim().chars().take(2).collect();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        code.to_ascii_lowercase()
    } else {
        String::new()
    }
}

/// Comma-separated keyword list, trimmed, empties dropped.
fn split_keywords(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build the namespaced meta tree from every `<meta>` element.
///
/// `og:image:width = 1200` becomes `{"og": {"image": {"width": 1200}}}`.
/// All-digit values are stored as numbers. When a key is both a leaf and a
/// prefix, the scalar moves under [`MetaValue::IDENTIFIER`] whichever order
/// the tags appear in.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{dom, metadata::get_meta_data, MetaValue};
///
/// let doc = dom::parse(r#"<meta property="og:image" content="a.jpg">
///     <meta property="og:image:width" content="1200">"#);
/// let tree = get_meta_data(&doc);
/// let og = &tree["og"];
/// assert_eq!(og.get("image:width"), Some(&MetaValue::Number(1200)));
/// assert_eq!(og.get("image:identifier"), Some(&MetaValue::Text("a.jpg".into())));
/// ```
#[must_use]
pub fn get_meta_data(doc: &Document) -> BTreeMap<String, MetaValue> {
    let mut data = BTreeMap::new();

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);
        let key = dom::non_empty_attribute(&meta, "property")
            .or_else(|| dom::non_empty_attribute(&meta, "name"));
        let value = dom::non_empty_attribute(&meta, "content")
            .or_else(|| dom::non_empty_attribute(&meta, "value"));
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        insert_meta(&mut data, &key, to_meta_value(value));
    }

    data
}

fn to_meta_value(value: String) -> MetaValue {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = value.parse::<i64>() {
            return MetaValue::Number(n);
        }
    }
    MetaValue::Text(value)
}

/// Insert `value` at the `:`-separated `key` path.
fn insert_meta(data: &mut BTreeMap<String, MetaValue>, key: &str, value: MetaValue) {
    let mut parts = key.split(':');
    let Some(head) = parts.next() else {
        return;
    };
    let rest: Vec<&str> = parts.collect();

    if rest.is_empty() {
        set_leaf(data, head, value);
        return;
    }

    let Some((last, middle)) = rest.split_last() else {
        return;
    };
    let Some(mut node) = descend(data, head) else {
        return;
    };
    for part in middle {
        let Some(next) = descend(node, part) else {
            return;
        };
        node = next;
    }
    set_leaf(node, last, value);
}

/// Map stored under `key`, creating it or promoting a scalar into its
/// `identifier` field as needed.
fn descend<'a>(
    map: &'a mut BTreeMap<String, MetaValue>,
    key: &str,
) -> Option<&'a mut BTreeMap<String, MetaValue>> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| MetaValue::Map(BTreeMap::new()));

    if !matches!(entry, MetaValue::Map(_)) {
        let scalar = std::mem::replace(entry, MetaValue::Map(BTreeMap::new()));
        *entry = MetaValue::Map(BTreeMap::from([(
            MetaValue::IDENTIFIER.to_string(),
            scalar,
        )]));
    }

    match entry {
        MetaValue::Map(inner) => Some(inner),
        _ => None,
    }
}

/// Store a scalar; an existing subtree keeps it as its `identifier`.
fn set_leaf(map: &mut BTreeMap<String, MetaValue>, key: &str, value: MetaValue) {
    match map.get_mut(key) {
        Some(MetaValue::Map(inner)) => {
            inner.insert(MetaValue::IDENTIFIER.to_string(), value);
        }
        _ => {
            map.insert(key.to_string(), value);
        }
    }
}
