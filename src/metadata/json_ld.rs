//! JSON-LD publish dates.
//!
//! Every `<script type="application/ld+json">` block is parsed with
//! `serde_json` and searched for `datePublished` at any depth, `@graph`
//! arrays included. Blocks that are not valid JSON fall back to a regex
//! scan of the raw text and earn a lower score.

use dom_query::{Document, Selection};
use serde_json::Value;

use crate::dom;
use crate::patterns::LD_DATE_PUBLISHED;

/// Score of a `datePublished` read from well-formed JSON.
pub const STRUCTURED_SCORE: i32 = 10;

/// Score of a `datePublished` scraped from malformed JSON.
pub const REGEX_SCORE: i32 = 9;

/// Raw `datePublished` strings with their score, in document order.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{dom, metadata::json_ld::date_published};
///
/// let doc = dom::parse(r#"<script type="application/ld+json">
///     {"@graph": [{"@type": "WebPage"}, {"datePublished": "2024-01-15"}]}
/// </script>"#);
/// assert_eq!(date_published(&doc), vec![("2024-01-15".to_string(), 10)]);
/// ```
#[must_use]
pub fn date_published(doc: &Document) -> Vec<(String, i32)> {
    let root = doc.select("html");
    let mut found = Vec::new();

    for script in dom::elements_by_attr(&root, Some("script"), "type", "application/ld+json") {
        let raw = script_text(&script);
        match serde_json::from_str::<Value>(&raw) {
            Ok(json) => {
                let mut dates = Vec::new();
                collect_date_published(&json, &mut dates);
                found.extend(dates.into_iter().map(|d| (d, STRUCTURED_SCORE)));
            }
            Err(err) => {
                tracing::trace!(error = %err, "malformed JSON-LD, scanning raw text");
                if let Some(caps) = LD_DATE_PUBLISHED.captures(&raw) {
                    if let Some(m) = caps.get(1) {
                        found.push((m.as_str().to_string(), REGEX_SCORE));
                    }
                }
            }
        }
    }

    found
}

fn script_text(script: &Selection) -> String {
    dom::text_content(script).trim().to_string()
}

/// Depth-first collection of every string `datePublished` value.
fn collect_date_published(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(date)) = map.get("datePublished") {
                out.push(date.clone());
            }
            for (key, child) in map {
                if key != "datePublished" {
                    collect_date_published(child, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_date_published(item, out);
            }
        }
        _ => {}
    }
}
