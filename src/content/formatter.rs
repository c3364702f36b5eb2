//! Text and HTML rendering of a node.

use dom_query::Selection;

use crate::dom;

use super::OutputFormatter;

/// Block elements rendered as separate paragraphs.
const TEXT_BLOCKS: &str =
    "p, h1, h2, h3, h4, h5, h6, li, pre, blockquote, td, dd, dt, figcaption";

/// Joins the text of innermost text blocks with blank lines.
///
/// A block is innermost when no other text block sits inside it, so a
/// quote wrapping paragraphs yields the paragraphs once. Nodes without any
/// text block render as their collapsed text.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::content::{OutputFormatter, TextFormatter};
/// use rs_newspaper::dom;
///
/// let doc = dom::parse("<div><h2>Title</h2><p>First  line.</p><p>Second.</p></div>");
/// let (text, html) = TextFormatter.format(&doc.select("div"));
/// assert_eq!(text, "Title\n\nFirst line.\n\nSecond.");
/// assert!(html.starts_with("<div>"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn format(&self, node: &Selection) -> (String, String) {
        let html = dom::outer_html(node).to_string();

        let blocks: Vec<String> = node
            .select(TEXT_BLOCKS)
            .nodes()
            .iter()
            .map(|n| Selection::from(*n))
            .filter(|block| block.select(TEXT_BLOCKS).is_empty())
            .map(|block| dom::normalized_text(&block))
            .filter(|text| !text.is_empty())
            .collect();

        let text = if blocks.is_empty() {
            dom::normalized_text(node)
        } else {
            blocks.join("\n\n")
        };
        (text, html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks_rendered_once() {
        let doc = dom::parse(
            "<article><blockquote><p>Quoted one.</p><p>Quoted two.</p></blockquote><ul><li>Item</li><li> </li></ul></article>",
        );
        let (text, _) = TextFormatter.format(&doc.select("article"));
        assert_eq!(text, "Quoted one.\n\nQuoted two.\n\nItem");
    }

    #[test]
    fn test_plain_node_falls_back_to_text() {
        let doc = dom::parse("<div>Just   some\ntext</div>");
        let (text, html) = TextFormatter.format(&doc.select("div"));
        assert_eq!(text, "Just some text");
        assert_eq!(html, "<div>Just   some\ntext</div>");
    }
}
