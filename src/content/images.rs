//! Image discovery.

use std::collections::HashSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::result::ImageSet;
use crate::url_utils::prepare_url;

use super::ImageExtractor;

/// Sources for the meta image, in priority order: (selector, attribute).
const META_IMAGE_SOURCES: &[(&str, &str)] = &[
    (r#"meta[property="og:image"]"#, "content"),
    (r#"link[rel="image_src"]"#, "href"),
    (r#"meta[name="og:image"]"#, "content"),
    (r#"meta[name="twitter:image"]"#, "content"),
];

/// `img` attributes holding the image URL, lazy-loading ones after `src`.
const IMG_SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src", "data-original"];

/// Selector-based image discovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImageExtractor;

impl ImageExtractor for DefaultImageExtractor {
    fn parse_images(&self, url: &str, doc: &Document, top_node: Option<&Selection>) -> ImageSet {
        let meta_image = meta_image(doc)
            .map(|src| prepare_url(&src, Some(url)))
            .unwrap_or_default();
        let favicon = favicon(doc)
            .map(|href| prepare_url(&href, Some(url)))
            .unwrap_or_default();
        let images = image_urls(&doc.select("img"), url);

        let top_image = if meta_image.is_empty() {
            top_node
                .and_then(|node| image_urls(&node.select("img"), url).into_iter().next())
                .unwrap_or_default()
        } else {
            meta_image.clone()
        };

        ImageSet {
            top_image,
            meta_image,
            images,
            favicon,
        }
    }
}

fn meta_image(doc: &Document) -> Option<String> {
    META_IMAGE_SOURCES.iter().find_map(|(selector, attr)| {
        doc.select(selector)
            .nodes()
            .iter()
            .find_map(|node| dom::non_empty_attribute(&Selection::from(*node), attr))
    })
}

fn favicon(doc: &Document) -> Option<String> {
    doc.select(r#"link[rel~="icon"]"#)
        .nodes()
        .iter()
        .find_map(|node| dom::non_empty_attribute(&Selection::from(*node), "href"))
}

/// Absolute, unique image URLs under `images`, document order. Inline
/// `data:` images are skipped.
fn image_urls(images: &Selection, base: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    images
        .nodes()
        .iter()
        .filter_map(|node| {
            let img = Selection::from(*node);
            IMG_SOURCE_ATTRS
                .iter()
                .find_map(|attr| dom::non_empty_attribute(&img, attr))
        })
        .filter(|src| !src.starts_with("data:"))
        .map(|src| prepare_url(&src, Some(base)))
        .filter(|src| !src.is_empty() && seen.insert(src.clone()))
        .collect()
}
