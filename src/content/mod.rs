//! Body, image and video collaborators.
//!
//! The article controller drives these through traits so each step can be
//! swapped independently. The defaults score the top node by stopword
//! density, join paragraphs for text, and discover images and videos
//! with selectors.

pub mod body;
pub mod formatter;
pub mod images;
pub mod videos;

use dom_query::{Document, Selection};

use crate::nlp::StopWords;
use crate::result::{ImageSet, Video};

pub use body::{is_high_link_density, link_density, DensityScorer};
pub use formatter::TextFormatter;
pub use images::DefaultImageExtractor;
pub use videos::DefaultVideoExtractor;

/// The resolved top node, detached from the document it was found in.
pub struct TopNode {
    /// Copy of the top node.
    pub node: Document,

    /// Copy of the top node with qualifying preceding siblings prepended.
    pub complemented: Document,
}

impl TopNode {
    /// Root element of [`node`](Self::node).
    #[must_use]
    pub fn root(&self) -> Option<Selection<'_>> {
        crate::dom::root_element(&self.node)
    }

    /// Root element of [`complemented`](Self::complemented).
    #[must_use]
    pub fn complemented_root(&self) -> Option<Selection<'_>> {
        crate::dom::root_element(&self.complemented)
    }
}

impl std::fmt::Debug for TopNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopNode")
            .field("node", &self.node.html().len())
            .field("complemented", &self.complemented.html().len())
            .finish()
    }
}

/// Picks the element most likely to hold the article body.
pub trait TopNodeResolver: Send + Sync {
    fn resolve(&self, doc: &Document, stopwords: &StopWords) -> Option<TopNode>;
}

/// Renders a node as text and HTML.
pub trait OutputFormatter: Send + Sync {
    /// `(text, html)` of `node`.
    fn format(&self, node: &Selection) -> (String, String);
}

/// Finds the images of an article.
pub trait ImageExtractor: Send + Sync {
    fn parse_images(&self, url: &str, doc: &Document, top_node: Option<&Selection>) -> ImageSet;
}

/// Finds embedded videos.
pub trait VideoExtractor: Send + Sync {
    fn parse_videos(&self, doc: &Document) -> Vec<Video>;
}
