//! Embedded video discovery.

use std::collections::HashSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::result::Video;

use super::VideoExtractor;

/// Embed tags scanned for videos.
const VIDEO_TAGS: &str = "iframe, embed, object, video";

/// Known providers: (substring of the embed URL, provider name).
const PROVIDERS: &[(&str, &str)] = &[
    ("youtube", "youtube"),
    ("youtu.be", "youtube"),
    ("vimeo", "vimeo"),
    ("dailymotion", "dailymotion"),
    ("twitch", "twitch"),
    ("kewego", "kewego"),
];

/// Selector-based video discovery.
///
/// `iframe`, `embed` and `object` count only when they point at a known
/// provider; `<video>` elements always count.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVideoExtractor;

impl VideoExtractor for DefaultVideoExtractor {
    fn parse_videos(&self, doc: &Document) -> Vec<Video> {
        let mut seen = HashSet::new();
        doc.select(VIDEO_TAGS)
            .nodes()
            .iter()
            .filter_map(|node| video(&Selection::from(*node)))
            .filter(|video| seen.insert(video.src.clone()))
            .collect()
    }
}

fn video(sel: &Selection) -> Option<Video> {
    let embed_type = dom::tag_name(sel)?;
    let src = match embed_type.as_str() {
        "object" => dom::non_empty_attribute(sel, "data").or_else(|| {
            dom::non_empty_attribute(&sel.select(r#"param[name="movie"]"#), "value")
        }),
        "video" => dom::non_empty_attribute(sel, "src")
            .or_else(|| dom::non_empty_attribute(&sel.select("source[src]").first(), "src")),
        _ => dom::non_empty_attribute(sel, "src"),
    }?;

    let provider = provider(&src);
    if provider.is_none() && embed_type != "video" {
        return None;
    }

    Some(Video {
        src,
        provider,
        width: dimension(sel, "width"),
        height: dimension(sel, "height"),
        embed_type,
    })
}

fn provider(src: &str) -> Option<String> {
    let lower = src.to_lowercase();
    PROVIDERS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, name)| (*name).to_string())
}

fn dimension(sel: &Selection, attr: &str) -> Option<u32> {
    dom::non_empty_attribute(sel, attr)?
        .trim_end_matches("px")
        .parse()
        .ok()
}
