//! Compiled regex patterns shared by the heuristics.
//!
//! All patterns are compiled once on first use via `LazyLock`.
//! Patterns are grouped by the stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Whitespace / Text
// =============================================================================

/// Runs of whitespace, collapsed to one space.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// Anything that is neither a word character nor whitespace.
pub static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("NON_WORD regex"));

// =============================================================================
// Title Resolution
// =============================================================================

/// Characters dropped when comparing titles: keeps ASCII alphanumerics,
/// spaces and CJK unified ideographs.
pub static TITLE_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9 ]").expect("TITLE_FILTER regex")
});

/// Characters dropped from the h1 hint before matching split pieces.
pub static HINT_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("HINT_FILTER regex"));

// =============================================================================
// Byline Parsing
// =============================================================================

/// HTML tag remnants inside byline text.
pub static TAG_REMNANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("TAG_REMNANT regex"));

/// Newlines, tabs and non-breaking spaces inside byline text.
pub static BYLINE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\n\t\r\u{a0}]").expect("BYLINE_NOISE regex"));

/// "By:" / "From:" markers.
pub static BYLINE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[bB][yY][:\s]|[fF]rom[:\s]").expect("BYLINE_PREFIX regex"));

/// Token boundaries: anything but word characters, apostrophes, hyphens, periods.
pub static BYLINE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w'\-.]").expect("BYLINE_SPLIT regex"));

/// Any digit.
pub static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("DIGIT regex"));

// =============================================================================
// Dates
// =============================================================================

/// `YYYY<sep>MM<sep>DD` bounded by non-word characters. The two
/// separators are captured so callers can require them to match.
pub static STRICT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|\W)((?:19|20)\d{2})([-/._]?)(0[1-9]|1[0-2])([-/._]?)(0[1-9]|[12]\d|3[01])(?:\W|$)",
    )
    .expect("STRICT_DATE regex")
});

/// Looser date-in-path pattern used by the article URL heuristic
/// (`/2023/05/`, `/2023-may-`, ...).
pub static URL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([./\-_]?(19|20)\d{2})[./\-_]?(([0-3]?[0-9][./\-_])|(\w{3,5}[./\-_]))([0-3]?[0-9][./\-]?)?",
    )
    .expect("URL_DATE regex")
});

/// `"datePublished": "..."` inside JSON-LD that failed to parse.
pub static LD_DATE_PUBLISHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']datePublished["']\s?:\s?["']([^"']+)["']"#)
        .expect("LD_DATE_PUBLISHED regex")
});

// =============================================================================
// Loader
// =============================================================================

/// Target of a `<meta http-equiv="refresh">` content value.
pub static REFRESH_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\s*=\s*["']?([^"'\s>]+)"#).expect("REFRESH_TARGET regex")
});

// =============================================================================
// Link Discovery
// =============================================================================

/// Absolute http(s) URLs in free text.
pub static RAW_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .expect("RAW_URL regex")
});
