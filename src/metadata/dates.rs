//! Publish date resolution.
//!
//! Candidates come from three places, each with a base score:
//!
//! | Source | Score |
//! |--------|-------|
//! | `YYYY/MM/DD` in the URL | 10 |
//! | JSON-LD `datePublished` | 10 (9 if the block is malformed) |
//! | known `<meta>`/attribute tags | 6, adjusted |
//!
//! Meta tag candidates gain 2 when the element's `name` equals the tag's
//! expected value exactly, lose 2 when dated in the future and lose 1 when
//! older than 25 years. The highest score wins; ties keep source order.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use dom_query::Document;

use crate::dom;
use crate::metadata::json_ld;
use crate::patterns::STRICT_DATE;

/// Score of a date found in the URL path.
pub const URL_SCORE: i32 = 10;

/// Base score of a meta tag date.
pub const META_BASE_SCORE: i32 = 6;

/// Candidates older than this many days lose a point.
const VERY_OLD_DAYS: i64 = 25 * 365;

/// A tag known to carry a publish date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishDateTag {
    /// Attribute to match (case-insensitive substring).
    pub attribute: &'static str,
    /// Value the attribute must contain.
    pub value: &'static str,
    /// Attribute holding the date.
    pub content: &'static str,
}

const fn tag(attribute: &'static str, value: &'static str, content: &'static str) -> PublishDateTag {
    PublishDateTag {
        attribute,
        value,
        content,
    }
}

/// Known publish date tags, scanned in this order.
pub const PUBLISH_DATE_TAGS: &[PublishDateTag] = &[
    tag("property", "rnews:datePublished", "content"),
    tag("property", "article:published_time", "content"),
    tag("name", "OriginalPublicationDate", "content"),
    tag("itemprop", "datePublished", "datetime"),
    tag("property", "og:published_time", "content"),
    tag("name", "article_date_original", "content"),
    tag("name", "publication_date", "content"),
    tag("name", "sailthru.date", "content"),
    tag("name", "PublishDate", "content"),
    tag("pubdate", "pubdate", "datetime"),
    tag("name", "publish_date", "content"),
    tag("name", "dc.date", "content"),
    tag("name", "DC.date.issued", "content"),
    tag("property", "article:published", "content"),
];

/// One scored publish date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCandidate {
    pub date: DateTime<Utc>,
    pub score: i32,
    /// Position in discovery order; breaks score ties.
    pub source_order: usize,
}

/// Best publish date, judged against the current time.
#[must_use]
pub fn get_publishing_date(doc: &Document, url: &str) -> Option<DateTime<Utc>> {
    get_publishing_date_at(doc, url, Utc::now())
}

/// Best publish date, judged against `now`.
#[must_use]
pub fn get_publishing_date_at(doc: &Document, url: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let mut candidates = publish_date_candidates(doc, url, now);
    // stable: equal scores stay in discovery order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.first().map(|c| c.date)
}

/// Every parseable publish date candidate, in discovery order.
#[must_use]
pub fn publish_date_candidates(doc: &Document, url: &str, now: DateTime<Utc>) -> Vec<DateCandidate> {
    let mut scored: Vec<(DateTime<Utc>, i32)> = Vec::new();

    if let Some(date) = url_date(url) {
        scored.push((date, URL_SCORE));
    }

    for (raw, score) in json_ld::date_published(doc) {
        if let Some(date) = parse_date(&raw) {
            scored.push((date, score));
        }
    }

    let root = doc.select("html");
    for known in PUBLISH_DATE_TAGS {
        for found in dom::elements_by_attr(&root, None, known.attribute, known.value) {
            let Some(date) = dom::get_attribute(&found, known.content)
                .as_deref()
                .and_then(parse_date)
            else {
                continue;
            };

            let mut score = META_BASE_SCORE;
            if dom::get_attribute(&found, "name").as_deref() == Some(known.value) {
                score += 2;
            }
            let days_diff = (now.date_naive() - date.date_naive()).num_days();
            if days_diff < 0 {
                score -= 2;
            } else if days_diff > VERY_OLD_DAYS {
                score -= 1;
            }
            scored.push((date, score));
        }
    }

    scored
        .into_iter()
        .enumerate()
        .map(|(source_order, (date, score))| DateCandidate {
            date,
            score,
            source_order,
        })
        .collect()
}

/// Date encoded in a URL path as `YYYY<sep>MM<sep>DD` with matching
/// separators.
#[must_use]
pub fn url_date(url: &str) -> Option<DateTime<Utc>> {
    STRICT_DATE.captures_iter(url).find_map(|caps| {
        if caps.get(2)?.as_str() != caps.get(4)?.as_str() {
            return None;
        }
        let year = caps.get(1)?.as_str().parse().ok()?;
        let month = caps.get(3)?.as_str().parse().ok()?;
        let day = caps.get(5)?.as_str().parse().ok()?;
        Some(NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?.and_utc())
    })
}

/// Date-only layouts tried after the timestamp forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b. %d, %Y",
    "%A, %B %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Naive timestamp layouts, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a date string in one of the common publishing formats.
///
/// Values with a timezone are converted to UTC; values without one are
/// taken as UTC. Strings without a day (`2014/04`) are rejected.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::metadata::dates::parse_date;
///
/// let date = parse_date("2024-01-15T10:30:00+02:00").map(|d| d.to_rfc3339());
/// assert_eq!(date.as_deref(), Some("2024-01-15T08:30:00+00:00"));
/// assert!(parse_date("2014/04").is_none());
/// ```
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S %z"] {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    // "2024-01-15 10:00 EST" and similar: keep the leading ISO date.
    s.get(..10)
        .filter(|_| s.len() > 10 && !s.as_bytes()[10].is_ascii_digit())
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
