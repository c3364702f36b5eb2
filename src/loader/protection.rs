//! Bot-protection detection on failed responses.

use std::fmt;

/// A bot-protection system recognised in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Cloudflare,
    CloudFront,
    PerimeterX,
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protection::Cloudflare => "Cloudflare",
            Protection::CloudFront => "CloudFront",
            Protection::PerimeterX => "PerimeterX",
        })
    }
}

/// Body substrings checked in order; the first hit wins.
const SIGNATURES: &[(&str, Protection)] = &[
    ("cloudflare", Protection::Cloudflare),
    (
        "/cdn-cgi/challenge-platform/h/b/orchestrate/chl_page",
        Protection::Cloudflare,
    ),
    ("CloudFront", Protection::CloudFront),
    ("perimeterx", Protection::PerimeterX),
];

/// Scan a response body for a known protection signature.
#[must_use]
pub fn detect(body: &str) -> Option<Protection> {
    SIGNATURES
        .iter()
        .find(|(needle, _)| body.contains(needle))
        .map(|(_, protection)| *protection)
}

/// Failure reason for an HTTP response with status >= 400.
#[must_use]
pub fn failure_reason(status: u16, body: &str, url: &str) -> String {
    match detect(body) {
        Some(protection) => format!("Website protected with {protection}, url: {url}"),
        None => format!("Status code {status} for url {url}"),
    }
}
