//! Character encoding detection for downloaded documents.
//!
//! Bodies arrive as bytes from the network or the filesystem. The charset is
//! taken from, in order: a byte-order mark, the `Content-Type` header, a
//! `<meta charset>`/`<meta http-equiv="Content-Type">` declaration in the
//! first kilobyte, and finally UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `charset=` inside a header value or a meta tag.
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("valid regex")
});

/// `<meta ... charset ...>` tags.
#[allow(clippy::expect_used)]
static META_WITH_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<meta[^>]+charset[^>]*>").expect("valid regex"));

const SNIFF_LEN: usize = 1024;

/// Detect the encoding of an HTML body.
///
/// `content_type` is the raw `Content-Type` header, when one exists.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return encoding;
    }

    if let Some(encoding) = content_type.and_then(charset_from_declaration) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LEN)]);
    META_WITH_CHARSET_RE
        .find_iter(&head)
        .find_map(|m| charset_from_declaration(m.as_str()))
        .unwrap_or(UTF_8)
}

fn charset_from_declaration(text: &str) -> Option<&'static Encoding> {
    CHARSET_PARAM_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decode an HTML body to a `String`.
///
/// Invalid sequences become U+FFFD rather than errors.
///
/// # Examples
///
/// ```
/// use rs_newspaper::encoding::decode_html;
///
/// let body = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
/// assert!(decode_html(body, None).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}
