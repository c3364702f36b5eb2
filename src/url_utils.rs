//! URL Utility Functions
//!
//! Scheme/domain/path accessors, source-relative normalization, the
//! registrable-domain split used by category classification, and the
//! "does this look like a news article" URL heuristic.

use std::path::PathBuf;

use url::Url;

use crate::patterns::URL_DATE;

/// File extensions an article URL may carry.
const ALLOWED_TYPES: &[&str] = &[
    "html", "htm", "md", "rst", "aspx", "jsp", "rhtml", "cgi", "xhtml", "jhtml", "asp", "shtml",
];

/// Path segments that mark an article section.
const GOOD_PATHS: &[&str] = &[
    "story", "article", "feature", "featured", "slides", "slideshow", "gallery", "news", "video",
    "media", "v", "radio", "press",
];

/// Path segments (or subdomains) that mark a non-article page.
const BAD_CHUNKS: &[&str] = &[
    "careers", "contact", "about", "faq", "terms", "privacy", "advert", "preferences",
    "feedback", "info", "browse", "howto", "account", "subscribe", "donate", "shop", "admin",
    "auth_user", "emploi", "annonces", "blog", "courrierdesecteurs", "page_newsletters",
    "adserver", "clicannonces", "services", "contribution", "boutique", "espaceclients",
];

/// Registrable-domain labels that never host articles.
const BAD_DOMAINS: &[&str] = &[
    "amazon", "doubleclick", "twitter", "facebook", "google", "youtube", "instagram", "pinterest",
];

/// A host split into `subdomain.domain.suffix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    /// Labels left of the registrable domain, dot-joined (`"espn"` for `espn.go.com`).
    pub subdomain: String,
    /// Registrable label without suffix (`"go"` for `espn.go.com`).
    pub domain: String,
    /// Public suffix (`"com"`, `"co.uk"`).
    pub suffix: String,
}

/// Split a host on the public suffix list.
///
/// Hosts the list cannot split (bare hostnames, IP literals) come back as
/// the `domain` with empty subdomain and suffix.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::url_utils::split_domain;
///
/// let parts = split_domain("espn.go.com");
/// assert_eq!(parts.subdomain, "espn");
/// assert_eq!(parts.domain, "go");
/// assert_eq!(parts.suffix, "com");
/// ```
#[must_use]
pub fn split_domain(host: &str) -> DomainParts {
    let host = host.trim_end_matches('.').to_lowercase();
    let whole = || DomainParts {
        domain: host.clone(),
        ..DomainParts::default()
    };

    let Some(registrable) = psl::domain_str(&host) else {
        return whole();
    };
    let Some(suffix) = psl::suffix_str(registrable) else {
        return whole();
    };

    let domain = registrable
        .strip_suffix(suffix)
        .map(|d| d.trim_end_matches('.'))
        .unwrap_or(registrable);
    let subdomain = host
        .strip_suffix(registrable)
        .map(|s| s.trim_end_matches('.'))
        .unwrap_or("");

    DomainParts {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.to_string(),
    }
}

/// Check if a string is an absolute http(s) URL with a host.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return false;
    }
    Url::parse(s).is_ok_and(|u| u.host().is_some())
}

/// URL scheme, lowercase.
#[must_use]
pub fn get_scheme(url: &str) -> Option<String> {
    Url::parse(url).ok().map(|u| u.scheme().to_string())
}

/// Host of an absolute URL.
#[must_use]
pub fn get_domain(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string))
}

/// Path of an absolute URL; empty when it cannot be parsed.
#[must_use]
pub fn get_path(url: &str) -> String {
    Url::parse(url).map(|u| u.path().to_string()).unwrap_or_default()
}

/// `scheme://host` of an absolute URL.
#[must_use]
pub fn get_base_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
        None => format!("{}://{host}", parsed.scheme()),
    })
}

/// Local path of a `file://` URL.
#[must_use]
pub fn file_url_to_path(url: &str) -> Option<PathBuf> {
    Url::parse(url)
        .ok()
        .filter(|u| u.scheme() == "file")
        .and_then(|u| u.to_file_path().ok())
}

/// Extension of the last path segment, lowercase, at most five characters.
#[must_use]
pub fn url_to_filetype(url: &str) -> Option<String> {
    let path = get_path(url);
    let last = path.trim_end_matches('/').rsplit('/').find(|c| !c.is_empty())?;
    let (_, ext) = last.rsplit_once('.')?;
    (!ext.is_empty() && ext.len() <= 5).then(|| ext.to_lowercase())
}

/// Resolve `url` against `source_url` and undo redirect wrappers.
///
/// Without a source the URL is returned unchanged. Returns an empty string
/// when the URL cannot be resolved.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::url_utils::prepare_url;
///
/// assert_eq!(prepare_url("/world", Some("http://cnn.com/")), "http://cnn.com/world");
/// assert_eq!(prepare_url("/world", None), "/world");
/// ```
#[must_use]
pub fn prepare_url(url: &str, source_url: Option<&str>) -> String {
    let Some(source_url) = source_url.filter(|s| !s.is_empty()) else {
        return url.to_string();
    };
    let Ok(base) = Url::parse(source_url) else {
        return Url::parse(url).map(String::from).unwrap_or_default();
    };
    match base.join(url.trim()) {
        Ok(joined) => redirect_back(joined.as_str(), base.host_str().unwrap_or("")),
        Err(err) => {
            tracing::debug!(url, source_url, error = %err, "url failed to resolve");
            String::new()
        }
    }
}

/// Unwrap `?url=` redirect links pointing away from `source_domain`.
///
/// Links whose host is a substring of the source host (or the reverse)
/// are left alone.
#[must_use]
pub fn redirect_back(url: &str, source_domain: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let domain = parsed.host_str().unwrap_or("");
    if source_domain.contains(domain) || domain.contains(source_domain) {
        return url.to_string();
    }
    parsed
        .query_pairs()
        .find(|(k, v)| k == "url" && !v.is_empty())
        .map_or_else(|| url.to_string(), |(_, v)| v.into_owned())
}

/// Whether a URL looks like a news article.
///
/// Heuristic: http(s), at least 11 characters, an allowed (or no) file
/// extension, not on a known non-news domain. A long dash/underscore slug
/// qualifies on its own; otherwise the path needs two or more segments,
/// no red-flag segment, and either a date or a news-section segment.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::url_utils::valid_url;
///
/// assert!(valid_url("http://www.cnn.com/2013/11/27/travel/weather-thanksgiving/index.html"));
/// assert!(!valid_url("http://www.cnn.com/about/contact"));
/// ```
#[must_use]
pub fn valid_url(url: &str) -> bool {
    if url.len() < 11 || url.contains("mailto:") {
        return false;
    }
    if !url.contains("http://") && !url.contains("https://") {
        return false;
    }

    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path();
    if !path.starts_with('/') {
        return false;
    }

    let mut chunks: Vec<String> = path
        .trim_end_matches('/')
        .split('/')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(last) = chunks.last_mut() {
        if let Some(file_type) = url_to_filetype(url) {
            if !ALLOWED_TYPES.contains(&file_type.as_str()) {
                return false;
            }
        }
        let pieces: Vec<&str> = last.split('.').collect();
        if pieces.len() > 1 {
            *last = pieces[pieces.len() - 2].to_string();
        }
    }

    if let Some(pos) = chunks.iter().position(|c| c == "index") {
        chunks.remove(pos);
    }

    let parts = split_domain(parsed.host_str().unwrap_or(""));
    let tld = parts.domain.to_lowercase();
    if BAD_DOMAINS.contains(&tld.as_str()) {
        return false;
    }

    let slug = chunks.last().map(String::as_str).unwrap_or("");
    let dashes = slug.matches('-').count();
    let underscores = slug.matches('_').count();
    if !slug.is_empty() && (dashes > 4 || underscores > 4) {
        let sep = if dashes >= underscores { '-' } else { '_' };
        if !slug.split(sep).any(|w| w.to_lowercase() == tld) {
            return true;
        }
    }

    if chunks.len() <= 1 {
        return false;
    }

    if BAD_CHUNKS
        .iter()
        .any(|bad| chunks.iter().any(|c| c == bad) || *bad == parts.subdomain)
    {
        return false;
    }

    if URL_DATE.is_match(url) {
        return true;
    }

    chunks
        .iter()
        .any(|c| GOOD_PATHS.contains(&c.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parts() {
        let url = "HTTPS://News.Example.com/world/story.html?x=1";
        assert_eq!(get_scheme(url).as_deref(), Some("https"));
        assert_eq!(get_domain(url).as_deref(), Some("news.example.com"));
        assert_eq!(get_path(url), "/world/story.html");
        assert_eq!(get_path("not a url"), "");
        assert!(get_domain("/relative/path").is_none());
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url(" https://example.com/a "));
        assert!(!is_absolute_url("/a/b"));
        assert!(!is_absolute_url("ftp://example.com/a"));
        assert!(!is_absolute_url("http://"));
    }

    #[test]
    fn test_split_domain_subdomain() {
        let parts = split_domain("m.espn.com");
        assert_eq!(parts.subdomain, "m");
        assert_eq!(parts.domain, "espn");
        assert_eq!(parts.suffix, "com");
    }

    #[test]
    fn test_split_domain_multi_label_suffix() {
        let parts = split_domain("news.bbc.co.uk");
        assert_eq!(parts.subdomain, "news");
        assert_eq!(parts.domain, "bbc");
        assert_eq!(parts.suffix, "co.uk");
    }

    #[test]
    fn test_split_domain_no_subdomain() {
        let parts = split_domain("espn.com");
        assert_eq!(parts.subdomain, "");
        assert_eq!(parts.domain, "espn");
    }

    #[test]
    fn test_prepare_url_joins_relative() {
        assert_eq!(
            prepare_url("../sports", Some("http://example.com/news/today")),
            "http://example.com/sports"
        );
    }

    #[test]
    fn test_prepare_url_keeps_absolute() {
        assert_eq!(
            prepare_url("https://other.org/a", Some("http://example.com/")),
            "https://other.org/a"
        );
    }

    #[test]
    fn test_redirect_back_unwraps_foreign_redirect() {
        assert_eq!(
            redirect_back("http://tracker.net/r?url=http%3A%2F%2Fcnn.com%2Fa", "cnn.com"),
            "http://cnn.com/a"
        );
    }

    #[test]
    fn test_redirect_back_leaves_same_site() {
        let url = "http://www.cnn.com/r?url=http://elsewhere.com";
        assert_eq!(redirect_back(url, "cnn.com"), url);
    }

    #[test]
    fn test_url_to_filetype() {
        assert_eq!(url_to_filetype("http://a.com/x/story.HTML"), Some("html".to_string()));
        assert_eq!(url_to_filetype("http://a.com/x/story/"), None);
        assert_eq!(url_to_filetype("http://a.com/x/story.verylongext"), None);
    }

    #[test]
    fn test_get_base_url() {
        assert_eq!(get_base_url("https://example.com/news/x?y=1").as_deref(), Some("https://example.com"));
        assert_eq!(get_base_url("http://localhost:8080/a").as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_valid_url_accepts_dated_article() {
        assert!(valid_url("http://www.nytimes.com/2015/03/02/world/europe/story.html"));
    }

    #[test]
    fn test_valid_url_accepts_long_slug() {
        assert!(valid_url("http://example.com/this-is-a-long-news-headline-slug"));
    }

    #[test]
    fn test_valid_url_rejects_media_and_short_paths() {
        assert!(!valid_url("http://example.com/photo/cat.jpg"));
        assert!(!valid_url("http://example.com/world"));
        assert!(!valid_url("ftp://example.com/2015/03/02/x"));
    }

    #[test]
    fn test_valid_url_rejects_bad_domain_and_chunks() {
        assert!(!valid_url("http://www.facebook.com/2015/03/02/story"));
        assert!(!valid_url("http://careers.example.com/jobs/2015/03/02"));
    }

    #[test]
    fn test_valid_url_accepts_good_path() {
        assert!(valid_url("http://example.com/news/some_story"));
    }

    #[test]
    fn test_file_url_to_path() {
        let path = file_url_to_path("file:///tmp/article.html");
        assert_eq!(path, Some(PathBuf::from("/tmp/article.html")));
        assert!(file_url_to_path("http://example.com").is_none());
    }
}
