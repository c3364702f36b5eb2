//! Document Loader.
//!
//! Turns a URL or `file://` reference into a [`FetchResult`]:
//!
//! 1. fetch (local file or HTTP GET through the [`Fetcher`])
//! 2. on failure, label bot-protection pages ([`protection`])
//! 3. follow at most one `<meta http-equiv="refresh">` hop
//! 4. follow the caller's "read more" link, if configured
//!
//! The Loader never raises: every outcome is recorded on the result.

pub mod protection;

use url::Url;

use crate::config::RequestParams;
use crate::dom;
use crate::encoding;
use crate::network::Fetcher;
use crate::patterns::REFRESH_TARGET;
use crate::result::FetchResult;
use crate::url_utils;

/// Meta-refresh hops followed per load.
pub const MAX_REFRESH_DEPTH: u8 = 1;

/// Resolves references into raw HTML through a [`Fetcher`].
pub struct DocumentLoader<'a> {
    fetcher: &'a dyn Fetcher,
    params: &'a RequestParams,
    follow_meta_refresh: bool,
}

impl<'a> DocumentLoader<'a> {
    /// Loader with meta-refresh following enabled.
    #[must_use]
    pub fn new(fetcher: &'a dyn Fetcher, params: &'a RequestParams) -> Self {
        Self {
            fetcher,
            params,
            follow_meta_refresh: true,
        }
    }

    /// Enable or disable meta-refresh following.
    #[must_use]
    pub fn follow_meta_refresh(mut self, enabled: bool) -> Self {
        self.follow_meta_refresh = enabled;
        self
    }

    /// Run the full load: fetch, then meta refresh, then read more.
    #[must_use]
    pub fn load(&self, reference: &str, read_more: Option<&str>) -> FetchResult {
        let fetched = self.fetch(reference);
        self.finish(fetched, read_more)
    }

    /// Like [`load`](Self::load) for HTML the caller already holds.
    #[must_use]
    pub fn load_html(&self, html: &str, url: &str, read_more: Option<&str>) -> FetchResult {
        let fetched = FetchResult::success(html.to_string(), url, None);
        self.finish(fetched, read_more)
    }

    fn finish(&self, fetched: FetchResult, read_more: Option<&str>) -> FetchResult {
        if !fetched.is_success() {
            return fetched;
        }
        let resolved = self.resolve_redirects(fetched, 0);
        match read_more.filter(|s| !s.trim().is_empty()) {
            Some(selector) => self.follow_read_more(resolved, selector),
            None => resolved,
        }
    }

    /// Fetch a `file://` path or an HTTP(S) URL.
    #[must_use]
    pub fn fetch(&self, reference: &str) -> FetchResult {
        if reference.starts_with("file:") {
            return fetch_file(reference);
        }

        match self.fetcher.get(reference, self.params) {
            Ok(response) if response.status >= 400 => {
                let reason = protection::failure_reason(response.status, &response.body, reference);
                tracing::warn!(url = reference, status = response.status, %reason, "download failed");
                FetchResult::failure(response.final_url, Some(response.status), reason)
            }
            Ok(response) => {
                tracing::debug!(url = reference, status = response.status, bytes = response.body.len(), "downloaded");
                FetchResult::success(response.body, response.final_url, Some(response.status))
            }
            Err(err) => {
                tracing::warn!(url = reference, error = %err, "download failed");
                FetchResult::failure(reference, None, err.to_string())
            }
        }
    }

    /// Follow a meta-refresh directive when `depth` is below
    /// [`MAX_REFRESH_DEPTH`].
    ///
    /// The refreshed document replaces the HTML and final URL. If the
    /// target cannot be fetched the input is returned unchanged.
    #[must_use]
    pub fn resolve_redirects(&self, fetched: FetchResult, depth: u8) -> FetchResult {
        if !self.follow_meta_refresh || depth >= MAX_REFRESH_DEPTH || !fetched.is_success() {
            return fetched;
        }

        let Some(target) = meta_refresh_target(&fetched.html, &fetched.final_url) else {
            return fetched;
        };

        match self.fetcher.get_raw(&target) {
            Ok(html) => {
                tracing::info!(from = %fetched.final_url, to = %target, "followed meta refresh");
                self.resolve_redirects(FetchResult::success(html, target, None), depth + 1)
            }
            Err(err) => {
                tracing::warn!(target = %target, error = %err, "meta refresh target failed, keeping original");
                fetched
            }
        }
    }

    /// Replace the document with the first `selector` match's `href` target.
    ///
    /// `selector` is CSS; alternatives may be separated by commas. Any
    /// failure keeps the input unchanged.
    #[must_use]
    pub fn follow_read_more(&self, fetched: FetchResult, selector: &str) -> FetchResult {
        let Some(target) = read_more_target(&fetched.html, &fetched.final_url, selector) else {
            return fetched;
        };

        match self.fetcher.get(&target, self.params) {
            Ok(response) if response.status < 400 => {
                tracing::info!(from = %fetched.final_url, to = %target, "followed read-more link");
                FetchResult::success(response.body, response.final_url, Some(response.status))
            }
            Ok(response) => {
                tracing::warn!(target = %target, status = response.status, "read-more link failed, keeping original");
                fetched
            }
            Err(err) => {
                tracing::warn!(target = %target, error = %err, "read-more link failed, keeping original");
                fetched
            }
        }
    }
}

fn fetch_file(reference: &str) -> FetchResult {
    let Some(path) = url_utils::file_url_to_path(reference) else {
        return FetchResult::failure(reference, None, format!("invalid file URL {reference}"));
    };
    match std::fs::read(&path) {
        Ok(bytes) => FetchResult::success(encoding::decode_html(&bytes, None), reference, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "file read failed");
            FetchResult::failure(reference, None, err.to_string())
        }
    }
}

/// Absolute target of the first `<meta http-equiv="refresh">`.
#[must_use]
pub fn meta_refresh_target(html: &str, base_url: &str) -> Option<String> {
    let doc = dom::parse(html);
    let content = doc
        .select("meta[http-equiv][content]")
        .nodes()
        .iter()
        .map(|node| dom::Selection::from(*node))
        .find(|meta| {
            dom::get_attribute(meta, "http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"))
        })
        .and_then(|meta| dom::get_attribute(&meta, "content"))?;

    let target = REFRESH_TARGET.captures(&content)?.get(1)?.as_str().to_string();
    resolve(base_url, &target)
}

fn read_more_target(html: &str, base_url: &str, selector: &str) -> Option<String> {
    let doc = dom::parse(html);
    let matches = doc.try_select(selector)?;
    let href = matches
        .nodes()
        .iter()
        .map(|node| dom::Selection::from(*node))
        .find_map(|link| dom::non_empty_attribute(&link, "href"))?;
    resolve(base_url, &href)
}

fn resolve(base_url: &str, target: &str) -> Option<String> {
    match Url::parse(base_url) {
        Ok(base) => base.join(target).ok().map(String::from),
        Err(_) => Url::parse(target).ok().map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_refresh_target_resolves_relative() {
        let html = r#"<html><head><meta http-equiv="Refresh" content="0; url=/next"></head></html>"#;
        assert_eq!(
            meta_refresh_target(html, "https://example.com/a/b").as_deref(),
            Some("https://example.com/next")
        );
    }

    #[test]
    fn test_meta_refresh_without_url_is_ignored() {
        let html = r#"<meta http-equiv="refresh" content="30">"#;
        assert!(meta_refresh_target(html, "https://example.com/").is_none());
    }

    #[test]
    fn test_read_more_target_first_with_href() {
        let html = r#"<a class="more">no href</a><a class="more" href="page2">next</a><a class="more" href="page3">x</a>"#;
        assert_eq!(
            read_more_target(html, "https://example.com/story/", "a.more").as_deref(),
            Some("https://example.com/story/page2")
        );
    }

    #[test]
    fn test_read_more_target_invalid_selector() {
        assert!(read_more_target("<a href='x'>x</a>", "https://example.com/", "a[[").is_none());
    }

    #[test]
    fn test_fetch_file_missing_records_os_error() {
        let result = fetch_file("file:///nonexistent/rs-newspaper/missing.html");
        assert!(!result.is_success());
        let reason = result.failure_reason.unwrap_or_default();
        assert!(reason.contains("No such file") || reason.contains("os error"));
    }
}
