mod common;

use common::{refresh_page, CannedFetcher};
use rs_newspaper::loader::DocumentLoader;
use rs_newspaper::RequestParams;

const START: &str = "https://news.example.com/story";

fn params() -> RequestParams {
    RequestParams::default()
}

#[test]
fn successful_fetch_keeps_body_and_status() {
    let fetcher = CannedFetcher::new().page(START, 200, "<html><body>ok</body></html>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert!(result.is_success());
    assert_eq!(result.html, "<html><body>ok</body></html>");
    assert_eq!(result.final_url, START);
    assert_eq!(result.status_code, Some(200));
}

#[test]
fn cloudflare_challenge_is_labelled() {
    let body = r#"<script src="/cdn-cgi/challenge-platform/h/b/orchestrate/chl_page/v1"></script>"#;
    let fetcher = CannedFetcher::new().page(START, 503, body);
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert!(!result.is_success());
    assert_eq!(result.status_code, Some(503));
    assert_eq!(
        result.failure_reason.as_deref(),
        Some("Website protected with Cloudflare, url: https://news.example.com/story")
    );
}

#[test]
fn perimeterx_block_is_labelled() {
    let fetcher = CannedFetcher::new().page(START, 403, "blocked by perimeterx");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert_eq!(
        result.failure_reason.as_deref(),
        Some("Website protected with PerimeterX, url: https://news.example.com/story")
    );
}

#[test]
fn plain_error_status_reports_code() {
    let fetcher = CannedFetcher::new().page(START, 404, "<h1>Not found</h1>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert_eq!(
        result.failure_reason.as_deref(),
        Some("Status code 404 for url https://news.example.com/story")
    );
    assert!(result.html.is_empty());
}

#[test]
fn transport_error_message_is_verbatim() {
    let fetcher = CannedFetcher::new();
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert_eq!(
        result.failure_reason.as_deref(),
        Some("connection refused: https://news.example.com/story")
    );
    assert_eq!(result.status_code, None);
}

#[test]
fn meta_refresh_is_followed_at_most_once() {
    let second = "https://news.example.com/second";
    let third = "https://news.example.com/third";
    let fetcher = CannedFetcher::new()
        .page(START, 200, &refresh_page(second))
        .page(second, 200, &refresh_page(third))
        .page(third, 200, "<html><body>final</body></html>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert!(result.is_success());
    assert_eq!(result.final_url, second);
    assert!(result.html.contains(third));
    assert_eq!(fetcher.requests(), vec![START.to_string(), second.to_string()]);
}

#[test]
fn failed_refresh_keeps_original() {
    let original = refresh_page("/gone");
    let fetcher = CannedFetcher::new().page(START, 200, &original);
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, None);

    assert!(result.is_success());
    assert_eq!(result.final_url, START);
    assert_eq!(result.html, original);
    assert_eq!(
        fetcher.requests(),
        vec![START.to_string(), "https://news.example.com/gone".to_string()]
    );
}

#[test]
fn refresh_can_be_disabled() {
    let fetcher = CannedFetcher::new().page(START, 200, &refresh_page("/next"));
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params)
        .follow_meta_refresh(false)
        .load(START, None);

    assert_eq!(result.final_url, START);
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn read_more_follows_first_match() {
    let teaser = r#"<p>Teaser</p><a class="more" href="/story/full">Read more</a><a class="more" href="/other">x</a>"#;
    let full = "https://news.example.com/story/full";
    let fetcher = CannedFetcher::new()
        .page(START, 200, teaser)
        .page(full, 200, "<p>Full story</p>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, Some("a.more"));

    assert_eq!(result.final_url, full);
    assert_eq!(result.html, "<p>Full story</p>");
}

#[test]
fn read_more_runs_after_refresh() {
    let landing = "https://news.example.com/landing";
    let full = "https://news.example.com/full";
    let fetcher = CannedFetcher::new()
        .page(START, 200, &refresh_page(landing))
        .page(landing, 200, r#"<a id="more" href="/full">more</a>"#)
        .page(full, 200, "<p>Full</p>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, Some("#more"));

    assert_eq!(result.final_url, full);
    assert_eq!(
        fetcher.requests(),
        vec![START.to_string(), landing.to_string(), full.to_string()]
    );
}

#[test]
fn failed_read_more_keeps_original() {
    let teaser = r#"<a class="more" href="/missing">Read more</a>"#;
    let fetcher = CannedFetcher::new().page(START, 200, teaser);
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, Some("a.more"));

    assert!(result.is_success());
    assert_eq!(result.final_url, START);
    assert_eq!(result.html, teaser);
}

#[test]
fn read_more_without_match_is_skipped() {
    let fetcher = CannedFetcher::new().page(START, 200, "<p>No link</p>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(START, Some("a.more"));

    assert_eq!(result.html, "<p>No link</p>");
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn cached_html_still_resolves_refresh() {
    let next = "https://news.example.com/next";
    let fetcher = CannedFetcher::new().page(next, 200, "<p>next</p>");
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load_html(&refresh_page(next), START, None);

    assert_eq!(result.final_url, next);
    assert_eq!(result.html, "<p>next</p>");
    assert_eq!(fetcher.requests(), vec![next.to_string()]);
}

#[test]
fn local_file_is_read_and_decoded() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    let path = dir.path().join("page.html");
    if let Err(err) = std::fs::write(&path, "<html><body><p>Caf\u{e9} story</p></body></html>") {
        panic!("write: {err}");
    }
    let reference = match url::Url::from_file_path(&path) {
        Ok(url) => url.to_string(),
        Err(()) => panic!("file url for {}", path.display()),
    };

    let fetcher = CannedFetcher::new();
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params).load(&reference, None);

    assert!(result.is_success());
    assert!(result.html.contains("Café story"));
    assert!(fetcher.requests().is_empty());
}

#[test]
fn missing_local_file_fails() {
    let fetcher = CannedFetcher::new();
    let params = params();
    let result = DocumentLoader::new(&fetcher, &params)
        .load("file:///nonexistent/rs-newspaper/none.html", None);

    assert!(!result.is_success());
    assert!(result.failure_reason.is_some());
}
