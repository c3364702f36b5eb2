//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use rs_newspaper::{Fetcher, HttpResponse, RequestParams, TransportError};

/// A [`Fetcher`] serving canned pages and recording every request.
///
/// Unknown URLs fail with a transport error.
#[derive(Default)]
pub struct CannedFetcher {
    pages: HashMap<String, (u16, String)>,
    requests: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(url.to_string(), (status, body.to_string()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, url: &str) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(url.to_string());
        }
    }
}

impl Fetcher for CannedFetcher {
    fn get(&self, url: &str, _params: &RequestParams) -> Result<HttpResponse, TransportError> {
        self.record(url);
        self.pages
            .get(url)
            .map(|(status, body)| HttpResponse {
                body: body.clone(),
                status: *status,
                final_url: url.to_string(),
            })
            .ok_or_else(|| TransportError(format!("connection refused: {url}")))
    }

    fn get_raw(&self, url: &str) -> Result<String, TransportError> {
        self.record(url);
        match self.pages.get(url) {
            Some((status, body)) if *status < 400 => Ok(body.clone()),
            Some((status, _)) => Err(TransportError(format!("status {status}"))),
            None => Err(TransportError(format!("connection refused: {url}"))),
        }
    }
}

/// A page whose only content is a meta refresh to `target`.
pub fn refresh_page(target: &str) -> String {
    format!(r#"<html><head><meta http-equiv="refresh" content="0; url={target}"></head><body></body></html>"#)
}

/// A realistic article page.
pub const STORY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Council approves new harbour plan - Coast Herald</title>
    <meta name="author" content="Maria Lopez">
    <meta name="description" content="The council voted on Tuesday to approve the harbour plan.">
    <meta name="keywords" content="harbour, council, planning">
    <meta property="og:type" content="article">
    <meta property="og:site_name" content="Coast Herald">
    <meta property="og:title" content="Council approves new harbour plan">
    <meta property="og:image" content="https://cdn.coastherald.com/harbour.jpg">
    <meta property="og:image:width" content="1200">
    <meta property="article:published_time" content="2024-04-09T08:30:00Z">
    <link rel="canonical" href="https://coastherald.com/local/council-approves-harbour-plan">
    <link rel="icon" href="/favicon.ico">
</head>
<body>
    <nav class="menu"><a href="/">Home</a> <a href="/local">Local</a> <a href="/sport">Sport</a></nav>
    <h1>Council approves new harbour plan</h1>
    <div class="byline">By Maria Lopez and Tom Reed</div>
    <div class="story-body">
        <p>The council voted on Tuesday to approve the new harbour plan after a long debate in the town hall.</p>
        <p>It is the first time in ten years that the harbour has been the subject of such a plan, and the vote was close.</p>
        <p>Residents who spoke at the meeting said that the plan would bring new jobs to the area and that it was long overdue.</p>
        <p>Work on the first phase is due to start in the spring, and the council said it would publish a timetable for the rest.</p>
        <img src="/images/harbour-map.png">
    </div>
    <div class="tags"><a rel="tag" href="/tag/harbour">Harbour</a><a rel="tag" href="/tag/council">Council</a></div>
    <footer><p>Copyright Coast Herald</p></footer>
</body>
</html>"#;

/// URL the story is served from.
pub const STORY_URL: &str = "https://coastherald.com/local/2024/04/09/council-approves-harbour-plan.html";
