mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use rs_newspaper::{dom, metadata, MetaValue};

#[test]
fn title_split_follows_h1_hint() {
    let doc = dom::parse("<html><head><title>Foo - Bar News</title></head><body><h1>Foo</h1></body></html>");
    assert_eq!(metadata::get_title(&doc), "Foo");
}

#[test]
fn title_exact_h1_match_is_not_split() {
    let doc = dom::parse(
        "<html><head><title>Exact Match</title></head><body><h1>Exact Match</h1></body></html>",
    );
    assert_eq!(metadata::get_title(&doc), "Exact Match");
}

#[test]
fn title_without_title_element_is_empty() {
    let doc = dom::parse("<html><body><h1>Only a headline here</h1></body></html>");
    assert_eq!(metadata::get_title(&doc), "");
}

#[test]
fn url_date_beats_future_meta_date() {
    let html = r#"<html><head>
        <meta property="article:published_time" content="2099-01-01">
    </head><body></body></html>"#;
    let doc = dom::parse(html);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single();
    let Some(now) = now else {
        panic!("valid timestamp");
    };

    let date = metadata::get_publishing_date_at(&doc, "https://example.com/2023/05/10/story.html", now);
    assert_eq!(date.map(|d| d.date_naive()), NaiveDate::from_ymd_opt(2023, 5, 10));
}

#[test]
fn unparseable_dates_are_absent() {
    let html = r#"<meta property="article:published_time" content="sometime last spring">"#;
    let doc = dom::parse(html);
    assert!(metadata::get_publishing_date(&doc, "https://example.com/story").is_none());
}

#[test]
fn json_ld_date_is_used() {
    let html = r#"<html><head><script type="application/ld+json">
        {"@context": "https://schema.org", "@type": "NewsArticle", "datePublished": "2022-11-03T09:00:00Z"}
    </script></head><body></body></html>"#;
    let doc = dom::parse(html);
    let date = metadata::get_publishing_date(&doc, "https://example.com/story");
    assert_eq!(date.map(|d| d.date_naive()), NaiveDate::from_ymd_opt(2022, 11, 3));
}

#[test]
fn canonical_strips_hostname_from_path() {
    let doc = dom::parse(r#"<meta property="og:url" content="example.com/article.html">"#);
    assert_eq!(
        metadata::get_canonical_link(&doc, "https://example.com/news/x"),
        "https://example.com/article.html"
    );
}

#[test]
fn canonical_link_tag_wins_over_og_url() {
    let doc = dom::parse(
        r#"<link rel="canonical" href="https://example.com/a"><meta property="og:url" content="https://example.com/b">"#,
    );
    assert_eq!(
        metadata::get_canonical_link(&doc, "https://example.com/news/x"),
        "https://example.com/a"
    );
}

#[test]
fn authors_are_unique_in_first_seen_order() {
    let html = r#"<html><head><meta name="author" content="Jane Doe"></head><body>
        <span class="byline">By JANE DOE and John Smith</span>
        <div itemprop="author">john smith</div>
    </body></html>"#;
    let authors = metadata::get_authors(&dom::parse(html));

    assert_eq!(authors.first().map(String::as_str), Some("Jane Doe"));
    assert!(authors.iter().any(|a| a.eq_ignore_ascii_case("john smith")));
    let mut lowered: Vec<String> = authors.iter().map(|a| a.trim().to_lowercase()).collect();
    lowered.sort();
    lowered.dedup();
    assert_eq!(lowered.len(), authors.len());
}

#[test]
fn author_role_words_are_removed() {
    let authors = metadata::get_authors(&dom::parse(
        r#"<p class="author">By Senior Reporter Alex Kim</p>"#,
    ));
    assert_eq!(authors, vec!["Alex Kim"]);
}

#[test]
fn meta_tree_keeps_displaced_scalar() {
    let html = r#"<meta property="og:image" content="https://example.com/a.jpg">
        <meta property="og:image:width" content="640">"#;
    let meta = metadata::extract_metadata(&dom::parse(html), "https://example.com/x");

    assert_eq!(meta.meta("og:image:width"), Some(&MetaValue::Number(640)));
    assert_eq!(
        meta.meta("og:image").and_then(MetaValue::as_text).as_deref(),
        Some("https://example.com/a.jpg")
    );
}

#[test]
fn extraction_is_idempotent() {
    let doc = dom::parse(common::STORY);
    let first = metadata::extract_metadata(&doc, common::STORY_URL);
    let second = metadata::extract_metadata(&doc, common::STORY_URL);
    assert_eq!(first, second);
    assert_eq!(first.title, "Council approves new harbour plan");
}

#[test]
fn empty_document_yields_defaults() {
    for html in ["", "   \n\t"] {
        let meta = metadata::extract_metadata(&dom::parse(html), "https://example.com/story");
        assert!(meta.title.is_empty());
        assert!(meta.authors.is_empty());
        assert!(meta.publish_date.is_none());
        assert!(meta.language.is_empty());
        assert!(meta.keywords.is_empty());
        assert!(meta.tags.is_empty());
    }
}

#[test]
fn language_fallbacks() {
    let from_http_equiv = dom::parse(r#"<meta http-equiv="content-language" content="FR-ca">"#);
    assert_eq!(metadata::get_meta_lang(&from_http_equiv), "fr");

    let numeric = dom::parse(r#"<html lang="12"><body></body></html>"#);
    assert_eq!(metadata::get_meta_lang(&numeric), "");
}

#[test]
fn tags_fall_back_to_tag_hrefs() {
    let doc = dom::parse(
        r#"<a href="/tag/floods">Floods</a><a href="/topic/weather">Weather</a><a href="/about">About</a>"#,
    );
    let tags = metadata::extract_tags(&doc);
    assert_eq!(tags.len(), 2);
    assert!(tags.contains("Floods"));
    assert!(tags.contains("Weather"));
}
