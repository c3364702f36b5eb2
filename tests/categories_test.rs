use rs_newspaper::{categories, dom, url_utils};

#[test]
fn espn_related_subdomain_kept_mobile_and_unrelated_dropped() {
    let doc = dom::parse(
        r#"<a href="http://m.espn.com/nba">NBA</a>
           <a href="http://espn.go.com/nfl">NFL</a>
           <a href="http://unrelated.com/x">Elsewhere</a>"#,
    );
    let urls = categories::category_urls("http://espn.com", &doc);

    assert_eq!(urls, vec!["http://espn.go.com/", "http://espn.com/"]);
}

#[test]
fn front_page_sections() {
    let doc = dom::parse(
        r#"<nav>
             <a href="/world">World</a>
             <a href="/politics/">Politics</a>
             <a href="/careers">Careers</a>
             <a href="/2024/01/15/a-long-story.html">Story</a>
             <a href="https://sport.herald.co.uk">Sport</a>
             <a href="https://www.facebook.com/herald">Facebook</a>
             <a href="javascript:void(0)">Menu</a>
           </nav>"#,
    );
    let urls = categories::category_urls("https://www.herald.co.uk", &doc);

    assert_eq!(
        urls,
        vec![
            "https://www.herald.co.uk/world",
            "https://www.herald.co.uk/politics",
            "https://sport.herald.co.uk/",
            "https://www.herald.co.uk/",
        ]
    );
}

#[test]
fn feeds_from_category_pages() {
    let world = dom::parse(r#"<head><link rel="alternate" type="application/rss+xml" href="/world/rss.xml"></head>"#);
    let sport = dom::parse(
        r#"<head><link type="application/rss+xml" href="https://sport.herald.co.uk/feed">
           <link type="application/rss+xml" href="/world/rss.xml"></head>"#,
    );
    let feeds = categories::feed_urls("https://www.herald.co.uk", &[world, sport]);

    assert_eq!(
        feeds,
        vec![
            "https://www.herald.co.uk/world/rss.xml",
            "https://sport.herald.co.uk/feed",
        ]
    );
}

#[test]
fn domain_split_uses_public_suffix() {
    let parts = url_utils::split_domain("sport.herald.co.uk");
    assert_eq!(parts.subdomain, "sport");
    assert_eq!(parts.domain, "herald");
    assert_eq!(parts.suffix, "co.uk");
}

#[test]
fn article_url_heuristic() {
    assert!(url_utils::valid_url(
        "https://www.herald.co.uk/news/2024/01/15/harbour-plan-approved"
    ));
    assert!(url_utils::valid_url(
        "https://www.herald.co.uk/local/council-votes-to-approve-new-harbour-plan"
    ));
    assert!(!url_utils::valid_url("https://www.herald.co.uk/about"));
    assert!(!url_utils::valid_url("https://www.herald.co.uk/media/photo.jpg"));
}
