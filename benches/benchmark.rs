//! Performance benchmarks for rs-newspaper.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Metadata resolution and the parse stage on a small synthetic page
//! - Saved pages from `BENCH_HTML_DIR` when the variable is set

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_newspaper::{dom, metadata, nlp, Article, Config, DownloadOptions};
use std::fs;

const URL: &str = "https://example.com/world/2024/03/02/sample-article-title.html";

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article Title | Example News</title>
    <meta name="author" content="John Doe">
    <meta name="description" content="A sample article for benchmarking.">
    <meta property="og:type" content="article">
    <meta property="article:published_time" content="2024-03-02T10:00:00Z">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/world">World</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p class="byline">By John Doe</p>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should be picked as the main text of the page.</p>
        <p>Here is a second paragraph with more content. The parser should
        keep the text while it drops the navigation and other boilerplate.</p>
        <p>A third paragraph makes sure there is enough content for a
        meaningful measure of the parse stage.</p>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li><a href="/world/related-1">Related article 1</a></li>
            <li><a href="/world/related-2">Related article 2</a></li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

fn bench_metadata(c: &mut Criterion) {
    let doc = dom::parse(SAMPLE_HTML);
    c.bench_function("extract_metadata", |b| {
        b.iter(|| metadata::extract_metadata(black_box(&doc), black_box(URL)));
    });
}

fn parse_article(html: &str) -> Option<Article> {
    let mut article = Article::new(URL, Config::default()).ok()?;
    article.download_with(DownloadOptions {
        input_html: Some(html.to_string()),
        ..DownloadOptions::default()
    });
    article.parse().ok()?;
    Some(article)
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("article_parse", |b| {
        b.iter(|| parse_article(black_box(SAMPLE_HTML)));
    });
}

fn bench_nlp(c: &mut Criterion) {
    let Some(article) = parse_article(SAMPLE_HTML) else {
        return;
    };
    let config = Config::default();
    let Some(stopwords) = config.stopwords.get("en") else {
        return;
    };
    c.bench_function("keywords_and_summary", |b| {
        b.iter(|| {
            let keywords = nlp::keywords(black_box(article.text()), &stopwords, 10);
            let summary = nlp::summarize(article.title(), article.text(), 5, &stopwords);
            (keywords, summary)
        });
    });
}

/// Saved pages of varying sizes from `BENCH_HTML_DIR`.
fn bench_real_world_html(c: &mut Criterion) {
    let Ok(html_dir) = std::env::var("BENCH_HTML_DIR") else {
        return;
    };
    let Ok(entries) = fs::read_dir(&html_dir) else {
        return;
    };

    let mut group = c.benchmark_group("real_world");

    for entry in entries.flatten().take(10) {
        let path = entry.path();
        if let Ok(html) = fs::read_to_string(&path) {
            let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("page");
            let size_kb = html.len() / 1024;
            group.throughput(Throughput::Bytes(html.len() as u64));
            group.bench_with_input(
                BenchmarkId::new("parse", format!("{filename} ({size_kb}KB)")),
                &html,
                |b, html| {
                    b.iter(|| parse_article(black_box(html)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_metadata, bench_parse, bench_nlp, bench_real_world_html);
criterion_main!(benches);
