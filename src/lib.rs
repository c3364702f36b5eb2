//! # rs-newspaper
//!
//! News article acquisition and metadata resolution.
//!
//! An [`Article`] downloads a page (following one meta-refresh hop and an
//! optional read-more link), resolves its title, authors, publish date,
//! language and other metadata, picks the main text block, and can
//! optionally compute keywords and a summary.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_newspaper::{Article, Config, DownloadOptions};
//!
//! let html = r#"<html lang="en"><head><title>Storm hits coast - Daily News</title>
//! <meta name="author" content="Jane Doe"></head>
//! <body><div><p>The storm hit the coast in the night and it was the worst of the year.</p></div></body></html>"#;
//!
//! let mut article = Article::new("https://example.com/2024/01/15/storm.html", Config::default())?;
//! article.download_with(DownloadOptions { input_html: Some(html.into()), ..Default::default() });
//! article.parse()?;
//!
//! assert_eq!(article.title(), "Storm hits coast");
//! assert_eq!(article.authors(), ["Jane Doe"]);
//! assert!(article.publish_date().is_some());
//! # Ok::<(), rs_newspaper::Error>(())
//! ```
//!
//! ## Building blocks
//!
//! The stages are usable on their own:
//!
//! - [`metadata`]: title, author, date, language and meta-tag heuristics
//! - [`categories`]: section and feed URL discovery on a front page
//! - [`content`]: top node scoring, text formatting, images and videos
//! - [`nlp`]: stopwords, keywords and extractive summaries
//! - [`loader`]: fetching with redirect and bot-protection handling

mod article;
mod config;
mod error;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// URL utilities for validation, resolution, and normalization.
pub mod url_utils;

/// HTTP transport.
pub mod network;

/// Document loading: fetch, meta refresh, read-more links.
pub mod loader;

/// Metadata extraction (title, authors, dates, meta tags, JSON-LD).
pub mod metadata;

/// Category and feed URL discovery.
pub mod categories;

/// Boilerplate removal on the working copy.
pub mod cleaner;

/// Main content: top node, formatting, images, videos.
pub mod content;

/// Stopwords, keywords and summaries.
pub mod nlp;

// Public API - re-exports
pub use article::{Article, ArticleOptions, Collaborators, DownloadOptions};
pub use config::{Auth, Config, RequestParams, DEFAULT_USER_AGENT};
pub use error::{Error, Result};
pub use network::{Fetcher, HttpFetcher, HttpResponse, TransportError};
pub use result::{
    ArticleOutput, ExtractionState, FetchResult, ImageSet, MetaValue, ResolvedMetadata, Video,
};
