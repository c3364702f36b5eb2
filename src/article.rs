//! Article lifecycle controller.
//!
//! An [`Article`] drives one document through
//! `download -> parse -> nlp`. Each step computes its results first and
//! commits them in one go under the state guard, so a failed or skipped
//! step never leaves half-written fields behind.
//!
//! ```text
//! NotStarted --download--> Fetched --parse--> Parsed --nlp--> Parsed
//!      \
//!       `------download--> FailedFetch
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use dom_query::Document;
use url::Url;

use crate::cleaner::{DefaultCleaner, DocumentCleaner};
use crate::config::Config;
use crate::content::{
    DefaultImageExtractor, DefaultVideoExtractor, DensityScorer, ImageExtractor, OutputFormatter,
    TextFormatter, TopNode, TopNodeResolver, VideoExtractor,
};
use crate::dom;
use crate::error::{Error, Result};
use crate::loader::DocumentLoader;
use crate::metadata;
use crate::network::{Fetcher, HttpFetcher};
use crate::nlp::{FrequencyNlp, Nlp, StopWords};
use crate::result::{
    ArticleOutput, ExtractionState, FetchResult, ImageSet, MetaValue, ResolvedMetadata, Video,
};
use crate::url_utils;

/// Schemes an article URL may use.
const ACCEPTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// URL fragments of media-heavy pages that may carry little text.
const MEDIA_URL_MARKERS: &[&str] = &[
    "/video",
    "/slide",
    "/gallery",
    "/powerpoint",
    "/fashion",
    "/glamour",
    "/cloth",
];

/// Keywords taken from each of the title and the text.
const KEYWORDS_PER_SOURCE: usize = 10;

/// Sub-directory of the resource root holding per-article directories.
const RESOURCE_DIR: &str = "article_resources";

/// Constructor inputs besides the URL.
#[derive(Debug, Clone, Default)]
pub struct ArticleOptions {
    /// Title used when none can be extracted.
    pub title: String,

    /// Front page of the publishing site. Inferred as `scheme://host` of
    /// the article URL when empty.
    pub source_url: String,

    /// CSS selector of a link to the full article.
    pub read_more_link: String,
}

/// Options for [`Article::download_with`].
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Cached HTML to use instead of fetching the article URL.
    pub input_html: Option<String>,

    /// Title that overrides whatever `parse()` extracts.
    pub title: Option<String>,

    /// Skip the read-more link even when one is configured.
    pub ignore_read_more: bool,
}

/// The pluggable stages of [`Article::parse`] and [`Article::nlp`].
pub struct Collaborators {
    pub cleaner: Box<dyn DocumentCleaner>,
    pub top_node: Box<dyn TopNodeResolver>,
    pub formatter: Box<dyn OutputFormatter>,
    pub images: Box<dyn ImageExtractor>,
    pub videos: Box<dyn VideoExtractor>,
    pub nlp: Box<dyn Nlp>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            cleaner: Box::new(DefaultCleaner),
            top_node: Box::new(DensityScorer),
            formatter: Box::new(TextFormatter),
            images: Box::new(DefaultImageExtractor),
            videos: Box::new(DefaultVideoExtractor),
            nlp: Box::new(FrequencyNlp),
        }
    }
}

/// Everything `parse()` resolves, committed at once.
struct ParseDelta {
    doc: Document,
    clean_doc: Document,
    link_hash: String,
    metadata: ResolvedMetadata,
    meta_lang: String,
    language: String,
    top_node: Option<TopNode>,
    clean_top_node: Option<TopNode>,
    text: String,
    text_cleaned: String,
    article_html: String,
    images: ImageSet,
    videos: Vec<Video>,
}

/// Everything `nlp()` computes, committed at once.
struct NlpDelta {
    keywords: Vec<String>,
    summary: String,
}

/// One news article and its pipeline state.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{Article, Config, DownloadOptions, ExtractionState};
///
/// let mut article = Article::new("https://example.com/2024/01/15/storm.html", Config::default())?;
/// article.download_with(DownloadOptions {
///     input_html: Some("<html><head><title>Storm hits coast | Daily</title></head></html>".into()),
///     ..DownloadOptions::default()
/// });
/// article.parse()?;
///
/// assert_eq!(article.state(), ExtractionState::Parsed);
/// assert_eq!(article.title(), "Storm hits coast");
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
pub struct Article {
    config: Config,
    fetcher: Option<Arc<dyn Fetcher>>,
    collaborators: Collaborators,

    url: String,
    original_url: String,
    source_url: String,
    read_more_link: String,

    state: ExtractionState,
    fetch: FetchResult,

    title: String,
    title_forced: bool,
    language: String,
    meta_lang: String,
    metadata: ResolvedMetadata,

    doc: Option<Document>,
    clean_doc: Option<Document>,
    top_node: Option<TopNode>,
    clean_top_node: Option<TopNode>,

    text: String,
    text_cleaned: String,
    article_html: String,
    images: ImageSet,
    videos: Vec<Video>,

    keywords: Vec<String>,
    summary: String,

    link_hash: Option<String>,
    resource_dir: Option<PathBuf>,
    additional_data: BTreeMap<String, serde_json::Value>,
}

impl Article {
    /// Article for `url` with default options.
    pub fn new(url: &str, config: Config) -> Result<Self> {
        Self::with_options(url, ArticleOptions::default(), config)
    }

    /// Validate and normalize `url`; nothing is fetched yet.
    ///
    /// Fails with [`Error::InvalidUrl`] when the URL does not parse or its
    /// scheme is not `http`, `https` or `file`.
    pub fn with_options(url: &str, options: ArticleOptions, config: Config) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !ACCEPTED_SCHEMES.contains(&parsed.scheme()) {
            return Err(invalid(&format!("unsupported scheme `{}`", parsed.scheme())));
        }

        let source_url = if options.source_url.trim().is_empty() {
            format!("{}://{}", parsed.scheme(), parsed.host_str().unwrap_or(""))
        } else {
            options.source_url.trim().to_string()
        };

        let url = url_utils::prepare_url(url.trim(), Some(&source_url));
        if url.is_empty() {
            return Err(invalid("does not resolve against the source URL"));
        }

        let title = cap_chars(&options.title, config.max_title);
        let language = config.language.clone();

        Ok(Self {
            config,
            fetcher: None,
            collaborators: Collaborators::default(),
            original_url: url.clone(),
            url,
            source_url,
            read_more_link: options.read_more_link,
            state: ExtractionState::NotStarted,
            fetch: FetchResult::default(),
            title,
            title_forced: false,
            language,
            meta_lang: String::new(),
            metadata: ResolvedMetadata::default(),
            doc: None,
            clean_doc: None,
            top_node: None,
            clean_top_node: None,
            text: String::new(),
            text_cleaned: String::new(),
            article_html: String::new(),
            images: ImageSet::default(),
            videos: Vec::new(),
            keywords: Vec::new(),
            summary: String::new(),
            link_hash: None,
            resource_dir: None,
            additional_data: BTreeMap::new(),
        })
    }

    /// Use `fetcher` instead of the default HTTP client.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replace the parse and NLP collaborators.
    #[must_use]
    pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    // === Pipeline ===

    /// Download, parse and run NLP.
    pub fn build(&mut self) -> Result<()> {
        self.download();
        self.parse()?;
        self.nlp()
    }

    /// Fetch the article URL. See [`download_with`](Self::download_with).
    pub fn download(&mut self) {
        self.download_with(DownloadOptions::default());
    }

    /// Fetch (or take the cached HTML), follow meta refresh and the
    /// read-more link, and record the outcome.
    ///
    /// Never fails: a failed fetch moves the article to
    /// [`ExtractionState::FailedFetch`] with the reason recorded. Only the
    /// first download of an article counts; later calls are ignored.
    pub fn download_with(&mut self, options: DownloadOptions) {
        if self.state != ExtractionState::NotStarted {
            tracing::warn!(url = %self.url, state = ?self.state, "article already downloaded");
            return;
        }

        let fetched = match self.fetcher() {
            Ok(fetcher) => {
                let loader = DocumentLoader::new(fetcher.as_ref(), &self.config.request)
                    .follow_meta_refresh(self.config.follow_meta_refresh);
                let read_more = Some(self.read_more_link.as_str())
                    .filter(|s| !options.ignore_read_more && !s.trim().is_empty());
                match options.input_html {
                    Some(ref html) => loader.load_html(html, &self.url, read_more),
                    None => loader.load(&self.url, read_more),
                }
            }
            Err(err) => FetchResult::failure(self.url.clone(), None, err.to_string()),
        };

        self.commit_download(fetched, options.title);
    }

    fn fetcher(&mut self) -> Result<Arc<dyn Fetcher>> {
        if let Some(ref fetcher) = self.fetcher {
            return Ok(Arc::clone(fetcher));
        }
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&self.config.request)?);
        self.fetcher = Some(Arc::clone(&fetcher));
        Ok(fetcher)
    }

    fn commit_download(&mut self, fetched: FetchResult, title: Option<String>) {
        let next = if fetched.is_success() {
            ExtractionState::Fetched
        } else {
            ExtractionState::FailedFetch
        };
        if !self.state.can_advance_to(next) {
            return;
        }

        match next {
            ExtractionState::Fetched => {
                if !fetched.final_url.is_empty() {
                    self.url.clone_from(&fetched.final_url);
                }
                if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
                    self.title = cap_chars(&title, self.config.max_title);
                    self.title_forced = true;
                }
                tracing::debug!(url = %self.url, bytes = fetched.html.len(), "article downloaded");
            }
            _ => tracing::debug!(
                url = %self.url,
                reason = fetched.failure_reason.as_deref().unwrap_or(""),
                "article download failed"
            ),
        }

        self.fetch = fetched;
        self.state = next;
    }

    /// Resolve metadata, body text, images and videos.
    ///
    /// Requires a successful download. An empty document is a soft no-op:
    /// the article stays [`ExtractionState::Fetched`] with empty fields.
    /// Parsing an already parsed article does nothing.
    pub fn parse(&mut self) -> Result<()> {
        self.require_fetched()?;
        if self.state == ExtractionState::Parsed {
            return Ok(());
        }

        match self.extract() {
            Some(delta) => self.commit_parse(delta),
            None => tracing::debug!(url = %self.url, "empty document, nothing to parse"),
        }
        Ok(())
    }

    fn extract(&self) -> Option<ParseDelta> {
        if self.fetch.html.trim().is_empty() {
            return None;
        }

        let doc = dom::parse(&self.fetch.html);
        let clean_doc = dom::clone_document(&doc);
        let link_hash = link_hash(&self.url);

        let metadata = metadata::extract_metadata(&clean_doc, &self.url);

        let mut language = self.language.clone();
        let mut meta_lang = String::new();
        if !metadata.language.is_empty() && self.config.stopwords.available(&metadata.language) {
            meta_lang.clone_from(&metadata.language);
            if self.config.use_meta_language {
                language.clone_from(&metadata.language);
            }
        }
        let stopwords = self.stopwords(&language);

        let parts = &self.collaborators;
        parts.cleaner.clean(&clean_doc);

        let top_node = parts.top_node.resolve(&doc, &stopwords);
        let clean_top_node = parts.top_node.resolve(&clean_doc, &stopwords);

        let videos = parts.videos.parse_videos(&doc);

        let (text, article_html) = top_node
            .as_ref()
            .and_then(TopNode::complemented_root)
            .map(|root| parts.formatter.format(&root))
            .unwrap_or_default();
        let text_cleaned = clean_top_node
            .as_ref()
            .and_then(TopNode::root)
            .map(|root| parts.formatter.format(&root).0)
            .unwrap_or_default();

        let images = {
            let clean_root = clean_top_node.as_ref().and_then(TopNode::root);
            parts.images.parse_images(&self.url, &clean_doc, clean_root.as_ref())
        };

        Some(ParseDelta {
            doc,
            clean_doc,
            link_hash,
            metadata,
            meta_lang,
            language,
            top_node,
            clean_top_node,
            text,
            text_cleaned,
            article_html,
            images,
            videos,
        })
    }

    fn commit_parse(&mut self, delta: ParseDelta) {
        if !self.state.can_advance_to(ExtractionState::Parsed) {
            return;
        }
        let max_text = self.config.max_text;

        if !self.title_forced && !delta.metadata.title.is_empty() {
            self.title = cap_chars(&delta.metadata.title, self.config.max_title);
        }
        let mut metadata = delta.metadata;
        metadata.authors.truncate(self.config.max_authors);
        metadata.keywords.truncate(self.config.max_keywords);
        self.metadata = metadata;

        self.language = delta.language;
        self.meta_lang = delta.meta_lang;
        self.doc = Some(delta.doc);
        self.clean_doc = Some(delta.clean_doc);
        self.top_node = delta.top_node;
        self.clean_top_node = delta.clean_top_node;
        self.text = cap_chars(&delta.text, max_text);
        self.text_cleaned = cap_chars(&delta.text_cleaned, max_text);
        self.article_html = delta.article_html;
        self.images = delta.images;
        self.videos = delta.videos;
        self.link_hash = Some(delta.link_hash);

        self.state = ExtractionState::Parsed;
        self.build_resource_path();

        tracing::info!(
            url = %self.url,
            title = %self.title,
            words = self.text.split_whitespace().count(),
            "article parsed"
        );
    }

    /// Keywords and summary from the title and body text.
    ///
    /// Requires a parsed article.
    pub fn nlp(&mut self) -> Result<()> {
        self.require_fetched()?;
        self.require_parsed()?;

        let stopwords = self.stopwords(&self.language);
        let nlp = &self.collaborators.nlp;

        let mut keywords: Vec<String> = Vec::new();
        let title_keywords = nlp.keywords(&self.title, &stopwords, KEYWORDS_PER_SOURCE);
        let text_keywords = nlp.keywords(&self.text, &stopwords, KEYWORDS_PER_SOURCE);
        for keyword in title_keywords.into_iter().chain(text_keywords) {
            if !keywords.contains(&keyword.word) {
                keywords.push(keyword.word);
            }
        }
        keywords.truncate(self.config.max_keywords);

        let sentences =
            nlp.summarize(&self.title, &self.text, self.config.max_summary_sent, &stopwords);
        let summary = cap_chars(&sentences.join("\n"), self.config.max_summary);

        self.commit_nlp(NlpDelta { keywords, summary });
        Ok(())
    }

    /// Alias of [`nlp`](Self::nlp).
    pub fn analyze(&mut self) -> Result<()> {
        self.nlp()
    }

    fn commit_nlp(&mut self, delta: NlpDelta) {
        tracing::debug!(url = %self.url, keywords = delta.keywords.len(), "nlp done");
        self.keywords = delta.keywords;
        self.summary = delta.summary;
    }

    fn stopwords(&self, language: &str) -> Arc<StopWords> {
        self.config
            .stopwords
            .get(language)
            .or_else(|| self.config.stopwords.get("en"))
            .unwrap_or_else(|| Arc::new(StopWords::from_list(language, "")))
    }

    // === Guards ===

    /// Fails unless the article downloaded successfully.
    pub fn require_fetched(&self) -> Result<()> {
        match self.state {
            ExtractionState::NotStarted => Err(Error::NotDownloaded),
            ExtractionState::FailedFetch => Err(Error::DownloadFailed {
                url: self.url.clone(),
                reason: self.fetch.failure_reason.clone().unwrap_or_default(),
            }),
            ExtractionState::Fetched | ExtractionState::Parsed => Ok(()),
        }
    }

    /// Fails unless the article has been parsed.
    pub fn require_parsed(&self) -> Result<()> {
        if self.state == ExtractionState::Parsed {
            Ok(())
        } else {
            Err(Error::NotParsed)
        }
    }

    // === Validity ===

    /// Whether the URL looks like a news article.
    #[must_use]
    pub fn is_valid_url(&self) -> bool {
        url_utils::valid_url(&self.url)
    }

    /// Whether the parsed body is long enough to be a real article.
    pub fn is_valid_body(&self) -> Result<bool> {
        self.require_parsed()?;

        let words = self.text.split(' ').count();
        let sentences = self.text.split('.').count();

        if self.metadata.meta_type == "article" && words > self.config.min_word_count {
            tracing::debug!(url = %self.url, "valid body: article type and word count");
            return Ok(true);
        }
        let verdict = if !self.is_media_news() && self.text.is_empty() {
            Some("no media and no text")
        } else if self.title.split(' ').count() < 2 {
            Some("title too short")
        } else if words < self.config.min_word_count {
            Some("word count")
        } else if sentences < self.config.min_sent_count {
            Some("sentence count")
        } else if self.fetch.html.is_empty() {
            Some("no html")
        } else {
            None
        };

        match verdict {
            Some(reason) => {
                tracing::debug!(url = %self.url, reason, "invalid body");
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Whether the URL points at a media-heavy page.
    #[must_use]
    pub fn is_media_news(&self) -> bool {
        MEDIA_URL_MARKERS.iter().any(|marker| self.url.contains(marker))
    }

    // === Resources ===

    /// Scratch directory of this article, once parsed.
    #[must_use]
    pub fn resource_path(&self) -> Option<&Path> {
        self.resource_dir.as_deref()
    }

    fn build_resource_path(&mut self) {
        let Some(ref hash) = self.link_hash else {
            return;
        };
        let dir = self
            .config
            .resource_root
            .join(RESOURCE_DIR)
            .join(format!("{hash}_"));
        match std::fs::create_dir_all(&dir) {
            Ok(()) => self.resource_dir = Some(dir),
            Err(err) => {
                tracing::warn!(path = %dir.display(), error = %err, "could not create resource directory");
            }
        }
    }

    /// Remove the scratch directory. Failures are ignored.
    pub fn release_resources(&mut self) {
        if let Some(dir) = self.resource_dir.take() {
            if let Err(err) = std::fs::remove_dir_all(&dir) {
                tracing::debug!(path = %dir.display(), error = %err, "resource cleanup failed");
            }
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current URL; updated by redirects and read-more links.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL as given to the constructor, after normalization.
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn read_more_link(&self) -> &str {
        &self.read_more_link
    }

    #[must_use]
    pub fn state(&self) -> ExtractionState {
        self.state
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.state == ExtractionState::Parsed
    }

    /// Recorded reason of a failed download.
    #[must_use]
    pub fn download_failure(&self) -> Option<&str> {
        self.fetch.failure_reason.as_deref()
    }

    /// Outcome of the download step.
    #[must_use]
    pub fn fetch_result(&self) -> &FetchResult {
        &self.fetch
    }

    /// Raw HTML of the downloaded page.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.fetch.html
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.metadata.authors
    }

    #[must_use]
    pub fn publish_date(&self) -> Option<DateTime<Utc>> {
        self.metadata.publish_date
    }

    /// Body text of the complemented top node.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Body text of the top node of the cleaned document.
    #[must_use]
    pub fn text_cleaned(&self) -> &str {
        &self.text_cleaned
    }

    /// HTML of the complemented top node.
    #[must_use]
    pub fn article_html(&self) -> &str {
        &self.article_html
    }

    #[must_use]
    pub fn top_image(&self) -> &str {
        &self.images.top_image
    }

    #[must_use]
    pub fn meta_image(&self) -> &str {
        &self.images.meta_image
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images.images
    }

    #[must_use]
    pub fn meta_favicon(&self) -> &str {
        &self.images.favicon
    }

    /// Video embed URLs.
    #[must_use]
    pub fn movies(&self) -> Vec<&str> {
        self.videos.iter().map(|v| v.src.as_str()).collect()
    }

    #[must_use]
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Keywords computed by [`nlp`](Self::nlp).
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Keywords declared in `<meta name="keywords">`.
    #[must_use]
    pub fn meta_keywords(&self) -> &[String] {
        &self.metadata.keywords
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.metadata.tags
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn meta_description(&self) -> &str {
        &self.metadata.description
    }

    /// Declared document language, when a stopword lexicon exists for it.
    #[must_use]
    pub fn meta_lang(&self) -> &str {
        &self.meta_lang
    }

    /// Language used for stopwords and NLP.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn meta_site_name(&self) -> &str {
        &self.metadata.site_name
    }

    #[must_use]
    pub fn canonical_link(&self) -> &str {
        &self.metadata.canonical_link
    }

    #[must_use]
    pub fn meta_data(&self) -> &BTreeMap<String, MetaValue> {
        &self.metadata.meta_data
    }

    /// All resolved metadata.
    #[must_use]
    pub fn metadata(&self) -> &ResolvedMetadata {
        &self.metadata
    }

    /// The document as downloaded.
    #[must_use]
    pub fn doc(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// The cleaned working copy.
    #[must_use]
    pub fn clean_doc(&self) -> Option<&Document> {
        self.clean_doc.as_ref()
    }

    #[must_use]
    pub fn top_node(&self) -> Option<&TopNode> {
        self.top_node.as_ref()
    }

    #[must_use]
    pub fn clean_top_node(&self) -> Option<&TopNode> {
        self.clean_top_node.as_ref()
    }

    #[must_use]
    pub fn link_hash(&self) -> Option<&str> {
        self.link_hash.as_deref()
    }

    /// Caller-owned data carried along with the article.
    #[must_use]
    pub fn additional_data(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.additional_data
    }

    pub fn additional_data_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.additional_data
    }

    /// Serializable snapshot of the article.
    #[must_use]
    pub fn to_output(&self) -> ArticleOutput {
        ArticleOutput {
            url: self.url.clone(),
            original_url: self.original_url.clone(),
            source_url: self.source_url.clone(),
            state: self.state,
            download_failure: self.fetch.failure_reason.clone(),
            title: self.title.clone(),
            authors: self.metadata.authors.clone(),
            publish_date: self.metadata.publish_date,
            text: self.text.clone(),
            top_image: self.images.top_image.clone(),
            meta_image: self.images.meta_image.clone(),
            images: self.images.images.clone(),
            movies: self.videos.iter().map(|v| v.src.clone()).collect(),
            keywords: self.keywords.clone(),
            meta_keywords: self.metadata.keywords.clone(),
            tags: self.metadata.tags.clone(),
            summary: self.summary.clone(),
            meta_description: self.metadata.description.clone(),
            meta_lang: self.meta_lang.clone(),
            meta_site_name: self.metadata.site_name.clone(),
            meta_favicon: self.images.favicon.clone(),
            canonical_link: self.metadata.canonical_link.clone(),
            meta_data: self.metadata.meta_data.clone(),
        }
    }
}

impl Drop for Article {
    fn drop(&mut self) {
        self.release_resources();
    }
}

impl fmt::Debug for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Article")
            .field("url", &self.url)
            .field("state", &self.state)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// blake3 of the URL, salted with the current time so two pipelines on
/// the same URL get distinct directories.
fn link_hash(url: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}.{nanos}", blake3::hash(url.as_bytes()).to_hex())
}

/// First `max` characters of `text`.
fn cap_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
