//! Configuration for the article pipeline.
//!
//! `Config` is read-only to the pipeline: the controller and its
//! collaborators consult it but never write back into it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::nlp::StopwordCache;

/// Default browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) rs-newspaper/0.1";

/// Credentials attached to outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic authentication.
    Basic { username: String, password: Option<String> },
    /// `Authorization: Bearer <token>`.
    Bearer(String),
}

/// Parameters handed to the network collaborator for every request.
///
/// Per-request parameters (`headers`, `cookies`, `auth`, `timeout`) are
/// applied on each call. Client-level parameters (`allow_redirects`,
/// `proxy`, `verify`, `cert`, `user_agent`) are applied when the HTTP
/// client is built.
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// Extra request headers.
    ///
    /// Default: empty
    pub headers: BTreeMap<String, String>,

    /// Cookies sent as a single `Cookie` header.
    ///
    /// Default: empty
    pub cookies: BTreeMap<String, String>,

    /// Optional credentials.
    ///
    /// Default: `None`
    pub auth: Option<Auth>,

    /// Total time allowed for one request.
    ///
    /// Default: 7 seconds
    pub timeout: Duration,

    /// Follow HTTP 3xx redirects.
    ///
    /// Default: `true`
    pub allow_redirects: bool,

    /// Proxy URL applied to all schemes.
    ///
    /// Default: `None`
    pub proxy: Option<String>,

    /// Verify TLS certificates.
    ///
    /// Default: `true`
    pub verify: bool,

    /// Path to a PEM file holding a client certificate and private key.
    ///
    /// Default: `None`
    pub cert: Option<PathBuf>,

    /// `User-Agent` header value.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            auth: None,
            timeout: Duration::from_secs(7),
            allow_redirects: true,
            proxy: None,
            verify: true,
            cert: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Configuration for the article pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::Config;
///
/// let config = Config {
///     language: "de".to_string(),
///     max_summary_sent: 3,
///     ..Config::default()
/// };
/// assert!(config.use_meta_language);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Config {
    /// Two-letter language code used for stopwords and NLP.
    ///
    /// Default: `"en"`
    pub language: String,

    /// Replace `language` with the document's declared language when the
    /// stopword cache knows it.
    ///
    /// Default: `true`
    pub use_meta_language: bool,

    /// Follow one `<meta http-equiv="refresh">` hop after downloading.
    ///
    /// Default: `true`
    pub follow_meta_refresh: bool,

    /// Maximum title length in characters.
    ///
    /// Default: `200`
    pub max_title: usize,

    /// Maximum body text length in characters.
    ///
    /// Default: `100_000`
    pub max_text: usize,

    /// Maximum number of keywords kept by `nlp()`.
    ///
    /// Default: `35`
    pub max_keywords: usize,

    /// Maximum number of authors kept.
    ///
    /// Default: `10`
    pub max_authors: usize,

    /// Maximum summary length in characters.
    ///
    /// Default: `5_000`
    pub max_summary: usize,

    /// Maximum number of sentences in the summary.
    ///
    /// Default: `5`
    pub max_summary_sent: usize,

    /// Minimum body word count for `is_valid_body()`.
    ///
    /// Default: `300`
    pub min_word_count: usize,

    /// Minimum body sentence count for `is_valid_body()`.
    ///
    /// Default: `7`
    pub min_sent_count: usize,

    /// Enable debug-level logging in the CLI.
    ///
    /// Default: `false`
    pub verbose: bool,

    /// Root under which per-article scratch directories are created.
    ///
    /// Default: `<os temp dir>/rs-newspaper`
    pub resource_root: PathBuf,

    /// Network request parameters.
    pub request: RequestParams,

    /// Shared stopword cache.
    ///
    /// Default: [`StopwordCache::shared()`]
    pub stopwords: Arc<StopwordCache>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            use_meta_language: true,
            follow_meta_refresh: true,
            max_title: 200,
            max_text: 100_000,
            max_keywords: 35,
            max_authors: 10,
            max_summary: 5_000,
            max_summary_sent: 5,
            min_word_count: 300,
            min_sent_count: 7,
            verbose: false,
            resource_root: std::env::temp_dir().join("rs-newspaper"),
            request: RequestParams::default(),
            stopwords: StopwordCache::shared(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_limits() {
        let config = Config::default();

        assert_eq!(config.language, "en");
        assert!(config.use_meta_language);
        assert!(config.follow_meta_refresh);
        assert_eq!(config.max_title, 200);
        assert_eq!(config.max_text, 100_000);
        assert_eq!(config.max_keywords, 35);
        assert_eq!(config.max_authors, 10);
        assert_eq!(config.max_summary, 5_000);
        assert_eq!(config.max_summary_sent, 5);
        assert_eq!(config.min_word_count, 300);
        assert_eq!(config.min_sent_count, 7);
        assert!(!config.verbose);
    }

    #[test]
    fn test_default_request_params() {
        let params = RequestParams::default();

        assert!(params.headers.is_empty());
        assert!(params.cookies.is_empty());
        assert!(params.auth.is_none());
        assert_eq!(params.timeout, Duration::from_secs(7));
        assert!(params.allow_redirects);
        assert!(params.proxy.is_none());
        assert!(params.verify);
        assert!(params.cert.is_none());
        assert_eq!(params.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_default_configs_share_one_stopword_cache() {
        let a = Config::default();
        let b = Config::default();
        assert!(Arc::ptr_eq(&a.stopwords, &b.stopwords));
    }

    #[test]
    fn test_struct_update_keeps_other_defaults() {
        let config = Config {
            max_title: 20,
            follow_meta_refresh: false,
            ..Config::default()
        };

        assert_eq!(config.max_title, 20);
        assert!(!config.follow_meta_refresh);
        assert_eq!(config.max_text, 100_000);
    }
}
