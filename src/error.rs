//! Error types for rs-newspaper.
//!
//! Fetch failures are not errors: they are recorded on the [`FetchResult`]
//! and only surface here when a later pipeline stage is invoked on an
//! article whose download failed.
//!
//! [`FetchResult`]: crate::FetchResult

/// Error type for article pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The article URL could not be parsed or uses an unsupported scheme.
    #[error("invalid article URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// `parse()` or `nlp()` was called before `download()`.
    #[error("You must `download()` an article first!")]
    NotDownloaded,

    /// `download()` ran but failed; the recorded reason is carried along.
    #[error("Article `download()` failed with {reason} on URL {url}")]
    DownloadFailed { url: String, reason: String },

    /// `nlp()` was called before a successful `parse()`.
    #[error("You must `parse()` an article first!")]
    NotParsed,

    /// The HTTP client could not be constructed from the request parameters.
    #[error("HTTP client setup failed: {0}")]
    Network(String),

    /// Filesystem failure outside of the fetch path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
