//! Network collaborator.
//!
//! The Loader talks to the network only through [`Fetcher`], so tests and
//! callers can substitute their own transport. [`HttpFetcher`] is the
//! default, built on `reqwest`'s blocking client. Every call is a single
//! attempt: no retries, no backoff.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::redirect::Policy;

use crate::config::{Auth, RequestParams};
use crate::encoding;
use crate::error::{Error, Result};

/// Maximum number of HTTP redirects followed when redirects are enabled.
const MAX_REDIRECTS: usize = 10;

/// A response as seen by the Loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Decoded body.
    pub body: String,
    /// HTTP status code.
    pub status: u16,
    /// URL after transport-level redirects.
    pub final_url: String,
}

/// Transport-level failure (DNS, TLS, timeout, connection reset, ...).
///
/// Displays as the transport's own message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Network collaborator used by the Loader.
pub trait Fetcher: Send + Sync {
    /// GET `url` with the caller's request parameters.
    ///
    /// Non-2xx responses are returned as `Ok`; the Loader decides what a
    /// failure is.
    fn get(&self, url: &str, params: &RequestParams) -> std::result::Result<HttpResponse, TransportError>;

    /// GET `url` without per-request parameters and return the body.
    ///
    /// Used for meta-refresh targets. Responses with status >= 400 are errors.
    fn get_raw(&self, url: &str) -> std::result::Result<String, TransportError>;
}

/// Default [`Fetcher`] over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client from the client-level request parameters
    /// (redirects, proxy, TLS verification, client certificate, user agent).
    pub fn new(params: &RequestParams) -> Result<Self> {
        let redirect = if params.allow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .user_agent(params.user_agent.clone())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(redirect)
            .timeout(params.timeout)
            .danger_accept_invalid_certs(!params.verify);

        if let Some(ref proxy) = params.proxy {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| Error::Network(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        if let Some(ref cert) = params.cert {
            let pem = std::fs::read(cert)?;
            let identity =
                reqwest::Identity::from_pem(&pem).map_err(|e| Error::Network(e.to_string()))?;
            builder = builder.identity(identity);
        }

        let client = builder.build().map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { client })
    }

    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let response = request.send().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            body: encoding::decode_html(&bytes, content_type.as_deref()),
            status,
            final_url,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, params: &RequestParams) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!(url, timeout = ?params.timeout, "GET");

        let mut request = self
            .client
            .get(url)
            .headers(request_headers(params))
            .timeout(params.timeout);

        match params.auth {
            Some(Auth::Basic { ref username, ref password }) => {
                request = request.basic_auth(username, password.as_ref());
            }
            Some(Auth::Bearer(ref token)) => request = request.bearer_auth(token),
            None => {}
        }

        self.send(request)
    }

    fn get_raw(&self, url: &str) -> std::result::Result<String, TransportError> {
        tracing::debug!(url, "GET (raw)");
        let response = self.send(self.client.get(url))?;
        if response.status >= 400 {
            return Err(TransportError(format!(
                "Status code {} for url {url}",
                response.status
            )));
        }
        Ok(response.body)
    }
}

/// Header map for one request: caller headers plus a `Cookie` header.
fn request_headers(params: &RequestParams) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in &params.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "skipping invalid request header"),
        }
    }

    if !params.cookies.is_empty() {
        let cookie = params
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.insert(COOKIE, value);
        }
    }

    headers
}

/// Timeout helper for callers that configure fetchers from seconds.
#[must_use]
pub fn timeout_from_secs(secs: f64) -> Duration {
    Duration::from_secs_f64(secs.max(0.0))
}
