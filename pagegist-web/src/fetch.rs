//! Single-shot page retrieval.
//!
//! One GET per user action: a failure here aborts the whole pipeline run and
//! is rendered to the user as-is. Timeouts and status policing happen in the
//! shared HTTP client; this module owns the browser identity and the mapping
//! into [`FetchError`].

use std::time::Duration;

use pagegist_http::{HttpClient, HttpError, RequestOpts};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use thiserror::Error;

/// Identify as a common desktop browser; plenty of sites serve bots an
/// empty shell or a 403 otherwise.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Bound on the whole page request. The summary call later in the pipeline
/// deliberately has no such bound.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure to retrieve a page. Shown to the user verbatim after an
/// `Error fetching URL:` prefix, so messages stay human-readable.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The input could not be used as an absolute http(s) URL.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// DNS, connect, timeout, or mid-body transport failure.
    #[error("could not reach {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Fetch one page and return its decoded body text.
///
/// The URL must be absolute with an http(s) scheme; anything else fails
/// before any network traffic. Non-2xx statuses are errors, never content.
pub async fn fetch_page(client: &HttpClient, url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl {
            url: url.to_string(),
            message: format!("unsupported scheme \"{}\"", parsed.scheme()),
        });
    }

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    let opts = RequestOpts {
        timeout: Some(FETCH_TIMEOUT),
        headers: Some(headers),
        allow_absolute: true,
        ..Default::default()
    };

    tracing::info!(url = %parsed, "fetch.start");
    match client.get_text(parsed.as_str(), opts).await {
        Ok(body) => {
            tracing::info!(url = %parsed, body_len = body.len(), "fetch.ok");
            Ok(body)
        }
        Err(e) => {
            let mapped = map_http_error(parsed.as_str(), e);
            tracing::warn!(url = %parsed, error = %mapped, "fetch.error");
            Err(mapped)
        }
    }
}

fn map_http_error(url: &str, e: HttpError) -> FetchError {
    match e {
        HttpError::Url(message) | HttpError::Build(message) => FetchError::InvalidUrl {
            url: url.to_string(),
            message,
        },
        HttpError::Network(message) => FetchError::Network {
            url: url.to_string(),
            message,
        },
        // get_text never decodes JSON, but the mapping stays total.
        HttpError::Decode(message, _) => FetchError::Network {
            url: url.to_string(),
            message,
        },
        HttpError::Api { status, .. } => FetchError::Status {
            url: url.to_string(),
            status,
        },
    }
}
