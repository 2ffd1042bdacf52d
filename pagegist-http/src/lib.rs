//! Minimal HTTP client with safe logging and flexible auth.
//!
//! - Request options: headers, `Auth`, timeout
//! - Never logs secret values; the Authorization header is redacted
//! - One attempt per call: failures surface to the caller unretried
//! - JSON POST for API traffic plus a text GET for page bodies
//! - Optional *raw* request/response logging via `PAGEGIST_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), pagegist_http::HttpError> {
//! let client = pagegist_http::HttpClient::new("https://openrouter.ai/api/v1")?;
//! let page = client
//!     .get_text("https://example.com/", pagegist_http::RequestOpts::default())
//!     .await?;
//! # let _ = page;
//! # Ok(()) }
//! ```
//!
//! Security: `Auth::Bearer` values are sanitized before use, and logs only
//! ever include the auth kind (bearer/none), not the secret.
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), final errors, and
//! (optionally) raw request/response lines (target `http.raw`) when
//! `PAGEGIST_HTTP_RAW=1`.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "PAGEGIST_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in headers.iter() {
        let mut v = val.to_str().unwrap_or("").to_string();
        if name.as_str().eq_ignore_ascii_case("authorization") {
            v = "Bearer <redacted>".into();
        }
        parts.push(format!(
            "-H '{}: {}'",
            name.as_str(),
            v.replace('\'', r"'\''")
        ));
    }
    if let Some(bytes) = body {
        if let Ok(s) = std::str::from_utf8(bytes) {
            let mut s = s.to_string();
            if s.len() > RAW_MAX_BODY {
                s.truncate(floor_char_boundary(&s, RAW_MAX_BODY));
                s.push('…');
            }
            parts.push(format!("-d '{}'", s.replace('\'', r"'\''")));
        } else {
            parts.push(format!("--data-binary @- # ({} bytes)", bytes.len()));
        }
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") {
                val = "Bearer <redacted>".into();
            }
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the HTTP client helpers.
///
/// ```
/// use pagegist_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// match bearer {
///     Auth::Bearer(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    None,
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use pagegist_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(10)),
///     auth: Some(Auth::None),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 10);
/// assert!(opts.allow_absolute == false);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    /// Applied when a request carries no timeout of its own. `None` lets a
    /// request run as long as the server takes, which is what the summary
    /// call wants.
    pub default_timeout: Option<Duration>,
}

impl HttpClient {
    /// Construct a client anchored to a base URL. The base is normalized to
    /// end with `/` so relative paths append instead of replacing the last
    /// segment (`…/api/v1` + `chat/completions` = `…/api/v1/chat/completions`).
    ///
    /// ```no_run
    /// use pagegist_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("https://openrouter.ai/api/v1")?;
    /// assert!(client.default_timeout.is_none());
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let mut base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: None,
        })
    }

    /// Set a client-wide timeout applied to requests that do not carry one.
    ///
    /// ```no_run
    /// use pagegist_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://openrouter.ai/api/v1")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Some(Duration::from_secs(2)));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = Some(dur);
        self
    }

    /// POST JSON using optional Bearer auth and decode the JSON response.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let auth = bearer.map(Auth::Bearer);
        let opts = RequestOpts {
            auth,
            ..Default::default()
        };
        let body_bytes = serde_json::to_vec(body).map_err(|e| HttpError::Build(e.to_string()))?;
        let (bytes, req_id) = self
            .request_bytes(Method::POST, path, Some(body_bytes), opts)
            .await?;
        let snippet = snip_body(&bytes);
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::warn!(
                req_id=%req_id,
                serde_line=%e.line(),
                serde_col=%e.column(),
                serde_err=%e.to_string(),
                body_snippet=%snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(e.to_string(), snippet)
        })
    }

    /// GET a resource and return its body as text. Intended for page bodies;
    /// non-UTF-8 input is replaced lossily rather than rejected.
    pub async fn get_text(&self, path: &str, opts: RequestOpts<'_>) -> Result<String, HttpError> {
        let (bytes, _req_id) = self.request_bytes(Method::GET, path, None, opts).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn resolve_url(&self, path: &str, allow_absolute: bool) -> Result<Url, HttpError> {
        if allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                return Ok(abs);
            }
        }
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    /// Build, send, and police one request. Success returns the body bytes
    /// and the request id used in log events; non-2xx statuses come back as
    /// [`HttpError::Api`]. There is deliberately no retry loop here.
    async fn request_bytes(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        opts: RequestOpts<'_>,
    ) -> Result<(Vec<u8>, String), HttpError> {
        let url = self.resolve_url(path, opts.allow_absolute)?;

        let mut rb = self.inner.request(method.clone(), url.clone());

        let timeout = opts.timeout.or(self.default_timeout);
        if let Some(t) = timeout {
            rb = rb.timeout(t);
        }

        if let Some(bytes) = &body {
            rb = rb
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes.clone());
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        if let Some(auth) = &opts.auth {
            match auth {
                Auth::Bearer(tok) => {
                    let tok = sanitize_api_key(tok)?;
                    rb = rb.bearer_auth(tok);
                }
                Auth::None => {}
            }
        }

        let auth_kind = match &opts.auth {
            Some(Auth::Bearer(_)) => "bearer",
            Some(Auth::None) | None => "none",
        };

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            timeout_ms=?timeout.map(|t| t.as_millis() as u64),
            auth_kind,
            has_body=%body.is_some(),
            "http.request.start"
        );

        if raw_enabled() {
            // Merge only caller-provided headers (auth header will be redacted anyway)
            let mut merged = HeaderMap::new();
            if let Some(h) = &opts.headers {
                for (k, v) in h.iter() {
                    merged.append(k, v.clone());
                }
            }
            let curl = make_curl(&method, &url, &merged, body.as_deref());
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        let t0 = std::time::Instant::now();
        let resp = match rb.send().await {
            Ok(resp) => resp,
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    req_id=%req_id,
                    message=%message,
                    "http.network_error.send"
                );
                return Err(HttpError::Network(message));
            }
        };
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = match resp.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    req_id=%req_id,
                    message=%message,
                    "http.network_error.body"
                );
                return Err(HttpError::Network(message));
            }
        };
        let dur_ms = t0.elapsed().as_millis() as u64;

        // Response header diagnostics
        let req_hdr_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        let limit = headers.get("x-ratelimit-limit").and_then(|v| v.to_str().ok());
        let remain = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok());
        let reset = headers.get("x-ratelimit-reset").and_then(|v| v.to_str().ok());

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            x_request_id=%req_hdr_id,
            rate_limit.limit=?limit,
            rate_limit.remaining=?remain,
            rate_limit.reset=?reset,
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let mut body_snip = bytes.to_vec();
            let truncated = body_snip.len() > RAW_MAX_BODY;
            if truncated {
                body_snip.truncate(RAW_MAX_BODY);
            }
            let text = String::from_utf8_lossy(&body_snip);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        let snippet = snip_body(&bytes);
        tracing::trace!(
            req_id=%req_id,
            body_snippet=%snippet,
            "http.response.body_snippet"
        );

        if status.is_success() {
            return Ok((bytes.to_vec(), req_id));
        }

        let message = extract_error_message(&bytes);
        let request_id = req_hdr_id.to_string();
        tracing::warn!(
            req_id=%req_id,
            %status,
            message=%message,
            x_request_id=%request_id,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api {
            status,
            message,
            request_id,
        })
    }
}

// ==============================
// Helpers
// ==============================

fn extract_error_message(body: &[u8]) -> String {
    // OpenAI style: {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct OpenAiEnv {
        error: OpenAiDetail,
    }
    #[derive(Deserialize)]
    struct OpenAiDetail {
        message: String,
    }

    // Generic: {"message":"..."} or {"detail":"..."} or {"error":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<OpenAiEnv>(body) {
        return env.error.message;
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        // Page bodies are routinely multibyte; never cut inside a char.
        snip.truncate(floor_char_boundary(&snip, 500));
        snip.push_str("...");
    }
    snip
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    // 1) Trim outer spaces/quotes
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    // 2) Remove *all* ASCII whitespace (spaces, tabs, newlines, carriage returns)
    s.retain(|ch| !ch.is_ascii_whitespace());

    // 3) Ensure ASCII and no control chars
    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // 4) Validate header value upfront for clear errors
    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}
