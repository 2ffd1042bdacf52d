//! Page acquisition and readable-text extraction.
//!
//! - [`fetch`]: one bounded HTTP GET per page with a browser-like
//!   `User-Agent`, no retries
//! - [`extract`]: DOM parse of the fetched HTML into a title and a
//!   flattened text body, with non-readable subtrees pruned
//!
//! Fetching talks to the shared `pagegist-http` client; extraction is pure
//! and deterministic, so the same HTML always yields the same
//! [`PageContent`].

pub mod extract;
pub mod fetch;

pub use extract::{extract_content, ExtractionError, PageContent, NO_TITLE_PLACEHOLDER};
pub use fetch::{fetch_page, FetchError, FETCH_TIMEOUT, USER_AGENT};
