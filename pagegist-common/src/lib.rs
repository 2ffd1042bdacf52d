//! Common types and utilities shared across PageGist crates.
//!
//! This crate holds the pieces every other crate needs without pulling in
//! heavy transitive costs: the shared error type for process bootstrap and
//! the centralised tracing/logging initialisation.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`PagegistError`] and [`Result`]: Shared error handling for bootstrap
//!   paths (the pipeline stages carry their own error enums)

pub mod observability;

/// Errors raised by shared infrastructure (logging setup, path resolution).
///
/// Stage-specific failures (`FetchError`, `ExtractionError`, `SummaryError`,
/// `ConfigError`) live in the crates that own those stages; this type only
/// covers what `pagegist-common` itself does.
#[derive(thiserror::Error, Debug)]
pub enum PagegistError {
    /// Filesystem work during bootstrap failed (e.g. creating the log dir).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The global tracing subscriber could not be installed.
    #[error("tracing setup failed: {0}")]
    Subscriber(String),
}

/// Convenient alias for results that use [`PagegistError`].
pub type Result<T> = std::result::Result<T, PagegistError>;
