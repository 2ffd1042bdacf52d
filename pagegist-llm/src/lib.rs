//! Chat-completion integration for PageGist.
//!
//! This crate owns the conversation with the remote model: [`prompt`] builds
//! the fixed `[system, user]` message pair from extracted page content, and
//! [`openrouter::OpenRouterClient`] delivers it to an OpenAI-compatible
//! `chat/completions` endpoint behind the [`traits::SummaryClient`] seam.
//!
//! # Examples
//! ```no_run
//! use pagegist_llm::openrouter::OpenRouterClient;
//! use pagegist_llm::prompt::build_summary_prompt;
//! use pagegist_llm::traits::SummaryClient;
//!
//! # async fn demo() -> Result<(), pagegist_llm::traits::SummaryError> {
//! let client = OpenRouterClient::new(
//!     "https://openrouter.ai/api/v1",
//!     "sk-or-...".to_string(),
//!     "deepseek/deepseek-r1:free".to_string(),
//! )?;
//! let messages = build_summary_prompt("Example Domain", "Some page text");
//! let summary = client.summarize(&messages).await?;
//! # let _ = summary;
//! # Ok(())
//! # }
//! ```

pub mod openrouter;
pub mod prompt;
pub mod traits;

pub use openrouter::OpenRouterClient;
pub use prompt::{build_summary_prompt, SYSTEM_PROMPT};
pub use traits::{Message, Role, SummaryClient, SummaryError};
