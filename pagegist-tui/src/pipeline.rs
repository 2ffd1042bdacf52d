//! One summary run: fetch, extract, prompt, model call.
//!
//! The stages live in their own crates; this module only sequences them and
//! unions their errors. Nothing is retried or cached, so a failed stage
//! aborts the run and its error travels back to the transcript as-is.

use std::sync::Arc;

use pagegist_http::HttpClient;
use pagegist_llm::{SummaryClient, SummaryError, build_summary_prompt};
use pagegist_web::{ExtractionError, FetchError, extract_content, fetch_page};
use thiserror::Error;

/// Union of the stage failures for one run. Which prefix the user sees is
/// the presenter's decision, so variants stay transparent here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractionError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// The fetch, extract, summarize sequence with its two remote dependencies
/// injected. Shared by `Arc` into the worker task for each run.
pub struct Pipeline {
    http: HttpClient,
    summarizer: Arc<dyn SummaryClient>,
}

impl Pipeline {
    pub fn new(http: HttpClient, summarizer: Arc<dyn SummaryClient>) -> Self {
        Self { http, summarizer }
    }

    /// Run the whole pipeline for one URL and return the summary markdown.
    pub async fn summarize_url(&self, url: &str) -> Result<String, PipelineError> {
        let html = fetch_page(&self.http, url).await?;
        let page = extract_content(url, &html)?;
        tracing::debug!(
            url,
            title = %page.title,
            body_len = page.body.len(),
            "pipeline.extracted"
        );

        let messages = build_summary_prompt(&page.title, &page.body);
        let summary = self.summarizer.summarize(&messages).await?;
        tracing::info!(url, summary_len = summary.len(), "pipeline.ok");
        Ok(summary)
    }
}
