use crate::traits::{Message, SummaryClient, SummaryError};
use async_trait::async_trait;
use pagegist_http::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client for an OpenAI-compatible `chat/completions` endpoint. Built for
/// OpenRouter but happy with any gateway speaking the same dialect; the base
/// URL comes from configuration rather than a constant.
pub struct OpenRouterClient {
    client: HttpClient,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    /// Either a plain string or an array of typed parts, depending on the
    /// provider behind the gateway.
    #[serde(default)]
    content: Value,
}

impl OpenRouterClient {
    /// Create a client for the given endpoint base, credential, and model.
    /// No timeout is installed: the summary call runs as long as the model
    /// takes, per the pipeline's one-attempt contract.
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self, SummaryError> {
        let client = HttpClient::new(base_url)
            .map_err(|e| SummaryError::Config(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl SummaryClient for OpenRouterClient {
    async fn summarize(&self, messages: &[Message]) -> Result<String, SummaryError> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        tracing::info!(model = %self.model, messages = messages.len(), "llm.request.start");

        let resp: ChatCompletionResponse = match self
            .client
            .post_json("chat/completions", Some(&self.api_key), &req)
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let mapped = http_to_summary(e);
                tracing::warn!(model = %self.model, error = %mapped, "llm.error");
                return Err(mapped);
            }
        };

        let text = match resp.choices.first().and_then(|c| content_text(&c.message.content)) {
            Some(text) => text,
            None => {
                let err = SummaryError::Malformed("no message text in first choice".to_string());
                tracing::warn!(model = %self.model, error = %err, "llm.error");
                return Err(err);
            }
        };

        tracing::info!(
            model = %resp.model.as_deref().unwrap_or(&self.model),
            text_len = text.len(),
            "llm.request.ok"
        );
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Pull the assistant text out of a `message.content` value. Providers
/// answer with either a bare string or `[{"type":"text","text":"..."}]`
/// parts; both shapes collapse to one string here.
fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(parts) => {
            let joined: String = parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect();
            if joined.is_empty() { None } else { Some(joined) }
        }
        _ => None,
    }
}

fn http_to_summary(e: HttpError) -> SummaryError {
    match e {
        HttpError::Network(m) => SummaryError::Network(m),
        HttpError::Decode(m, snippet) => {
            SummaryError::Malformed(format!("{m}, body_snippet: {snippet}"))
        }
        HttpError::Api { .. } => SummaryError::Api(e.to_string()),
        HttpError::Url(m) | HttpError::Build(m) => SummaryError::Config(m),
    }
}
