use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Who a chat message speaks as. The remote model treats system and user
/// instructions differently, so role order in a prompt is load bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged chat message, serialized as `{"role": "...", "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A failed summary call. The caller renders this and moves on; nothing here
/// is retried and there is no fallback model.
#[derive(thiserror::Error, Debug)]
pub enum SummaryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Seam between the pipeline and the remote chat-completion provider. The
/// production implementation is [`crate::openrouter::OpenRouterClient`];
/// tests inject fakes through this trait.
#[async_trait]
pub trait SummaryClient: Send + Sync {
    /// Send the composed messages and return the first choice's text.
    /// One attempt per call.
    async fn summarize(&self, messages: &[Message]) -> Result<String, SummaryError>;

    /// Get the model identifier sent with each request
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = Message::system("be brief");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");

        let user = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(user["role"], "user");
    }
}
