use super::{ApiError, api_base_url, execute};
use crate::session;
use crate::types::ChatReply;
use serde::Serialize;

/// Client for the assistant endpoint
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<i64>,
    message: &'a str,
}

impl ChatClient {
    pub fn new() -> Self {
        Self::with_base_url(api_base_url())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one message to the assistant.
    ///
    /// Token resolution is explicit-first, stored-session second. With no
    /// token anywhere this fails before touching the network.
    pub async fn send(
        &self,
        user_id: i64,
        message: &str,
        conversation_id: Option<i64>,
        token: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        let token = match token.map(str::to_string).or_else(session::stored_token) {
            Some(token) => token,
            None => return Err(ApiError::MissingToken),
        };

        let url = format!("{}/api/{}/chat", self.base_url, user_id);
        let body = execute(
            self.client
                .post(&url)
                .bearer_auth(token)
                .json(&ChatRequest {
                    conversation_id,
                    message,
                }),
        )
        .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_absent_conversation_id() {
        let body = serde_json::to_string(&ChatRequest {
            conversation_id: None,
            message: "add a task to buy groceries",
        })
        .expect("serialize");
        assert_eq!(body, r#"{"message":"add a task to buy groceries"}"#);
    }

    #[test]
    fn test_request_keeps_conversation_id() {
        let body = serde_json::to_string(&ChatRequest {
            conversation_id: Some(12),
            message: "show me my tasks",
        })
        .expect("serialize");
        assert!(body.contains(r#""conversation_id":12"#));
    }

    // MissingToken instead of a transport error proves the send bailed out
    // before building a request; nothing is listening on the backend port
    // while tests run.
    #[tokio::test]
    async fn test_send_without_any_token_fails_before_the_request() {
        session::clear_session();

        let client = ChatClient::new();
        let err = client
            .send(1, "add a task to buy milk", None, None)
            .await
            .expect_err("send without a token");
        assert!(matches!(err, ApiError::MissingToken));
    }
}
