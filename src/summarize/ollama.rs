//! Minimal blocking client for the Ollama chat API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default Ollama endpoint.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Blocking HTTP client for `POST {host}/api/chat`.
pub struct OllamaClient {
    client: reqwest::blocking::Client,
    host: String,
}

impl OllamaClient {
    /// Create a client for the given host, e.g. `http://localhost:11434`.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        // Model generation routinely exceeds reqwest's default timeout
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// Send a non-streaming chat request and return the assistant reply.
    pub fn chat(&self, model: &str, messages: &[ChatMessage], num_predict: u32) -> Result<String> {
        let url = format!("{}/api/chat", self.host.trim_end_matches('/'));
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            options: ChatOptions { num_predict },
        };

        let response: ChatResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_body() {
        let messages = vec![
            ChatMessage::system("You summarize books."),
            ChatMessage::user("Chapter text here."),
        ];
        let request = ChatRequest {
            model: "llama3.2",
            messages: &messages,
            stream: false,
            options: ChatOptions { num_predict: 512 },
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_predict"], 512);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Chapter text here.");
    }

    #[test]
    fn test_chat_response_parsing() {
        let body = r#"{
            "model": "llama3.2",
            "created_at": "2025-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "A fine summary."},
            "done": true
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.message.content, "A fine summary.");
    }
}
