//! Chat completion client
//!
//! Sends the question to an OpenAI-compatible chat endpoint and
//! extracts the assistant reply.

use crate::storage::settings::GptSettings;
use crate::types::{Message, Role};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const CHAT_TIMEOUT: Duration = Duration::from_secs(30);
const TEMPERATURE: f64 = 0.7;

/// System prompt sent ahead of every question
const SYSTEM_PROMPT: &str =
    "You are a quiz assistant. Answer the question directly, concisely, and accurately.";

/// Chat errors
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat endpoint is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Http {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("chat service error: {0}")]
    Service(String),
    #[error("failed to get answer")]
    NoAnswer,
    #[error("unexpected response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Build the two-message exchange for a single question
pub fn build_exchange(question: &str) -> Vec<Message> {
    vec![
        Message::new(Role::System, SYSTEM_PROMPT),
        Message::new(Role::User, question),
    ]
}

/// Send messages to the configured endpoint and return the reply text
pub async fn ask(settings: &GptSettings, messages: &[Message]) -> Result<String, ChatError> {
    if settings.api_url.trim().is_empty() || settings.api_key.trim().is_empty() {
        return Err(ChatError::NotConfigured);
    }

    let request = ChatRequest {
        model: settings.model.clone(),
        messages: messages.iter().map(WireMessage::from).collect(),
        temperature: TEMPERATURE,
    };

    let client = reqwest::Client::builder().timeout(CHAT_TIMEOUT).build()?;

    let response = client
        .post(&settings.api_url)
        .bearer_auth(&settings.api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!("Chat request failed with status {}", status);
        return Err(ChatError::Http {
            status,
            message: body,
        });
    }

    parse_completion(&body)
}

fn parse_completion(body: &str) -> Result<String, ChatError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;

    if let Some(error) = parsed.error {
        return Err(ChatError::Service(error.message));
    }

    parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ChatError::NoAnswer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_exchange_has_system_then_user() {
        let messages = build_exchange("What year did the war end?");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What year did the war end?");
    }

    #[test]
    fn test_request_body_shape() {
        let settings = GptSettings::default();
        let request = ChatRequest {
            model: settings.model,
            messages: build_exchange("hi").iter().map(WireMessage::from).collect(),
            temperature: TEMPERATURE,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_parse_completion_extracts_reply() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  1945  "}}
            ]
        }"#;

        assert_eq!(parse_completion(body).unwrap(), "1945");
    }

    #[test]
    fn test_parse_completion_empty_choices_is_no_answer() {
        let body = r#"{"id": "chatcmpl-2", "choices": []}"#;
        assert!(matches!(parse_completion(body), Err(ChatError::NoAnswer)));
    }

    #[test]
    fn test_parse_completion_missing_choices_is_no_answer() {
        let body = r#"{"id": "chatcmpl-3"}"#;
        assert!(matches!(parse_completion(body), Err(ChatError::NoAnswer)));
    }

    #[test]
    fn test_parse_completion_blank_content_is_no_answer() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "   "}}]}"#;
        assert!(matches!(parse_completion(body), Err(ChatError::NoAnswer)));
    }

    #[test]
    fn test_parse_completion_reports_api_error() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "rate_limit_error"}}"#;

        match parse_completion(body) {
            Err(ChatError::Service(message)) => assert!(message.contains("Rate limit")),
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_answer_message_text() {
        assert_eq!(ChatError::NoAnswer.to_string(), "failed to get answer");
    }
}
