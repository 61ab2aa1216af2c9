//! Claude (Anthropic) provider.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

/// Instruction rewrites should stay close to the source recipe.
const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug)]
pub struct ClaudeProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the first text block out of a Messages API body.
fn extract_text(body: &str) -> Result<String, LlmError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    response
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .find_map(|block| block.text)
        .ok_or_else(|| LlmError::ParseError("No text content in response".to_string()))
}

fn api_error(status: u16, body: String) -> LlmError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => LlmError::ApiError {
            status,
            message: parsed.error.message,
        },
        Err(_) => LlmError::ApiError {
            status,
            message: body,
        },
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited { retry_after_secs });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(api_error(status, body));
        }

        extract_text(&body)
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_skips_non_text_blocks() {
        let body = r#"{"content": [
            {"type": "thinking", "text": null},
            {"type": "text", "text": "[\"Step one\"]"}
        ]}"#;
        assert_eq!(extract_text(body).unwrap(), "[\"Step one\"]");
    }

    #[test]
    fn test_extract_text_without_text_block() {
        let body = r#"{"content": []}"#;
        assert!(matches!(extract_text(body), Err(LlmError::ParseError(_))));
    }

    #[test]
    fn test_api_error_uses_message_when_present() {
        let err = api_error(
            400,
            r#"{"error": {"type": "invalid_request_error", "message": "bad model"}}"#.to_string(),
        );
        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad model");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_body() {
        let err = api_error(502, "Bad Gateway".to_string());
        assert!(matches!(err, LlmError::ApiError { status: 502, message } if message == "Bad Gateway"));
    }
}
