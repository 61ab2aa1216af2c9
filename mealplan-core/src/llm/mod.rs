//! Language-model providers used as an instruction generation backend.
//!
//! Nothing in the quality gate depends on a provider being configured; a
//! provider only comes into play once a caller wires an
//! [`LlmInstructionGenerator`](crate::enhance::LlmInstructionGenerator) into
//! enhancement.

mod claude;
mod fake;

pub use claude::ClaudeProvider;
pub use fake::FakeProvider;
#[cfg(test)]
pub(crate) use fake::SAMPLE_IMPROVED_INSTRUCTIONS;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub const PROVIDER_VAR: &str = "MEALPLAN_GENERATION_PROVIDER";
pub const MODEL_VAR: &str = "MEALPLAN_GENERATION_MODEL";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// A text-completion backend.
///
/// Implementations should be stateless and thread-safe. Timeouts and
/// cancellation are the implementation's own business.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the model's text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name (e.g. "claude", "fake").
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Build a provider from environment variables.
///
/// - `MEALPLAN_GENERATION_PROVIDER`: "claude" (required; there is no default)
/// - `MEALPLAN_GENERATION_MODEL`: model name for the provider
/// - `ANTHROPIC_API_KEY`: API key for Claude
///
/// An unset provider is an error rather than a stand-in, so callers fall back
/// to leaving instructions unchanged.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    create_provider_from_lookup(|var| std::env::var(var).ok())
}

/// Same as [`create_provider_from_env`], reading values through `lookup`.
pub fn create_provider_from_lookup<F>(lookup: F) -> Result<Box<dyn LlmProvider>, LlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = lookup(PROVIDER_VAR).unwrap_or_default();

    match provider.trim().to_lowercase().as_str() {
        "" => Err(LlmError::NotConfigured(format!("{} not set", PROVIDER_VAR))),
        "claude" => {
            let api_key = lookup("ANTHROPIC_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;
            let model = lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string());
            Ok(Box::new(ClaudeProvider::new(api_key, model)))
        }
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_unset_provider_is_not_configured() {
        let result = create_provider_from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(LlmError::NotConfigured(_))));
    }

    #[test]
    fn test_fake_is_not_selectable_from_env() {
        let result = create_provider_from_lookup(lookup_from(&[(PROVIDER_VAR, "fake")]));
        assert!(matches!(result, Err(LlmError::NotConfigured(reason)) if reason.contains("fake")));
    }

    #[test]
    fn test_claude_requires_api_key() {
        let result = create_provider_from_lookup(lookup_from(&[(PROVIDER_VAR, "claude")]));
        assert!(matches!(result, Err(LlmError::NotConfigured(_))));
    }

    #[test]
    fn test_claude_with_key_and_model() {
        let provider = create_provider_from_lookup(lookup_from(&[
            (PROVIDER_VAR, " Claude "),
            ("ANTHROPIC_API_KEY", "sk-test"),
            (MODEL_VAR, "claude-test-model"),
        ]))
        .unwrap();
        assert_eq!(provider.provider_name(), "claude");
        assert_eq!(provider.model_name(), "claude-test-model");
    }
}
