//! Deterministic provider for tests.
//!
//! Only answers prompts it was explicitly given responses for; it is never
//! picked up from environment configuration.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::RwLock;

/// A set of improved steps that passes both quality policies.
#[cfg(test)]
pub const SAMPLE_IMPROVED_INSTRUCTIONS: &str = r#"[
  "Preheat the oven to 375°F and set a rack in the middle position.",
  "Pat the chicken breasts dry, then season both sides generously with salt and pepper.",
  "Heat a tablespoon of olive oil in a large oven-safe skillet over medium-high heat.",
  "Sear the chicken for 5 minutes per side until a golden crust forms.",
  "Transfer the skillet to the oven and bake for 15 minutes.",
  "Check that the thickest part of each breast reads 165°F on a thermometer.",
  "Let the chicken rest for 5 minutes on a cutting board before slicing."
]"#;

/// A fake provider that answers by prompt substring.
///
/// Patterns are checked in the order they were added, case-insensitively. If
/// nothing matches, the default response is returned, or an error when there
/// is none.
#[derive(Debug, Default)]
pub struct FakeProvider {
    responses: RwLock<Vec<(String, String)>>,
    default_response: Option<String>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing `prompt_contains`.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        let mut responses = match self.responses.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        responses.push((prompt_contains.to_lowercase(), response.to_string()));
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Provider that answers instruction prompts with [`SAMPLE_IMPROVED_INSTRUCTIONS`].
    #[cfg(test)]
    pub fn with_instruction_responses() -> Self {
        Self::with_response("instructions", SAMPLE_IMPROVED_INSTRUCTIONS)
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let prompt_lower = prompt.to_lowercase();
        let matched = {
            let responses = match self.responses.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            responses
                .iter()
                .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
        };

        if let Some(response) = matched.or_else(|| self.default_response.clone()) {
            return Ok(response);
        }

        let preview: String = prompt.chars().take(100).collect();
        Err(LlmError::RequestFailed(format!(
            "FakeProvider: No response configured for prompt (first 100 chars): {}",
            preview
        )))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        let provider = FakeProvider::with_response("STEPS", "ok");
        assert_eq!(provider.complete("rewrite these steps").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_first_added_pattern_wins() {
        let provider = FakeProvider::new();
        provider.add_response("recipe", "first");
        provider.add_response("recipe instructions", "second");
        let result = provider.complete("Improve the recipe instructions").await.unwrap();
        assert_eq!(result, "first");
    }

    #[tokio::test]
    async fn test_no_match_without_default() {
        let provider = FakeProvider::new();
        assert!(matches!(
            provider.complete("anything").await,
            Err(LlmError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_default_response() {
        let provider = FakeProvider::new().with_default_response("[]");
        assert_eq!(provider.complete("anything").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_instruction_responses_are_json_steps() {
        let provider = FakeProvider::with_instruction_responses();
        let reply = provider
            .complete("Rewrite these recipe instructions")
            .await
            .unwrap();
        let steps: Vec<String> = serde_json::from_str(&reply).unwrap();
        assert_eq!(steps.len(), 7);
    }
}
