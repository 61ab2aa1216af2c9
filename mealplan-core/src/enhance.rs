//! Enhancement hook for instructions that fail the quality gate.
//!
//! Enhancement never writes recipe text itself. Without a generator it hands
//! the instructions back unchanged. With one, it asks the generator once for a
//! replacement sequence and leaves retry decisions to the caller (see
//! [`QualityGate`](crate::gate::QualityGate)).

use async_trait::async_trait;
use std::fmt;

use crate::error::EnhanceError;
use crate::llm::LlmProvider;
use crate::prompts::improve_instructions::{
    parse_improved_instructions, render_improve_instructions_prompt,
    IMPROVE_INSTRUCTIONS_PROMPT_NAME,
};
use crate::quality::{InstructionQualityValidator, QualityCriteria};
use crate::types::RecipeContext;

/// A backend that can produce replacement instructions.
///
/// Called at most once per enhancement request; timeouts and cancellation are
/// the implementation's responsibility.
#[async_trait]
pub trait InstructionGenerator: Send + Sync + fmt::Debug {
    /// Produce a new instruction sequence addressing `issues`.
    async fn regenerate(
        &self,
        instructions: &[String],
        issues: &[String],
        context: Option<&RecipeContext>,
    ) -> Result<Vec<String>, EnhanceError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Generator that prompts a language model to rewrite the steps.
#[derive(Debug)]
pub struct LlmInstructionGenerator {
    provider: Box<dyn LlmProvider>,
    criteria: QualityCriteria,
}

impl LlmInstructionGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider,
            criteria: QualityCriteria::default(),
        }
    }

    /// Describe these criteria to the model instead of the strict defaults.
    pub fn with_criteria(mut self, criteria: QualityCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}

#[async_trait]
impl InstructionGenerator for LlmInstructionGenerator {
    async fn regenerate(
        &self,
        instructions: &[String],
        issues: &[String],
        context: Option<&RecipeContext>,
    ) -> Result<Vec<String>, EnhanceError> {
        let prompt =
            render_improve_instructions_prompt(instructions, issues, context, &self.criteria);
        tracing::debug!(
            prompt = IMPROVE_INSTRUCTIONS_PROMPT_NAME,
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            "Requesting instruction rewrite"
        );
        let response = self.provider.complete(&prompt).await?;
        parse_improved_instructions(&response)
    }

    fn name(&self) -> &str {
        self.provider.provider_name()
    }
}

impl InstructionQualityValidator {
    /// Return instructions for display.
    ///
    /// No generation backend is wired in here, so failing instructions are
    /// passed through unchanged after their issue count is logged. Use
    /// [`enhance_with`](Self::enhance_with) to request a rewrite.
    pub fn enhance(
        &self,
        instructions: Vec<String>,
        context: Option<&RecipeContext>,
    ) -> Vec<String> {
        let verdict = self.validate(&instructions);
        if !verdict.is_valid {
            tracing::info!(
                issue_count = verdict.issue_count(),
                recipe = context.and_then(|c| c.name.as_deref()).unwrap_or(""),
                "Instructions failed quality check; no generator configured, returning unchanged"
            );
        }
        instructions
    }

    /// Like [`enhance`](Self::enhance), but asks `generator` for a rewrite
    /// when the instructions fail validation.
    ///
    /// Makes exactly one generator call for failing input and none for
    /// passing input. The rewrite is returned as-is; validating it again is
    /// up to the caller.
    pub async fn enhance_with(
        &self,
        generator: &dyn InstructionGenerator,
        instructions: Vec<String>,
        context: Option<&RecipeContext>,
    ) -> Result<Vec<String>, EnhanceError> {
        let verdict = self.validate(&instructions);
        if verdict.is_valid {
            return Ok(instructions);
        }
        request_rewrite(generator, &instructions, &verdict.issues, context).await
    }
}

/// One generator call, rejecting empty output.
pub(crate) async fn request_rewrite(
    generator: &dyn InstructionGenerator,
    instructions: &[String],
    issues: &[String],
    context: Option<&RecipeContext>,
) -> Result<Vec<String>, EnhanceError> {
    tracing::info!(
        generator = generator.name(),
        issue_count = issues.len(),
        "Requesting improved instructions"
    );
    let improved = generator.regenerate(instructions, issues, context).await?;
    if improved.is_empty() {
        return Err(EnhanceError::EmptyResponse);
    }
    Ok(improved)
}
