//! Caller-side retry policy around validation and enhancement.
//!
//! The validator and [`enhance_with`](crate::InstructionQualityValidator::enhance_with)
//! never retry. `QualityGate` is the collaborator that decides how many
//! rewrites to ask for before accepting a recipe with a quality flag.

use serde::{Deserialize, Serialize};

use crate::enhance::{request_rewrite, InstructionGenerator};
use crate::quality::{InstructionQualityValidator, ValidationVerdict};
use crate::types::RecipeContext;

pub const DEFAULT_MAX_ATTEMPTS: usize = 2;

/// What the gate decided for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateOutcome {
    /// The instructions to show: the last ones that were validated.
    pub instructions: Vec<String>,
    /// Verdict for `instructions`.
    pub verdict: ValidationVerdict,
    /// Number of generator calls made.
    pub attempts: usize,
    /// False when the recipe is surfaced with a quality flag.
    pub accepted: bool,
}

#[derive(Debug, Clone)]
pub struct QualityGate {
    validator: InstructionQualityValidator,
    max_attempts: usize,
}

impl QualityGate {
    pub fn new(validator: InstructionQualityValidator) -> Self {
        Self {
            validator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Outcome when no generation backend is available: the instructions go
    /// through [`enhance`](InstructionQualityValidator::enhance) unchanged and
    /// are flagged if they fail validation.
    pub fn pass_through(
        &self,
        instructions: Vec<String>,
        context: Option<&RecipeContext>,
    ) -> GateOutcome {
        let instructions = self.validator.enhance(instructions, context);
        let verdict = self.validator.validate(&instructions);
        self.outcome(instructions, verdict, 0)
    }

    /// Validate, then ask `generator` for rewrites until the instructions
    /// pass or the attempt budget runs out.
    ///
    /// A generator error stops the loop; the last validated instructions are
    /// kept rather than discarded.
    pub async fn run(
        &self,
        generator: &dyn InstructionGenerator,
        instructions: Vec<String>,
        context: Option<&RecipeContext>,
    ) -> GateOutcome {
        let mut current = instructions;
        let mut attempts = 0;

        loop {
            let verdict = self.validator.validate(&current);
            if verdict.is_valid || attempts >= self.max_attempts {
                if !verdict.is_valid {
                    tracing::warn!(
                        attempts,
                        issue_count = verdict.issue_count(),
                        "Accepting instructions with quality issues after exhausting rewrites"
                    );
                }
                return self.outcome(current, verdict, attempts);
            }

            attempts += 1;
            match request_rewrite(generator, &current, &verdict.issues, context).await {
                Ok(rewritten) => current = rewritten,
                Err(e) => {
                    tracing::warn!(
                        attempt = attempts,
                        generator = generator.name(),
                        error = %e,
                        "Instruction rewrite failed, keeping previous instructions"
                    );
                    return self.outcome(current, verdict, attempts);
                }
            }
        }
    }

    fn outcome(
        &self,
        instructions: Vec<String>,
        verdict: ValidationVerdict,
        attempts: usize,
    ) -> GateOutcome {
        GateOutcome {
            accepted: verdict.is_valid,
            instructions,
            verdict,
            attempts,
        }
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(InstructionQualityValidator::default())
    }
}
