use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ConfigError;

use super::patterns::{
    first_word, has_heat_level, has_time_or_temperature, mentions_cooking, only_heating, word_count,
};
use super::{QualityConfig, QualityCriteria, QualityPolicy};

/// The single issue reported when there is no instruction sequence at all.
pub const MISSING_INSTRUCTIONS_ISSUE: &str = "Missing or invalid instructions";

/// Pass/fail result of validating one recipe's instructions.
///
/// Serializes as `{"isValid": bool, "issues": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

impl ValidationVerdict {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    pub fn missing_instructions() -> Self {
        Self::from_issues(vec![MISSING_INSTRUCTIONS_ISSUE.to_string()])
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Checks generated recipe instructions against a [`QualityCriteria`].
///
/// Stateless apart from its criteria: share one instance across threads and
/// call it as often as needed.
#[derive(Debug, Clone, Default)]
pub struct InstructionQualityValidator {
    criteria: QualityCriteria,
}

impl InstructionQualityValidator {
    pub fn new(criteria: QualityCriteria) -> Self {
        Self { criteria }
    }

    pub fn strict() -> Self {
        Self::new(QualityCriteria::strict())
    }

    pub fn relaxed() -> Self {
        Self::new(QualityCriteria::relaxed())
    }

    pub fn for_policy(policy: QualityPolicy) -> Self {
        Self::new(QualityCriteria::for_policy(policy))
    }

    pub fn from_config(config: &QualityConfig) -> Self {
        let criteria = config.criteria();
        tracing::info!(
            policy = %criteria.policy,
            min_steps = criteria.min_steps,
            "Instruction quality gate configured"
        );
        Self::new(criteria)
    }

    /// Build a validator from `MEALPLAN_QUALITY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(&QualityConfig::from_env()?))
    }

    pub fn criteria(&self) -> &QualityCriteria {
        &self.criteria
    }

    pub fn policy(&self) -> QualityPolicy {
        self.criteria.policy
    }

    /// Validate an ordered sequence of instruction steps.
    pub fn validate<S: AsRef<str>>(&self, instructions: &[S]) -> ValidationVerdict {
        let steps: Vec<Option<&str>> = instructions.iter().map(|s| Some(s.as_ref())).collect();
        self.check_steps(&steps)
    }

    /// Validate instructions that may be absent altogether.
    pub fn validate_optional<S: AsRef<str>>(&self, instructions: Option<&[S]>) -> ValidationVerdict {
        match instructions {
            Some(instructions) => self.validate(instructions),
            None => self.missing(),
        }
    }

    /// Validate instructions whose shape has not been checked yet, e.g. a
    /// field pulled out of a generation backend's JSON reply.
    ///
    /// Anything other than an array is reported as missing. Array elements
    /// that are not strings are reported per step.
    pub fn validate_json(&self, instructions: &JsonValue) -> ValidationVerdict {
        match instructions.as_array() {
            Some(items) => {
                let steps: Vec<Option<&str>> = items.iter().map(JsonValue::as_str).collect();
                self.check_steps(&steps)
            }
            None => self.missing(),
        }
    }

    fn missing(&self) -> ValidationVerdict {
        tracing::debug!(policy = %self.criteria.policy, "Instructions missing or not a list");
        ValidationVerdict::missing_instructions()
    }

    /// Run every check and collect all issues. `None` marks a step that was
    /// not a string.
    fn check_steps(&self, steps: &[Option<&str>]) -> ValidationVerdict {
        let criteria = &self.criteria;
        let mut issues = Vec::new();

        if steps.len() < criteria.min_steps {
            issues.push(format!(
                "Recipe has only {} steps; at least {} are required.",
                steps.len(),
                criteria.min_steps
            ));
        }

        if criteria.check_step_length {
            let short_steps = steps
                .iter()
                .flatten()
                .filter(|step| !is_blank(step))
                .filter(|step| word_count(step) < criteria.min_words_per_step)
                .count();
            if short_steps > criteria.max_short_steps {
                issues.push(format!(
                    "{} of {} steps are too short (fewer than {} words).",
                    short_steps,
                    steps.len(),
                    criteria.min_words_per_step
                ));
            }
        }

        let banned: Vec<(String, &str)> = criteria
            .banned_phrases
            .iter()
            .map(|phrase| (phrase.to_lowercase(), phrase.as_str()))
            .collect();

        let mut timed_steps = 0;
        for (index, step) in steps.iter().enumerate() {
            let number = index + 1;
            let Some(text) = step.filter(|s| !is_blank(s)) else {
                issues.push(format!("Step {} is invalid or empty.", number));
                continue;
            };
            let lower = text.to_lowercase();

            if let Some((_, phrase)) = banned.iter().find(|(needle, _)| lower.contains(needle.as_str())) {
                issues.push(format!("Step {} contains banned phrase: \"{}\"", number, phrase));
            }

            if criteria.check_weak_verbs {
                if let Some(verb) = first_word(&lower) {
                    if criteria.weak_verbs.iter().any(|weak| weak.to_lowercase() == verb) {
                        issues.push(format!("Step {} starts with weak verb: \"{}\"", number, verb));
                    }
                }
            }

            let timed = has_time_or_temperature(&lower);
            if timed {
                timed_steps += 1;
            }

            if criteria.check_cooking_specificity && mentions_cooking(&lower) && !timed {
                let heat_given = criteria.heat_level_is_specific
                    && has_heat_level(&lower)
                    && only_heating(&lower);
                if !heat_given {
                    issues.push(format!(
                        "Step {} mentions cooking but lacks specific time or temperature.",
                        number
                    ));
                }
            }
        }

        if criteria.check_timed_step_tally && timed_steps < criteria.min_timed_steps {
            issues.push(format!(
                "Only {} steps include a specific temperature or time; at least {} are required.",
                timed_steps, criteria.min_timed_steps
            ));
        }

        let verdict = ValidationVerdict::from_issues(issues);
        tracing::debug!(
            policy = %criteria.policy,
            steps = steps.len(),
            issue_count = verdict.issue_count(),
            is_valid = verdict.is_valid,
            "Validated recipe instructions"
        );
        verdict
    }
}

fn is_blank(step: &str) -> bool {
    step.trim().is_empty()
}
