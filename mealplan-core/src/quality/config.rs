//! Quality gate configuration from environment variables.

use std::env;

use crate::error::ConfigError;

use super::{QualityCriteria, QualityPolicy};

pub const POLICY_VAR: &str = "MEALPLAN_QUALITY_POLICY";
pub const MIN_STEPS_VAR: &str = "MEALPLAN_QUALITY_MIN_STEPS";
pub const MIN_WORDS_PER_STEP_VAR: &str = "MEALPLAN_QUALITY_MIN_WORDS_PER_STEP";
pub const MAX_SHORT_STEPS_VAR: &str = "MEALPLAN_QUALITY_MAX_SHORT_STEPS";

/// Deployment settings for the instruction quality gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityConfig {
    pub policy: QualityPolicy,
    pub min_steps: Option<usize>,
    pub min_words_per_step: Option<usize>,
    pub max_short_steps: Option<usize>,
}

impl QualityConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `MEALPLAN_QUALITY_POLICY`: "strict" or "relaxed" (default: "strict")
    /// - `MEALPLAN_QUALITY_MIN_STEPS`: override the policy's step-count floor
    /// - `MEALPLAN_QUALITY_MIN_WORDS_PER_STEP`: override the short-step threshold
    /// - `MEALPLAN_QUALITY_MAX_SHORT_STEPS`: override the short-step tolerance
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`QualityConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy = match lookup(POLICY_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => QualityPolicy::default(),
        };

        Ok(Self {
            policy,
            min_steps: parse_count(&lookup, MIN_STEPS_VAR)?,
            min_words_per_step: parse_count(&lookup, MIN_WORDS_PER_STEP_VAR)?,
            max_short_steps: parse_count(&lookup, MAX_SHORT_STEPS_VAR)?,
        })
    }

    pub fn for_policy(policy: QualityPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Build the criteria for the configured policy with any overrides applied.
    pub fn criteria(&self) -> QualityCriteria {
        let mut criteria = QualityCriteria::for_policy(self.policy);
        if let Some(min_steps) = self.min_steps {
            criteria.min_steps = min_steps;
        }
        if let Some(min_words) = self.min_words_per_step {
            criteria.min_words_per_step = min_words;
        }
        if let Some(max_short) = self.max_short_steps {
            criteria.max_short_steps = max_short;
        }
        criteria
    }
}

fn parse_count<F>(lookup: &F, var: &str) -> Result<Option<usize>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            value,
            reason: e.to_string(),
        })
}
