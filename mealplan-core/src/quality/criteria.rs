use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which set of quality rules a deployment enforces.
///
/// Two rule sets grew up independently: `Strict` adds per-step length, weak
/// verb and cooking-specificity checks on top of a 7-step floor, while
/// `Relaxed` only needs 5 steps and a recipe-wide count of timed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPolicy {
    #[default]
    Strict,
    Relaxed,
}

impl QualityPolicy {
    pub const ALL: &'static [QualityPolicy] = &[QualityPolicy::Strict, QualityPolicy::Relaxed];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPolicy::Strict => "strict",
            QualityPolicy::Relaxed => "relaxed",
        }
    }
}

impl fmt::Display for QualityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(QualityPolicy::Strict),
            "relaxed" => Ok(QualityPolicy::Relaxed),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Phrases that mark a strict-policy step as generic filler.
/// Checked in order; only the first hit is reported for a step.
pub const STRICT_BANNED_PHRASES: &[&str] = &[
    "cook until done",
    "until done",
    "cook as usual",
    "as you normally would",
    "according to package directions",
    "follow package directions",
    "prepare as desired",
    "cook to your liking",
    "until ready",
    "as needed",
    "and so on",
    "etc.",
];

/// Phrases rejected under the relaxed policy.
pub const RELAXED_BANNED_PHRASES: &[&str] = &[
    "cook until done",
    "cook as usual",
    "as you normally would",
    "follow package directions",
    "prepare as desired",
];

/// Words too vague to open an instruction step.
pub const WEAK_VERBS: &[&str] = &[
    "add", "put", "place", "do", "make", "get", "use", "mix", "combine", "prepare", "finish",
    "continue",
];

/// The thresholds and reference lists one validator enforces.
///
/// Presets come from [`QualityCriteria::strict`] and
/// [`QualityCriteria::relaxed`]. Individual fields can be overridden, but the
/// presets never borrow thresholds from each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCriteria {
    pub policy: QualityPolicy,
    pub min_steps: usize,
    pub banned_phrases: Vec<String>,

    /// Flag recipes made of steps with fewer than `min_words_per_step` words.
    pub check_step_length: bool,
    pub min_words_per_step: usize,
    /// Short steps tolerated before the aggregate issue is raised.
    pub max_short_steps: usize,

    pub check_weak_verbs: bool,
    pub weak_verbs: Vec<String>,

    /// Flag steps that name a cooking action without a time or temperature.
    pub check_cooking_specificity: bool,
    /// Whether an "over medium-high heat" style heat level satisfies the
    /// cooking-specificity check for a step whose only cooking verb is
    /// "heat". Simmering or frying over a heat level still needs a time.
    pub heat_level_is_specific: bool,

    /// Require at least `min_timed_steps` steps mentioning a time or temperature.
    pub check_timed_step_tally: bool,
    pub min_timed_steps: usize,
}

impl QualityCriteria {
    pub fn strict() -> Self {
        Self {
            policy: QualityPolicy::Strict,
            min_steps: 7,
            banned_phrases: to_owned_list(STRICT_BANNED_PHRASES),
            check_step_length: true,
            min_words_per_step: 10,
            max_short_steps: 1,
            check_weak_verbs: true,
            weak_verbs: to_owned_list(WEAK_VERBS),
            check_cooking_specificity: true,
            heat_level_is_specific: true,
            check_timed_step_tally: false,
            min_timed_steps: 0,
        }
    }

    pub fn relaxed() -> Self {
        Self {
            policy: QualityPolicy::Relaxed,
            min_steps: 5,
            banned_phrases: to_owned_list(RELAXED_BANNED_PHRASES),
            check_step_length: false,
            min_words_per_step: 0,
            max_short_steps: 0,
            check_weak_verbs: false,
            weak_verbs: Vec::new(),
            check_cooking_specificity: false,
            heat_level_is_specific: false,
            check_timed_step_tally: true,
            min_timed_steps: 2,
        }
    }

    pub fn for_policy(policy: QualityPolicy) -> Self {
        match policy {
            QualityPolicy::Strict => Self::strict(),
            QualityPolicy::Relaxed => Self::relaxed(),
        }
    }
}

impl Default for QualityCriteria {
    fn default() -> Self {
        Self::strict()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<QualityPolicy>().unwrap(), QualityPolicy::Strict);
        assert_eq!(" Relaxed ".parse::<QualityPolicy>().unwrap(), QualityPolicy::Relaxed);
        assert!(matches!(
            "lenient".parse::<QualityPolicy>(),
            Err(ConfigError::UnknownPolicy(p)) if p == "lenient"
        ));
    }

    #[test]
    fn test_policy_roundtrip_as_str() {
        for policy in QualityPolicy::ALL {
            assert_eq!(policy.as_str().parse::<QualityPolicy>().unwrap(), *policy);
        }
    }

    #[test]
    fn test_presets_keep_checks_separate() {
        let strict = QualityCriteria::strict();
        assert_eq!(strict.min_steps, 7);
        assert!(strict.check_step_length && strict.check_weak_verbs);
        assert!(strict.check_cooking_specificity);
        assert!(!strict.check_timed_step_tally);

        let relaxed = QualityCriteria::relaxed();
        assert_eq!(relaxed.min_steps, 5);
        assert_eq!(relaxed.min_timed_steps, 2);
        assert!(relaxed.check_timed_step_tally);
        assert!(!relaxed.check_step_length && !relaxed.check_weak_verbs);
        assert!(!relaxed.check_cooking_specificity);
    }

    #[test]
    fn test_reference_lists_are_lowercase() {
        for phrase in STRICT_BANNED_PHRASES.iter().chain(RELAXED_BANNED_PHRASES) {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
        for verb in WEAK_VERBS {
            assert_eq!(*verb, verb.to_lowercase());
            assert!(!verb.contains(' '), "{} must be a single word", verb);
        }
    }

    #[test]
    fn test_serde_policy_snake_case() {
        let json = serde_json::to_string(&QualityPolicy::Relaxed).unwrap();
        assert_eq!(json, "\"relaxed\"");
    }
}
