//! Recipe-instruction quality gate.
//!
//! Decides whether generated recipe instructions are specific enough to show
//! to a household, or whether they should be sent back for regeneration.
//! Quality problems are reported as data in a [`ValidationVerdict`]; nothing
//! in this module returns an error for a bad recipe.

mod config;
mod criteria;
pub mod patterns;
mod validator;

pub use config::QualityConfig;
pub use criteria::{
    QualityCriteria, QualityPolicy, RELAXED_BANNED_PHRASES, STRICT_BANNED_PHRASES, WEAK_VERBS,
};
pub use validator::{InstructionQualityValidator, ValidationVerdict, MISSING_INSTRUCTIONS_ISSUE};
