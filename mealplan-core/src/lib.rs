pub mod enhance;
pub mod error;
pub mod gate;
pub mod llm;
pub mod prompts;
pub mod quality;
pub mod types;

pub use enhance::{InstructionGenerator, LlmInstructionGenerator};
pub use error::{ConfigError, EnhanceError};
pub use gate::{GateOutcome, QualityGate, DEFAULT_MAX_ATTEMPTS};
pub use quality::{
    InstructionQualityValidator, QualityConfig, QualityCriteria, QualityPolicy, ValidationVerdict,
    MISSING_INSTRUCTIONS_ISSUE,
};
pub use types::RecipeContext;
