use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidEnvVar {
        var: String,
        value: String,
        reason: String,
    },

    #[error("Unknown quality policy: {0}")]
    UnknownPolicy(String),
}

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("Generation backend failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to parse generated instructions: {0}")]
    Parse(String),

    #[error("Generation backend returned no instructions")]
    EmptyResponse,
}
