//! Instruction file loading.
//!
//! A file holds either a bare JSON array of steps or an object with an
//! `instructions` field and an optional `context`. Anything else is passed on
//! untouched so the validator can report it as missing.

use anyhow::{Context, Result};
use mealplan_core::RecipeContext;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionFile {
    pub instructions: JsonValue,
    pub context: Option<RecipeContext>,
}

impl InstructionFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(content)?;

        let mut fields = match value {
            JsonValue::Object(fields) => fields,
            other => {
                return Ok(Self {
                    instructions: other,
                    context: None,
                })
            }
        };

        let instructions = fields.remove("instructions").unwrap_or(JsonValue::Null);
        let context = match fields.remove("context") {
            None | Some(JsonValue::Null) => None,
            Some(raw) => Some(serde_json::from_value(raw).context("Invalid recipe context")?),
        };

        Ok(Self {
            instructions,
            context,
        })
    }

    /// The steps as strings, if every element is a string.
    pub fn steps(&self) -> Option<Vec<String>> {
        self.instructions
            .as_array()?
            .iter()
            .map(|step| step.as_str().map(str::to_string))
            .collect()
    }
}
