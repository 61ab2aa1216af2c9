//! Prompt templates for generation backends.

pub mod improve_instructions;

pub use improve_instructions::{parse_improved_instructions, render_improve_instructions_prompt};
