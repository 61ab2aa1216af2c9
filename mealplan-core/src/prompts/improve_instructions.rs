//! Prompt for rewriting instructions that failed the quality gate.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::EnhanceError;
use crate::quality::QualityCriteria;
use crate::types::RecipeContext;

/// Prompt name, for logging.
pub const IMPROVE_INSTRUCTIONS_PROMPT_NAME: &str = "improve_instructions";

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\d+\s*[.):]|[-*•]|step\s+\d+\s*[.):])\s*(.+)$")
        .expect("list marker pattern is valid")
});

/// Render the prompt asking a model to rewrite failing instructions.
pub fn render_improve_instructions_prompt(
    instructions: &[String],
    issues: &[String],
    context: Option<&RecipeContext>,
    criteria: &QualityCriteria,
) -> String {
    let mut prompt = String::from(
        "You are a recipe editor for a household meal planner. The recipe instructions below \
         were rejected by a quality check. Rewrite them so that a home cook can follow them \
         without guessing.\n",
    );

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("\nRecipe:\n");
        if let Some(name) = &context.name {
            prompt.push_str(&format!("- Name: {}\n", name));
        }
        if let Some(recipe_type) = &context.recipe_type {
            prompt.push_str(&format!("- Type: {}\n", recipe_type));
        }
        if !context.ingredients.is_empty() {
            prompt.push_str(&format!(
                "- Ingredients: {}\n",
                context.ingredients.join(", ")
            ));
        }
    }

    prompt.push_str("\nCurrent instructions:\n");
    for (index, step) in instructions.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", index + 1, step));
    }

    prompt.push_str("\nProblems found:\n");
    for issue in issues {
        prompt.push_str(&format!("- {}\n", issue));
    }

    prompt.push_str("\nRules:\n");
    prompt.push_str(&format!("- Write at least {} steps.\n", criteria.min_steps));
    if criteria.check_step_length {
        prompt.push_str(&format!(
            "- Each step should be at least {} words long.\n",
            criteria.min_words_per_step
        ));
    }
    if criteria.check_cooking_specificity || criteria.check_timed_step_tally {
        prompt.push_str(
            "- Give an exact temperature (e.g. 375°F) or time (e.g. 20 minutes) whenever food is cooked.\n",
        );
    }
    if !criteria.banned_phrases.is_empty() {
        prompt.push_str(&format!(
            "- Never use these phrases: {}.\n",
            quoted_list(&criteria.banned_phrases)
        ));
    }
    if criteria.check_weak_verbs && !criteria.weak_verbs.is_empty() {
        prompt.push_str(&format!(
            "- Do not start a step with: {}.\n",
            quoted_list(&criteria.weak_verbs)
        ));
    }
    prompt.push_str("- Keep the same dish and ingredients; do not invent new components.\n");

    prompt.push_str(
        "\nReturn ONLY a JSON array of strings, one string per step, with no numbering and no other text.",
    );

    prompt
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a model reply into instruction steps.
///
/// Accepts a JSON array of strings (optionally inside a ```json fence). Other
/// replies are read as a numbered or bulleted list; when no line carries a
/// list marker, every non-empty line is a step.
pub fn parse_improved_instructions(response: &str) -> Result<Vec<String>, EnhanceError> {
    let body = strip_code_fence(response.trim());

    if body.starts_with('[') {
        let steps: Vec<String> =
            serde_json::from_str(body).map_err(|e| EnhanceError::Parse(e.to_string()))?;
        let steps: Vec<String> = steps
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        return non_empty(steps);
    }

    let lines: Vec<&str> = body.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let marked: Vec<String> = lines
        .iter()
        .filter_map(|line| LIST_MARKER.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if !marked.is_empty() {
        return non_empty(marked);
    }

    non_empty(lines.into_iter().map(str::to_string).collect())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn non_empty(steps: Vec<String>) -> Result<Vec<String>, EnhanceError> {
    if steps.is_empty() {
        Err(EnhanceError::EmptyResponse)
    } else {
        Ok(steps)
    }
}
