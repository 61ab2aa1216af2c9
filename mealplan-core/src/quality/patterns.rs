//! Text patterns shared by the quality checks.

use std::sync::LazyLock;

use regex::Regex;

static COOKING_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bake|roast|simmer|boil|cook|heat|fry|sauté|saute|grill|broil|toast|microwave)\b",
    )
    .expect("cooking verb pattern is valid")
});

/// A number followed by °F/°C, or by a minutes/hours/seconds unit.
static TIME_OR_TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*°\s*[fc]|\d+\s*(?:minutes?|mins?|hours?|hrs?|seconds?|secs?)\b")
        .expect("time/temperature pattern is valid")
});

static HEAT_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:low|medium-low|medium|medium-high|high)[\s-]+heat\b")
        .expect("heat level pattern is valid")
});

/// True if the step names a cooking action ("bake", "simmer", ...).
///
/// Matches whole words only, so "preheat" does not count as "heat".
pub fn mentions_cooking(step: &str) -> bool {
    COOKING_VERB.is_match(step)
}

/// True if the step gives a concrete temperature or duration.
pub fn has_time_or_temperature(step: &str) -> bool {
    TIME_OR_TEMPERATURE.is_match(step)
}

/// True if the step gives a stovetop heat level ("over medium-high heat").
pub fn has_heat_level(step: &str) -> bool {
    HEAT_LEVEL.is_match(step)
}

/// True if the step names at least one cooking verb and every one is "heat".
pub fn only_heating(step: &str) -> bool {
    let mut verbs = COOKING_VERB.find_iter(step).peekable();
    verbs.peek().is_some() && verbs.all(|m| m.as_str().eq_ignore_ascii_case("heat"))
}

/// Number of whitespace-delimited words in the step.
pub fn word_count(step: &str) -> usize {
    step.split_whitespace().count()
}

/// The literal first whitespace-delimited token, lower-cased.
pub fn first_word(step: &str) -> Option<String> {
    step.split_whitespace().next().map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooking_verbs() {
        assert!(mentions_cooking("Bake the bread"));
        assert!(mentions_cooking("simmer gently"));
        assert!(mentions_cooking("Sauté the onions"));
        assert!(mentions_cooking("saute the onions"));
        assert!(mentions_cooking("MICROWAVE briefly"));
        assert!(!mentions_cooking("Preheat the oven"));
        assert!(!mentions_cooking("Cookware should be clean"));
        assert!(!mentions_cooking("Whisk the eggs"));
    }

    #[test]
    fn test_time_or_temperature() {
        assert!(has_time_or_temperature("Bake at 350°F"));
        assert!(has_time_or_temperature("bake at 180 °c"));
        assert!(has_time_or_temperature("Simmer for 20 minutes"));
        assert!(has_time_or_temperature("rest 5 mins"));
        assert!(has_time_or_temperature("Braise for 2 HOURS"));
        assert!(has_time_or_temperature("microwave for 30 secs"));
        assert!(has_time_or_temperature("roast 1 hr"));
        assert!(has_time_or_temperature("Bake 25-30 minutes"));
        assert!(!has_time_or_temperature("Bake until golden"));
        assert!(!has_time_or_temperature("Use 2 cups of flour"));
        assert!(!has_time_or_temperature("Wait a few minutes"));
    }

    #[test]
    fn test_heat_level() {
        assert!(has_heat_level("over medium-high heat"));
        assert!(has_heat_level("on low heat"));
        assert!(has_heat_level("over high-heat"));
        assert!(!has_heat_level("heat the oil"));
    }

    #[test]
    fn test_only_heating() {
        assert!(only_heating("Heat the oil over medium-high heat"));
        assert!(only_heating("warm the pan over low heat"));
        assert!(!only_heating("Simmer the sauce over low heat"));
        assert!(!only_heating("Heat the oil, then fry the onions over medium heat"));
        assert!(!only_heating("Sauté the garlic over medium heat"));
        assert!(!only_heating("Stir in the herbs"));
    }

    #[test]
    fn test_word_helpers() {
        assert_eq!(word_count("  Stir   the sauce\twell "), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(first_word("Additional garnish is optional").as_deref(), Some("additional"));
        assert_eq!(first_word("   ").as_deref(), None);
    }
}
