use serde::{Deserialize, Serialize};

/// Optional recipe details passed along to enhancement.
///
/// Never validated itself; a generation backend may use it to keep regenerated
/// steps consistent with the dish and its ingredient list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeContext {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Meal slot or dish category tag (e.g. "dinner", "side").
    #[serde(default, rename = "type")]
    pub recipe_type: Option<String>,
}

impl RecipeContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recipe_type(mut self, recipe_type: impl Into<String>) -> Self {
        self.recipe_type = Some(recipe_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_empty() && self.recipe_type.is_none()
    }
}
