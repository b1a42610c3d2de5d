//! Turns a generator response into a [`ParsedRecipe`].
//!
//! The response is expected to follow the layout requested by
//! [`RECIPE_GENERATOR_PROMPT`](crate::providers::RECIPE_GENERATOR_PROMPT), but
//! nothing here relies on it: every field has a default or is simply left
//! out, and parsing never fails.

mod metadata;
mod nutrition;
mod sections;

pub use metadata::extract_metadata;
pub use nutrition::{
    extract_nutrient, extract_nutrition, nutrient_unit, NutrientRule, NUTRIENT_RULES,
};
pub use sections::{
    before_sentinel, extract_sections, DETAILED_NUTRITION_SENTINEL, INGREDIENTS_HEADER,
    INSTRUCTIONS_HEADER, SPICES_HEADER,
};

use crate::model::ParsedRecipe;

/// Parse one response. Pure: the same text always gives the same record.
pub fn parse_recipe(text: &str) -> ParsedRecipe {
    ParsedRecipe {
        metadata: extract_metadata(text),
        sections: extract_sections(text),
        nutrition: extract_nutrition(text),
        full_text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NutrientKey, NutritionValue, RecipeMetadata, RecipeSections};

    #[test]
    fn test_empty_input() {
        let recipe = parse_recipe("");
        assert_eq!(recipe.metadata, RecipeMetadata::default());
        assert_eq!(recipe.sections, RecipeSections::default());
        assert!(recipe.nutrition.is_empty());
        assert_eq!(recipe.full_text, "");
    }

    #[test]
    fn test_basic_nutrition_example() {
        let recipe = parse_recipe("Calories: 350 kcal\nFiber: 5 g\nTotal Carbs: 40 g");
        let expected = [
            (NutrientKey::Calories, 350),
            (NutrientKey::TotalCarbs, 40),
            (NutrientKey::NetCarbs, 35),
            (NutrientKey::Fiber, 5),
        ]
        .into_iter()
        .map(|(k, v)| (k, NutritionValue::Integer(v)))
        .collect();
        assert_eq!(recipe.nutrition, expected);
    }

    #[test]
    fn test_full_text_is_verbatim() {
        let text = "  Title: X \n\nsome chatter\n";
        assert_eq!(parse_recipe(text).full_text, text);
    }
}
