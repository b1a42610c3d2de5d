//! Guaco backend: turns ingredient lists into structured recipes.
//!
//! The heart of the crate is [`parse_recipe`], which decomposes the free-text
//! reply of a generative service into a [`ParsedRecipe`]. Around it sit the
//! LLM providers, a JSON recipe store, and the HTTP server used by the web
//! app.
//!
//! # Example
//! ```
//! use guaco::parse_recipe;
//!
//! let recipe = parse_recipe("Title: Tofu Skillet\nServings: 2\nCalories: 350 kcal");
//! assert_eq!(recipe.metadata.title, "Tofu Skillet");
//! assert_eq!(recipe.metadata.servings, 2);
//! assert_eq!(recipe.metadata.prep_time, "15");
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod grocery;
pub mod model;
pub mod parser;
pub mod providers;
pub mod server;
pub mod store;

pub use config::AppConfig;
pub use error::GuacoError;
pub use generator::RecipeGenerator;
pub use model::{
    NutrientKey, NutritionFacts, NutritionValue, ParsedRecipe, RecipeMetadata, RecipeSections,
};
pub use parser::parse_recipe;
pub use store::RecipeStore;

/// Generate and parse a recipe using the providers described by `config`.
///
/// Builds a fresh provider chain on every call; long-running callers should
/// keep a [`RecipeGenerator`] instead.
pub async fn generate_recipe(
    ingredients: &[String],
    config: &AppConfig,
) -> Result<ParsedRecipe, GuacoError> {
    RecipeGenerator::from_config(config)?
        .generate(ingredients)
        .await
}
