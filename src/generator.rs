use crate::config::AppConfig;
use crate::error::GuacoError;
use crate::model::ParsedRecipe;
use crate::parser::parse_recipe;
use crate::providers::{build_recipe_prompt, FallbackProvider, LlmProvider};
use log::{debug, info};

/// Turns ingredient lists into structured recipes.
///
/// Owns the provider chain for the lifetime of the process. The provider
/// call is the only suspending step; parsing the reply is synchronous.
pub struct RecipeGenerator {
    provider: Box<dyn LlmProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider chain described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, GuacoError> {
        let provider = FallbackProvider::new(config)
            .map_err(|e| GuacoError::GenerationError(format!("Provider setup failed: {e}")))?;
        Ok(Self::new(Box::new(provider)))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Ask the provider for a recipe and parse the reply.
    ///
    /// # Errors
    /// - [`GuacoError::InvalidInput`] when no non-blank ingredient was given;
    ///   the provider is not called.
    /// - [`GuacoError::GenerationError`] when the provider fails.
    pub async fn generate(&self, ingredients: &[String]) -> Result<ParsedRecipe, GuacoError> {
        let ingredients = normalize_ingredients(ingredients)?;
        let prompt = build_recipe_prompt(&ingredients);

        info!(
            "Generating recipe for {} ingredient(s) with {}",
            ingredients.len(),
            self.provider.provider_name()
        );

        let text = self
            .provider
            .complete(&prompt)
            .await
            .map_err(|e| GuacoError::GenerationError(e.to_string()))?;
        debug!("Generator reply:\n{}", text);

        Ok(parse_recipe(&text))
    }
}

/// Trimmed, non-blank ingredient names in their original order.
pub fn normalize_ingredients(ingredients: &[String]) -> Result<Vec<String>, GuacoError> {
    let names: Vec<String> = ingredients
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(GuacoError::InvalidInput(
            "At least one ingredient is required".to_string(),
        ));
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records the prompt it was given and replies with fixed text.
    struct CannedProvider {
        reply: Result<String, String>,
        last_prompt: Arc<Mutex<Option<String>>>,
    }

    impl CannedProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                last_prompt: Arc::new(Mutex::new(None)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                last_prompt: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(Into::into)
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_ingredients() {
        let normalized = normalize_ingredients(&names(&[" tofu ", "", "spinach", "   "])).unwrap();
        assert_eq!(normalized, names(&["tofu", "spinach"]));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(
            normalize_ingredients(&[]),
            Err(GuacoError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_ingredients(&names(&[" ", ""])),
            Err(GuacoError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_parses_reply() {
        let generator = RecipeGenerator::new(Box::new(CannedProvider::replying(
            "Title: Garlic Rice\n\nServings: 3\n\nIngredients:\n• 1 cup rice\n\nCalories: 240 kcal",
        )));

        let recipe = generator.generate(&names(&["rice", "garlic"])).await.unwrap();
        assert_eq!(recipe.metadata.title, "Garlic Rice");
        assert_eq!(recipe.metadata.servings, 3);
        assert_eq!(recipe.sections.ingredients, "• 1 cup rice");
        assert_eq!(recipe.nutrition.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_sends_ingredients_in_order() {
        let provider = CannedProvider::replying("");
        let last_prompt = Arc::clone(&provider.last_prompt);
        let generator = RecipeGenerator::new(Box::new(provider));
        generator.generate(&names(&["tomato", " basil "])).await.unwrap();

        let prompt = last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.ends_with("tomato, basil"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_without_calling_provider() {
        let provider = CannedProvider::failing("should not be called");
        let last_prompt = Arc::clone(&provider.last_prompt);
        let generator = RecipeGenerator::new(Box::new(provider));

        let err = generator.generate(&[]).await.unwrap_err();
        assert!(matches!(err, GuacoError::InvalidInput(_)));
        assert!(last_prompt.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generate_wraps_provider_failure() {
        let generator = RecipeGenerator::new(Box::new(CannedProvider::failing("service down")));

        let err = generator.generate(&names(&["eggs"])).await.unwrap_err();
        assert!(matches!(err, GuacoError::GenerationError(ref msg) if msg.contains("service down")));
    }
}
