/// The instructions sent to the generative service for every recipe.
///
/// Describes the exact layout the response parser expects: header fields,
/// the three content sections, basic nutrition, and the detailed nutrition
/// block after the `---Detailed Nutrition Facts---` sentinel.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_GENERATOR_PROMPT: &str = include_str!("prompt.txt");

/// Build the full prompt for an ordered list of ingredient names.
pub fn build_recipe_prompt(ingredients: &[String]) -> String {
    format!(
        "{}\nNow generate a recipe using exactly these ingredients: {}",
        RECIPE_GENERATOR_PROMPT,
        ingredients.join(", ")
    )
}
