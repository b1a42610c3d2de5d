use crate::model::RecipeSections;
use regex::Regex;
use std::sync::LazyLock;

/// Heading that separates basic from detailed nutrition facts. Nothing after
/// it belongs to the ingredient, spice or instruction blocks.
pub const DETAILED_NUTRITION_SENTINEL: &str = "---Detailed Nutrition Facts---";

pub const INGREDIENTS_HEADER: &str = "Ingredients:";
pub const SPICES_HEADER: &str = "Spices & Seasonings:";
pub const INSTRUCTIONS_HEADER: &str = "Instructions:";

/// Block after `header` up to a blank line followed by a capitalized line,
/// or the end of the text.
fn section_regex(header: &str) -> Regex {
    let pattern = format!(
        r"(?s){}(?:\*\*)?[ \t]*\r?\n(.*?)(?:\r?\n[ \t]*\r?\n[A-Z]|\z)",
        regex::escape(header)
    );
    Regex::new(&pattern).expect("Invalid section regex")
}

static INGREDIENTS_REGEX: LazyLock<Regex> = LazyLock::new(|| section_regex(INGREDIENTS_HEADER));
static SPICES_REGEX: LazyLock<Regex> = LazyLock::new(|| section_regex(SPICES_HEADER));
static INSTRUCTIONS_REGEX: LazyLock<Regex> = LazyLock::new(|| section_regex(INSTRUCTIONS_HEADER));

/// Text before the detailed nutrition sentinel, or all of it.
pub fn before_sentinel(text: &str) -> &str {
    text.find(DETAILED_NUTRITION_SENTINEL)
        .map_or(text, |index| &text[..index])
}

fn extract_block(regex: &Regex, text: &str) -> String {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Ingredient, spice and instruction blocks, trimmed. A missing header gives
/// an empty block.
pub fn extract_sections(text: &str) -> RecipeSections {
    let body = before_sentinel(text);

    RecipeSections {
        ingredients: extract_block(&INGREDIENTS_REGEX, body),
        spices: extract_block(&SPICES_REGEX, body),
        instructions: extract_block(&INSTRUCTIONS_REGEX, body),
    }
}
