use crate::model::{RecipeMetadata, DEFAULT_COOK_TIME, DEFAULT_PREP_TIME, DEFAULT_SERVINGS, DEFAULT_TITLE};
use regex::Regex;
use std::sync::LazyLock;

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:\*\*)?Title(?:\*\*)?[ \t]*:(?:\*\*)?([^\r\n]*)")
        .expect("Invalid title regex")
});

static PREP_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Prep\s*Time(?:\*\*)?\s*:(?:\*\*)?[ \t]*(\d+)").expect("Invalid prep time regex")
});

static COOK_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Cook\s*Time(?:\*\*)?\s*:(?:\*\*)?[ \t]*(\d+)").expect("Invalid cook time regex")
});

static SERVINGS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Servings(?:\*\*)?\s*:(?:\*\*)?[ \t]*(\d+)").expect("Invalid servings regex")
});

fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn extract_title(text: &str) -> String {
    first_capture(&TITLE_REGEX, text)
        .map(|title| title.trim().trim_matches('*').trim())
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

/// Minutes are kept as the digit string the generator wrote.
fn extract_minutes(regex: &Regex, text: &str, default: &str) -> String {
    first_capture(regex, text).unwrap_or(default).to_string()
}

fn extract_servings(text: &str) -> u32 {
    first_capture(&SERVINGS_REGEX, text)
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|servings| *servings >= 1)
        .unwrap_or(DEFAULT_SERVINGS)
}

/// Title, times and servings from the response header. Missing or
/// malformed lines fall back to the defaults.
pub fn extract_metadata(text: &str) -> RecipeMetadata {
    RecipeMetadata {
        title: extract_title(text),
        prep_time: extract_minutes(&PREP_TIME_REGEX, text, DEFAULT_PREP_TIME),
        cook_time: extract_minutes(&COOK_TIME_REGEX, text, DEFAULT_COOK_TIME),
        servings: extract_servings(text),
    }
}
