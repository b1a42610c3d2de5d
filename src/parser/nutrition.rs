//! Nutrient value extraction.
//!
//! Every nutrient is described once in [`NUTRIENT_RULES`]: the canonical key,
//! the label spellings the generator is known to use, and the unit it is
//! asked to report in. A single routine turns each rule into a line-anchored
//! pattern and pulls the first number that follows the label.

use crate::model::{NutrientKey, NutritionFacts, NutritionValue};
use regex::Regex;
use std::sync::LazyLock;

/// One row of the nutrient table.
#[derive(Debug)]
pub struct NutrientRule {
    pub key: NutrientKey,
    /// Label alternatives as regex fragments, matched case-insensitively.
    pub labels: &'static [&'static str],
    /// Unit the prompt asks for. Only informational: units are never checked.
    pub unit: &'static str,
}

/// Extracted nutrients in response order. `net_carbs` has no row: it is
/// derived from `total_carbs` and `fiber`.
pub static NUTRIENT_RULES: &[NutrientRule] = &[
    NutrientRule { key: NutrientKey::Calories, labels: &["Calories"], unit: "kcal" },
    NutrientRule { key: NutrientKey::Protein, labels: &["Protein"], unit: "g" },
    NutrientRule {
        key: NutrientKey::TotalCarbs,
        labels: &[r"(?:Total\s+)?Carbohydrates?", r"(?:Total\s+)?Carbs"],
        unit: "g",
    },
    NutrientRule { key: NutrientKey::Fiber, labels: &[r"(?:Dietary\s+)?Fib(?:er|re)"], unit: "g" },
    NutrientRule { key: NutrientKey::TotalFat, labels: &[r"(?:Total\s+)?Fats?"], unit: "g" },
    NutrientRule { key: NutrientKey::SaturatedFat, labels: &[r"Saturated\s+Fats?"], unit: "g" },
    NutrientRule {
        key: NutrientKey::MonounsaturatedFat,
        labels: &[r"Mono-?unsaturated\s+Fats?"],
        unit: "g",
    },
    NutrientRule {
        key: NutrientKey::PolyunsaturatedFat,
        labels: &[r"Poly-?unsaturated\s+Fats?"],
        unit: "g",
    },
    NutrientRule { key: NutrientKey::TransFat, labels: &[r"Trans\s+Fats?"], unit: "g" },
    NutrientRule { key: NutrientKey::Cholesterol, labels: &["Cholesterol"], unit: "mg" },
    NutrientRule { key: NutrientKey::TotalSugars, labels: &[r"(?:Total\s+)?Sugars?"], unit: "g" },
    NutrientRule { key: NutrientKey::AddedSugars, labels: &[r"Added\s+Sugars?"], unit: "g" },
    NutrientRule { key: NutrientKey::Sodium, labels: &["Sodium"], unit: "mg" },
    NutrientRule { key: NutrientKey::Potassium, labels: &["Potassium"], unit: "mg" },
    NutrientRule { key: NutrientKey::Calcium, labels: &["Calcium"], unit: "mg" },
    NutrientRule { key: NutrientKey::Iron, labels: &["Iron"], unit: "mg" },
    NutrientRule { key: NutrientKey::Magnesium, labels: &["Magnesium"], unit: "mg" },
    NutrientRule { key: NutrientKey::Zinc, labels: &["Zinc"], unit: "mg" },
    NutrientRule { key: NutrientKey::Selenium, labels: &["Selenium"], unit: "mcg" },
    NutrientRule { key: NutrientKey::VitaminA, labels: &[r"Vitamin\s+A"], unit: "mcg" },
    NutrientRule { key: NutrientKey::VitaminC, labels: &[r"Vitamin\s+C"], unit: "mg" },
    NutrientRule { key: NutrientKey::VitaminD, labels: &[r"Vitamin\s+D"], unit: "mcg" },
    NutrientRule { key: NutrientKey::VitaminE, labels: &[r"Vitamin\s+E"], unit: "mg" },
    NutrientRule { key: NutrientKey::VitaminK, labels: &[r"Vitamin\s+K"], unit: "mcg" },
    NutrientRule {
        key: NutrientKey::Thiamin,
        labels: &[r"Thiamine?(?:\s*\(\s*(?:Vitamin\s+)?B1\s*\))?", r"(?:Vitamin\s+)?B1"],
        unit: "mg",
    },
    NutrientRule {
        key: NutrientKey::Riboflavin,
        labels: &[r"Riboflavin(?:\s*\(\s*(?:Vitamin\s+)?B2\s*\))?", r"(?:Vitamin\s+)?B2"],
        unit: "mg",
    },
    NutrientRule {
        key: NutrientKey::Niacin,
        labels: &[r"Niacin(?:\s*\(\s*(?:Vitamin\s+)?B3\s*\))?", r"(?:Vitamin\s+)?B3"],
        unit: "mg",
    },
    NutrientRule {
        key: NutrientKey::VitaminB6,
        labels: &[r"(?:Vitamin\s+)?B6", r"Pyridoxine(?:\s*\(\s*(?:Vitamin\s+)?B6\s*\))?"],
        unit: "mg",
    },
    NutrientRule {
        key: NutrientKey::VitaminB12,
        labels: &[r"(?:Vitamin\s+)?B12", r"Cobalamin(?:\s*\(\s*(?:Vitamin\s+)?B12\s*\))?"],
        unit: "mcg",
    },
    NutrientRule {
        key: NutrientKey::Folate,
        labels: &[
            r"Folate(?:\s*\(\s*(?:Vitamin\s+)?B9\s*\))?",
            r"Folic\s+Acid",
            r"(?:Vitamin\s+)?B9",
        ],
        unit: "mcg",
    },
];

/// `<bullet> <label> (<note>): <number>`; the unit after the number is not
/// captured. Labels must start the line so that "Fat" never matches
/// "Saturated Fat".
fn build_pattern(labels: &[&str]) -> String {
    format!(
        r"(?im)^[ \t]*(?:[•·*\-][ \t]*)?(?:\*\*)?(?:{})(?:[ \t]*\([^)\r\n]*\))?[ \t]*(?:\*\*)?[ \t]*:[ \t]*(?:\*\*)?[ \t]*(\d[\d,]*(?:\.\d+)?|\.\d+)",
        labels.join("|")
    )
}

static NUTRIENT_PATTERNS: LazyLock<Vec<(NutrientKey, Regex)>> = LazyLock::new(|| {
    NUTRIENT_RULES
        .iter()
        .map(|rule| {
            let pattern = Regex::new(&build_pattern(rule.labels))
                .expect("Invalid nutrient pattern in NUTRIENT_RULES");
            (rule.key, pattern)
        })
        .collect()
});

static GROUPED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}(?:,\d{3})+(?:\.\d+)?$").expect("Invalid grouped number regex")
});

/// Parse a captured number, dropping thousands separators.
///
/// A comma that is not a thousands separator ("1,5") makes the value
/// unreadable rather than ten times larger.
fn parse_number(raw: &str) -> Option<NutritionValue> {
    let raw = raw.trim_end_matches(',');
    if raw.contains(',') && !GROUPED_NUMBER.is_match(raw) {
        return None;
    }
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(NutritionValue::from_f64)
}

/// First value for `pattern` in `text`, or `None` when no line matches or
/// the matched number does not parse.
fn extract_value(text: &str, pattern: &Regex) -> Option<NutritionValue> {
    let captures = pattern.captures(text)?;
    parse_number(captures.get(1)?.as_str())
}

/// Value for a single nutrient. `net_carbs` is never read from text.
pub fn extract_nutrient(text: &str, key: NutrientKey) -> Option<NutritionValue> {
    NUTRIENT_PATTERNS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .and_then(|(_, pattern)| extract_value(text, pattern))
}

/// Unit the generator is asked to report `key` in.
pub fn nutrient_unit(key: NutrientKey) -> &'static str {
    if key == NutrientKey::NetCarbs {
        return "g";
    }
    NUTRIENT_RULES
        .iter()
        .find(|rule| rule.key == key)
        .map_or("", |rule| rule.unit)
}

/// Every nutrient found in `text`, plus `net_carbs` when both
/// `total_carbs` and `fiber` were found.
pub fn extract_nutrition(text: &str) -> NutritionFacts {
    let mut facts: NutritionFacts = NUTRIENT_PATTERNS
        .iter()
        .filter_map(|(key, pattern)| extract_value(text, pattern).map(|value| (*key, value)))
        .collect();

    if let (Some(&total), Some(&fiber)) = (
        facts.get(&NutrientKey::TotalCarbs),
        facts.get(&NutrientKey::Fiber),
    ) {
        facts.insert(NutrientKey::NetCarbs, total.minus(fiber));
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Option<NutritionValue> {
        Some(NutritionValue::Integer(v))
    }

    #[test]
    fn test_every_rule_compiles() {
        assert_eq!(NUTRIENT_PATTERNS.len(), NUTRIENT_RULES.len());
        assert!(NUTRIENT_RULES.iter().all(|r| r.key != NutrientKey::NetCarbs));
    }

    #[test]
    fn test_integer_and_float_values() {
        let text = "• Protein: 18 g\n• Iron: 2.5 mg\n• Zinc: 3.0 mg";
        assert_eq!(extract_nutrient(text, NutrientKey::Protein), int(18));
        assert_eq!(
            extract_nutrient(text, NutrientKey::Iron),
            Some(NutritionValue::Float(2.5))
        );
        assert_eq!(extract_nutrient(text, NutrientKey::Zinc), int(3));
    }

    #[test]
    fn test_case_insensitive_and_unit_ignored() {
        let text = "calories: 420kcal\nSODIUM: 1,250 mg";
        assert_eq!(extract_nutrient(text, NutrientKey::Calories), int(420));
        assert_eq!(extract_nutrient(text, NutrientKey::Sodium), int(1250));
    }

    #[test]
    fn test_decimal_comma_is_not_a_thousands_separator() {
        assert_eq!(extract_nutrient("Iron: 1,5 mg", NutrientKey::Iron), None);
        assert_eq!(extract_nutrient("Sodium: 12,50 mg", NutrientKey::Sodium), None);
        assert_eq!(
            extract_nutrient("Potassium: 1,234,567.5 mg", NutrientKey::Potassium),
            Some(NutritionValue::Float(1234567.5))
        );
        assert_eq!(
            extract_nutrient("Calories: 350, roughly", NutrientKey::Calories),
            int(350)
        );
    }

    #[test]
    fn test_total_prefix_optional() {
        assert_eq!(extract_nutrient("Carbs: 30 g", NutrientKey::TotalCarbs), int(30));
        assert_eq!(extract_nutrient("Total Carbs: 31 g", NutrientKey::TotalCarbs), int(31));
        assert_eq!(
            extract_nutrient("Total Carbohydrates: 32 g", NutrientKey::TotalCarbs),
            int(32)
        );
        assert_eq!(extract_nutrient("Fat: 12 g", NutrientKey::TotalFat), int(12));
        assert_eq!(extract_nutrient("• Total Fat: 13 g", NutrientKey::TotalFat), int(13));
    }

    #[test]
    fn test_fat_does_not_match_inside_other_fats() {
        let text = "Fats:\n• Saturated Fat: 3 g\n• Trans Fat: 0 g";
        assert_eq!(extract_nutrient(text, NutrientKey::TotalFat), None);
        assert_eq!(extract_nutrient(text, NutrientKey::SaturatedFat), int(3));
        assert_eq!(extract_nutrient(text, NutrientKey::TransFat), int(0));
    }

    #[test]
    fn test_sugar_labels_stay_separate() {
        let text = "• Total Sugars: 9 g\n• Added Sugars: 2 g";
        assert_eq!(extract_nutrient(text, NutrientKey::TotalSugars), int(9));
        assert_eq!(extract_nutrient(text, NutrientKey::AddedSugars), int(2));
    }

    #[test]
    fn test_b_vitamin_aliases() {
        let text = "• Thiamin (B1): 0.3 mg\n• B6: 0.5 mg\n• Vitamin B12: 1.1 mcg\n• Folate (B9): 80 mcg";
        assert_eq!(
            extract_nutrient(text, NutrientKey::Thiamin),
            Some(NutritionValue::Float(0.3))
        );
        assert_eq!(
            extract_nutrient(text, NutrientKey::VitaminB6),
            Some(NutritionValue::Float(0.5))
        );
        assert_eq!(
            extract_nutrient(text, NutrientKey::VitaminB12),
            Some(NutritionValue::Float(1.1))
        );
        assert_eq!(extract_nutrient(text, NutrientKey::Folate), int(80));
    }

    #[test]
    fn test_b1_does_not_match_b12() {
        assert_eq!(extract_nutrient("B12: 2 mcg", NutrientKey::Thiamin), None);
        assert_eq!(
            extract_nutrient("Vitamin B6: 1 mg", NutrientKey::VitaminB6),
            int(1)
        );
    }

    #[test]
    fn test_parenthetical_notes_after_label() {
        assert_eq!(extract_nutrient("Vitamin A (RAE): 90 mcg", NutrientKey::VitaminA), int(90));
        assert_eq!(extract_nutrient("B1 (Thiamin): 1 mg", NutrientKey::Thiamin), int(1));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Calories: 300 kcal\nCalories: 500 kcal";
        assert_eq!(extract_nutrient(text, NutrientKey::Calories), int(300));
    }

    #[test]
    fn test_non_numeric_value_is_absent() {
        assert_eq!(extract_nutrient("Calories: unknown", NutrientKey::Calories), None);
        assert_eq!(extract_nutrient("Sodium: n/a", NutrientKey::Sodium), None);
    }

    #[test]
    fn test_markdown_bold_labels() {
        assert_eq!(extract_nutrient("- **Calories:** 410 kcal", NutrientKey::Calories), int(410));
        assert_eq!(extract_nutrient("**Protein**: 22 g", NutrientKey::Protein), int(22));
    }

    #[test]
    fn test_net_carbs_derived() {
        let facts = extract_nutrition("Total Carbs: 40 g\nFiber: 5 g");
        assert_eq!(facts.get(&NutrientKey::NetCarbs).copied(), int(35));
    }

    #[test]
    fn test_net_carbs_requires_both_inputs() {
        let facts = extract_nutrition("Total Carbs: 40 g");
        assert!(!facts.contains_key(&NutrientKey::NetCarbs));

        let facts = extract_nutrition("Fiber: 5 g");
        assert!(!facts.contains_key(&NutrientKey::NetCarbs));
    }

    #[test]
    fn test_net_carbs_ignores_text_value() {
        let facts = extract_nutrition("Net Carbs: 99 g\nCarbs: 20 g\nFiber: 4.5 g");
        assert_eq!(
            facts.get(&NutrientKey::NetCarbs).copied(),
            Some(NutritionValue::Float(15.5))
        );
    }

    #[test]
    fn test_nutrient_units() {
        assert_eq!(nutrient_unit(NutrientKey::Calories), "kcal");
        assert_eq!(nutrient_unit(NutrientKey::NetCarbs), "g");
        assert_eq!(nutrient_unit(NutrientKey::Selenium), "mcg");
    }

    #[test]
    fn test_empty_text_has_no_nutrients() {
        assert!(extract_nutrition("").is_empty());
    }
}
