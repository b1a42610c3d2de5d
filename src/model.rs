use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_TITLE: &str = "Generated Recipe";
pub const DEFAULT_PREP_TIME: &str = "15";
pub const DEFAULT_COOK_TIME: &str = "20";
pub const DEFAULT_SERVINGS: u32 = 4;

/// Scalar header fields of a generated recipe.
///
/// Every field is always populated; values that could not be found in the
/// response text fall back to the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    pub title: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
}

impl Default for RecipeMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            prep_time: DEFAULT_PREP_TIME.to_string(),
            cook_time: DEFAULT_COOK_TIME.to_string(),
            servings: DEFAULT_SERVINGS,
        }
    }
}

/// Free-text blocks of a generated recipe, kept verbatim (bullets and
/// numbering included). Missing sections are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeSections {
    pub ingredients: String,
    pub spices: String,
    pub instructions: String,
}

/// Canonical nutrient names used as keys of [`NutritionFacts`].
///
/// Declaration order is the serialization order of the nutrition map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    Calories,
    Protein,
    TotalCarbs,
    NetCarbs,
    Fiber,
    TotalFat,
    SaturatedFat,
    MonounsaturatedFat,
    PolyunsaturatedFat,
    TransFat,
    Cholesterol,
    TotalSugars,
    AddedSugars,
    Sodium,
    Potassium,
    Calcium,
    Iron,
    Magnesium,
    Zinc,
    Selenium,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    Thiamin,
    Riboflavin,
    Niacin,
    VitaminB6,
    VitaminB12,
    Folate,
}

impl NutrientKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::Calories => "calories",
            NutrientKey::Protein => "protein",
            NutrientKey::TotalCarbs => "total_carbs",
            NutrientKey::NetCarbs => "net_carbs",
            NutrientKey::Fiber => "fiber",
            NutrientKey::TotalFat => "total_fat",
            NutrientKey::SaturatedFat => "saturated_fat",
            NutrientKey::MonounsaturatedFat => "monounsaturated_fat",
            NutrientKey::PolyunsaturatedFat => "polyunsaturated_fat",
            NutrientKey::TransFat => "trans_fat",
            NutrientKey::Cholesterol => "cholesterol",
            NutrientKey::TotalSugars => "total_sugars",
            NutrientKey::AddedSugars => "added_sugars",
            NutrientKey::Sodium => "sodium",
            NutrientKey::Potassium => "potassium",
            NutrientKey::Calcium => "calcium",
            NutrientKey::Iron => "iron",
            NutrientKey::Magnesium => "magnesium",
            NutrientKey::Zinc => "zinc",
            NutrientKey::Selenium => "selenium",
            NutrientKey::VitaminA => "vitamin_a",
            NutrientKey::VitaminC => "vitamin_c",
            NutrientKey::VitaminD => "vitamin_d",
            NutrientKey::VitaminE => "vitamin_e",
            NutrientKey::VitaminK => "vitamin_k",
            NutrientKey::Thiamin => "thiamin",
            NutrientKey::Riboflavin => "riboflavin",
            NutrientKey::Niacin => "niacin",
            NutrientKey::VitaminB6 => "vitamin_b6",
            NutrientKey::VitaminB12 => "vitamin_b12",
            NutrientKey::Folate => "folate",
        }
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A nutrient amount as stated by the generator: whole numbers stay
/// integers, anything with a fractional part is a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutritionValue {
    Integer(i64),
    Float(f64),
}

impl NutritionValue {
    /// Integer when `value` has no fractional part, float otherwise.
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            NutritionValue::Integer(value as i64)
        } else {
            NutritionValue::Float(value)
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            NutritionValue::Integer(v) => v as f64,
            NutritionValue::Float(v) => v,
        }
    }

    /// Difference `self - other`, staying integral when both sides are.
    pub fn minus(self, other: NutritionValue) -> NutritionValue {
        match (self, other) {
            (NutritionValue::Integer(a), NutritionValue::Integer(b)) => a
                .checked_sub(b)
                .map(NutritionValue::Integer)
                .unwrap_or_else(|| NutritionValue::from_f64(a as f64 - b as f64)),
            (a, b) => NutritionValue::from_f64(a.as_f64() - b.as_f64()),
        }
    }
}

impl fmt::Display for NutritionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutritionValue::Integer(v) => write!(f, "{v}"),
            NutritionValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Nutrients that were found in the response. Keys that could not be
/// located are absent rather than zero.
pub type NutritionFacts = BTreeMap<NutrientKey, NutritionValue>;

/// Structured form of one generator response.
///
/// Serializes flat: `title, prep_time, cook_time, servings, ingredients,
/// spices, instructions, nutrition, full_text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    #[serde(flatten)]
    pub metadata: RecipeMetadata,
    #[serde(flatten)]
    pub sections: RecipeSections,
    #[serde(default)]
    pub nutrition: NutritionFacts,
    /// The untouched response, for display when extraction was incomplete.
    #[serde(default)]
    pub full_text: String,
}

/// Food item submitted by the tracker UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub calories: i64,
}
