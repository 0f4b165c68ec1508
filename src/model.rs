use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A fully populated recipe record.
///
/// Field names serialize in camelCase to match the JSON schema the prompt
/// instructs the model to return. After normalization every field is
/// populated: `title` and `description` are non-empty, `ingredients` and
/// `instructions` contain at least one entry, and `servings` is positive.
/// `image` is filled in by the image collaborator as the last pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub nutrition_facts: NutritionFacts,
}

/// Per-serving nutrition estimates as human-readable strings.
///
/// Models occasionally return extra keys (fiber, sodium, ...); those are
/// kept in `extra` rather than discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionFacts {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for NutritionFacts {
    fn default() -> Self {
        NutritionFacts::estimate()
    }
}

impl NutritionFacts {
    /// The fixed estimate block used whenever no real values are available.
    pub fn estimate() -> Self {
        NutritionFacts {
            calories: "Approximately 350-450 per serving".to_string(),
            protein: "15-25g per serving".to_string(),
            carbs: "30-45g per serving".to_string(),
            fat: "10-20g per serving".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Parameters for a single generation request. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct RecipeRequest {
    /// Comma-separated free-text ingredient list. Must not be empty.
    pub ingredients: String,
    pub cuisine: Option<String>,
    /// Dietary tags such as "vegetarian", "gluten-free", "keto".
    pub dietary: Vec<String>,
    pub meal_type: Option<String>,
    pub additional_instructions: Option<String>,
    /// Skip the remote call entirely and synthesize locally.
    pub force_fallback: bool,
}

impl RecipeRequest {
    pub fn new(ingredients: impl Into<String>) -> Self {
        RecipeRequest {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    /// The request's ingredients split on commas, trimmed, empties dropped.
    pub fn ingredient_list(&self) -> Vec<String> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    }

    /// First listed ingredient, or the raw string when splitting finds none.
    pub fn main_ingredient(&self) -> String {
        self.ingredient_list()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.ingredients.trim().to_string())
    }
}

/// Which recovery stage produced the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSource {
    /// Strict or repaired JSON from the model parsed successfully.
    JsonRecovered,
    /// JSON recovery failed; labeled sections were extracted from raw text.
    TextRecovered,
    /// Remote generation was skipped or failed; recipe was fabricated locally.
    Synthesized,
}

impl RecipeSource {
    /// True when the recipe did not come from the remote model at all.
    pub fn is_fallback(&self) -> bool {
        matches!(self, RecipeSource::Synthesized)
    }
}

/// A completed recipe together with its provenance.
#[derive(Debug, Clone)]
pub struct GeneratedRecipe {
    pub recipe: Recipe,
    pub source: RecipeSource,
}
