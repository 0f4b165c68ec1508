use serde_json::Value;

use crate::model::{NutritionFacts, Recipe, RecipeRequest};

/// The defaulted record every recovery stage degrades toward.
///
/// Title/description name the requested ingredients, the ingredient list is
/// the request's own list, and timing/servings/nutrition carry the generic
/// estimates. Everything here satisfies the record invariants on its own.
pub(crate) fn baseline(request: &RecipeRequest) -> Recipe {
    let mut ingredients = request.ingredient_list();
    if ingredients.is_empty() {
        ingredients.push(request.ingredients.trim().to_string());
    }

    Recipe {
        title: format!("Recipe with {}", request.ingredients),
        description: format!("A delicious recipe using {}", request.ingredients),
        image: String::new(),
        prep_time: "15 minutes".to_string(),
        cook_time: "30 minutes".to_string(),
        servings: 4,
        ingredients,
        instructions: vec![
            "Cook the ingredients".to_string(),
            "Serve and enjoy".to_string(),
        ],
        tags: vec![
            request.cuisine.clone().unwrap_or_else(|| "homemade".to_string()),
            request
                .meal_type
                .clone()
                .unwrap_or_else(|| "main dish".to_string()),
        ],
        tips: vec!["Use fresh ingredients for best results".to_string()],
        nutrition_facts: NutritionFacts::estimate(),
    }
}

/// Normalize a parsed object of unknown shape into a fully valid [`Recipe`].
///
/// For every field, a present value of the expected shape is used verbatim;
/// anything missing or mis-shaped is replaced by the request-derived
/// default. Never fails, whatever the input looks like.
pub fn normalize(data: &Value, request: &RecipeRequest) -> Recipe {
    let defaults = baseline(request);

    Recipe {
        title: non_empty_string(&data["title"]).unwrap_or(defaults.title),
        description: non_empty_string(&data["description"]).unwrap_or(defaults.description),
        image: String::new(),
        prep_time: non_empty_string(&data["prepTime"]).unwrap_or(defaults.prep_time),
        cook_time: non_empty_string(&data["cookTime"]).unwrap_or(defaults.cook_time),
        servings: coerce_servings(&data["servings"]).unwrap_or(defaults.servings),
        ingredients: string_array(&data["ingredients"]).unwrap_or(defaults.ingredients),
        instructions: string_array(&data["instructions"]).unwrap_or(defaults.instructions),
        tags: string_array(&data["tags"]).unwrap_or(defaults.tags),
        tips: string_array(&data["tips"]).unwrap_or(defaults.tips),
        nutrition_facts: nutrition(&data["nutritionFacts"]).unwrap_or(defaults.nutrition_facts),
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Positive integer, accepting JSON numbers and numeric strings.
fn coerce_servings(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if number >= 1.0 && number.is_finite() {
        Some(number as u32)
    } else {
        None
    }
}

/// A non-empty array of non-empty strings; anything else is mis-shaped.
fn string_array(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .as_array()?
        .iter()
        .filter_map(non_empty_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn nutrition(value: &Value) -> Option<NutritionFacts> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
