use crate::model::RecipeRequest;

/// The JSON schema block appended to every generation prompt.
///
/// The JSON Recovery Extractor depends on exactly these field names, so the
/// schema is spelled out verbatim rather than described.
pub const RECIPE_SCHEMA_PROMPT: &str = r#" The JSON object should have the following structure exactly:
{
  "title": "Recipe Title",
  "description": "Brief description of the recipe",
  "prepTime": "Preparation time",
  "cookTime": "Cooking time",
  "servings": number of servings,
  "ingredients": ["ingredient 1", "ingredient 2", ...],
  "instructions": ["step 1", "step 2", ...],
  "tags": ["tag1", "tag2", ...],
  "tips": ["tip 1", "tip 2", ...],
  "nutritionFacts": {
    "calories": "calorie info",
    "protein": "protein info",
    "carbs": "carbs info",
    "fat": "fat info"
  }
}

Do not include any explanations, notes, or text outside of the JSON object. Return only valid JSON."#;

/// Render a generation request into a single instruction string.
///
/// Deterministic: the same request always produces the same prompt. Each
/// optional parameter contributes one constraining sentence only when
/// present.
pub fn build_prompt(request: &RecipeRequest) -> String {
    let mut prompt = format!(
        "Return ONLY a JSON object with no additional text before or after. \
         The JSON should contain a recipe using these ingredients: {}.",
        request.ingredients
    );

    if let Some(cuisine) = &request.cuisine {
        prompt.push_str(&format!(" The cuisine should be {}.", cuisine));
    }

    if !request.dietary.is_empty() {
        prompt.push_str(&format!(
            " The recipe should be {}.",
            request.dietary.join(", ")
        ));
    }

    if let Some(meal_type) = &request.meal_type {
        prompt.push_str(&format!(" This should be a {} recipe.", meal_type));
    }

    if let Some(extra) = &request.additional_instructions {
        prompt.push_str(&format!(" Additional instructions: {}.", extra));
    }

    prompt.push_str(RECIPE_SCHEMA_PROMPT);
    prompt
}
