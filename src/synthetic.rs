use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{NutritionFacts, Recipe, RecipeRequest};

const MEASUREMENTS: [&str; 6] = ["cup", "tablespoon", "teaspoon", "pound", "ounce", "gram"];

/// Fabricate a complete recipe from the request alone, without any remote
/// model involvement.
///
/// Content is rule-based: titles, times, instructions, tips, and tags are
/// all conditioned on which request fields are present and on keyword
/// matches against the ingredient names. Only the quantity and unit chosen
/// for each ingredient are randomized, which is why the random source is an
/// explicit parameter. This function never fails.
pub fn synthesize<R: Rng + ?Sized>(request: &RecipeRequest, rng: &mut R) -> Recipe {
    let ingredient_list = non_empty_ingredients(request);
    let main_ingredient = ingredient_list[0].clone();

    let title = build_title(request, &main_ingredient);
    let description = build_description(request, &main_ingredient);
    let (prep_time, cook_time) = cooking_times(request.meal_type.as_deref());
    let instructions = build_instructions(&ingredient_list, request);
    let tips = build_tips(&ingredient_list, request);
    let tags = build_tags(request, &ingredient_list, &main_ingredient);

    Recipe {
        title,
        description,
        image: String::new(),
        prep_time,
        cook_time,
        servings: 4,
        ingredients: ingredient_list
            .iter()
            .map(|item| format_ingredient(item, rng))
            .collect(),
        instructions,
        tags,
        tips,
        nutrition_facts: NutritionFacts::estimate(),
    }
}

fn non_empty_ingredients(request: &RecipeRequest) -> Vec<String> {
    let mut list = request.ingredient_list();
    if list.is_empty() {
        list.push(request.ingredients.trim().to_string());
    }
    list
}

fn build_title(request: &RecipeRequest, main_ingredient: &str) -> String {
    let main = title_case(main_ingredient);
    match (request.cuisine.as_deref(), request.meal_type.as_deref()) {
        (Some(cuisine), Some(meal_type)) => {
            format!("{} {} with {}", title_case(cuisine), title_case(meal_type), main)
        }
        (Some(cuisine), None) => format!("{}-Style {} Dish", title_case(cuisine), main),
        (None, Some(meal_type)) => format!("{} {}", main, title_case(meal_type)),
        (None, None) => format!("{} Delight", main),
    }
}

fn build_description(request: &RecipeRequest, main_ingredient: &str) -> String {
    let mut description = String::from("A delicious");
    if !request.dietary.is_empty() {
        description.push_str(&format!(" {}", request.dietary.join(", ")));
    }
    if let Some(cuisine) = &request.cuisine {
        description.push_str(&format!(" {}-inspired", cuisine));
    }
    if let Some(meal_type) = &request.meal_type {
        description.push_str(&format!(" {}", meal_type));
    }
    description.push_str(&format!(
        " featuring {} and complementary ingredients.",
        main_ingredient
    ));
    if let Some(extra) = &request.additional_instructions {
        description.push_str(&format!(" {}.", extra));
    }
    description
}

/// Prep and cook time lookup keyed by meal type.
fn cooking_times(meal_type: Option<&str>) -> (String, String) {
    let (prep, cook) = match meal_type.map(str::to_lowercase).as_deref() {
        Some("breakfast") => ("10 minutes", "15 minutes"),
        Some("dessert") => ("20 minutes", "25 minutes"),
        Some("dinner") => ("20 minutes", "40 minutes"),
        _ => ("15 minutes", "30 minutes"),
    };
    (prep.to_string(), cook.to_string())
}

/// Reformat a bare ingredient name with a fabricated quantity.
///
/// Seasonings get "to taste", liquids get tablespoons, everything else a
/// random unit from the measurement table.
fn format_ingredient<R: Rng + ?Sized>(ingredient: &str, rng: &mut R) -> String {
    let lower = ingredient.to_lowercase();
    let seasoning = ["salt", "pepper", "spice", "herb"];
    let liquid = ["oil", "sauce", "vinegar"];

    if seasoning.iter().any(|kw| lower.contains(kw)) {
        return format!("{} - to taste", ingredient);
    }

    let amount = rng.gen_range(1..=3);
    if liquid.iter().any(|kw| lower.contains(kw)) {
        let unit = if amount == 1 { "tablespoon" } else { "tablespoons" };
        format!("{} {} {}", amount, unit, ingredient)
    } else {
        // MEASUREMENTS is non-empty, choose cannot return None
        let unit = MEASUREMENTS.choose(rng).copied().unwrap_or("cup");
        if amount == 1 {
            format!("{} {} {}", amount, unit, ingredient)
        } else {
            format!("{} {}s {}", amount, unit, ingredient)
        }
    }
}

fn build_instructions(ingredients: &[String], request: &RecipeRequest) -> Vec<String> {
    let main_ingredient = &ingredients[0];
    let cuisine = request.cuisine.as_deref().map(str::to_lowercase);
    let meal_type = request.meal_type.as_deref().map(str::to_lowercase);

    let prep_list = ingredients
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let mut instructions = vec![format!(
        "Prepare all ingredients: wash and chop {} as needed.",
        prep_list
    )];

    instructions.push(match cuisine.as_deref() {
        Some("italian") => "Heat olive oil in a large pan over medium heat.".to_string(),
        Some("asian") | Some("chinese") | Some("japanese") | Some("thai") => {
            "Heat a wok or large skillet over high heat.".to_string()
        }
        Some("indian") => {
            "In a large pot, heat ghee or oil over medium heat and add your spices to bloom."
                .to_string()
        }
        _ => "Heat a large pan over medium heat with a bit of oil or butter.".to_string(),
    });

    instructions.push(format!(
        "Add {} to the pan and cook until {}.",
        main_ingredient,
        cooking_state(main_ingredient)
    ));

    if ingredients.len() > 1 {
        let rest = ingredients[1..ingredients.len().min(4)].join(", ");
        instructions.push(format!(
            "Add {} and continue cooking for another 5-7 minutes, stirring occasionally.",
            rest
        ));
    }

    instructions.push("Season with salt, pepper, and your preferred herbs or spices.".to_string());

    let brothy = ingredients
        .iter()
        .any(|i| i.contains("broth") || i.contains("stock"));
    if meal_type.as_deref() == Some("soup") || brothy {
        instructions.push(
            "Add broth or water, bring to a boil, then reduce heat and simmer for 15-20 minutes."
                .to_string(),
        );
        instructions.push("Serve hot with your favorite garnishes.".to_string());
    } else if meal_type.as_deref() == Some("salad") {
        instructions.push("Toss all ingredients together in a large bowl.".to_string());
        instructions.push("Drizzle with dressing and serve immediately.".to_string());
    } else if meal_type.as_deref() == Some("dessert") {
        instructions.push("Mix all ingredients until well combined.".to_string());
        instructions.push(
            "Bake at 350°F (175°C) for 25-30 minutes or until golden brown.".to_string(),
        );
        instructions.push("Allow to cool before serving.".to_string());
    } else {
        instructions.push(
            "Cook until all ingredients are properly cooked through and flavors have melded together."
                .to_string(),
        );
        instructions.push("Serve hot and enjoy your delicious meal!".to_string());
    }

    instructions
}

/// Doneness wording keyed by the main ingredient's name.
fn cooking_state(ingredient: &str) -> &'static str {
    let lower = ingredient.to_lowercase();
    if ["chicken", "beef", "pork", "meat"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        "browned and cooked through"
    } else if ["onion", "garlic", "shallot"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        "translucent and fragrant"
    } else if ["vegetable", "pepper", "carrot"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        "slightly softened but still crisp"
    } else if ["rice", "pasta", "grain"].iter().any(|kw| lower.contains(kw)) {
        "cooked according to package instructions"
    } else {
        "properly cooked"
    }
}

fn build_tips(ingredients: &[String], request: &RecipeRequest) -> Vec<String> {
    let mut tips = vec![
        "Adjust seasoning to taste before serving.".to_string(),
        "For best results, use fresh ingredients whenever possible.".to_string(),
    ];

    let contains = |keywords: &[&str]| {
        ingredients.iter().any(|item| {
            let lower = item.to_lowercase();
            keywords.iter().any(|kw| lower.contains(kw))
        })
    };

    if contains(&["meat", "chicken", "beef", "pork"]) {
        tips.push("Let meat rest for 5 minutes before serving for juicier results.".to_string());
    }
    if contains(&["garlic", "onion"]) {
        tips.push("Don't burn the garlic or onions as they can become bitter.".to_string());
    }

    match request.cuisine.as_deref().map(str::to_lowercase).as_deref() {
        Some("italian") => tips.push(
            "For authentic Italian flavor, finish with a drizzle of high-quality olive oil and fresh basil."
                .to_string(),
        ),
        Some("mexican") => {
            tips.push("Serve with fresh lime wedges to brighten the flavors.".to_string())
        }
        Some("indian") => tips.push(
            "Blooming spices in hot oil at the beginning enhances their flavor significantly."
                .to_string(),
        ),
        _ => {}
    }

    let dietary_has =
        |tag: &str| request.dietary.iter().any(|d| d.eq_ignore_ascii_case(tag));
    if dietary_has("vegetarian") || dietary_has("vegan") {
        tips.push(
            "Add nutritional yeast for a savory, cheese-like flavor that's plant-based."
                .to_string(),
        );
    }
    if dietary_has("gluten-free") {
        tips.push(
            "Always check packaged ingredients to ensure they're certified gluten-free."
                .to_string(),
        );
    }

    tips
}

fn build_tags(
    request: &RecipeRequest,
    ingredients: &[String],
    main_ingredient: &str,
) -> Vec<String> {
    let mut tags = vec![
        request
            .cuisine
            .clone()
            .unwrap_or_else(|| "homemade".to_string()),
        request
            .meal_type
            .clone()
            .unwrap_or_else(|| "main dish".to_string()),
    ];
    tags.extend(request.dietary.iter().cloned());
    tags.push(format!("{}-based", main_ingredient));
    let complexity = if ingredients.len() <= 5 { "simple" } else { "complex" };
    tags.push(complexity.to_string());
    tags.push("quick".to_string());
    tags
}

/// Title-case each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("chicken breast"), "Chicken Breast");
        assert_eq!(title_case("tofu"), "Tofu");
    }

    #[test]
    fn test_title_variants() {
        let mut request = RecipeRequest::new("chicken, rice");
        assert_eq!(
            build_title(&request, "chicken"),
            "Chicken Delight"
        );

        request.meal_type = Some("dinner".to_string());
        assert_eq!(build_title(&request, "chicken"), "Chicken Dinner");

        request.cuisine = Some("indian".to_string());
        assert_eq!(
            build_title(&request, "chicken"),
            "Indian Dinner with Chicken"
        );

        request.meal_type = None;
        assert_eq!(build_title(&request, "chicken"), "Indian-Style Chicken Dish");
    }

    #[test]
    fn test_cooking_times_table() {
        assert_eq!(
            cooking_times(Some("breakfast")),
            ("10 minutes".to_string(), "15 minutes".to_string())
        );
        assert_eq!(
            cooking_times(Some("dessert")),
            ("20 minutes".to_string(), "25 minutes".to_string())
        );
        assert_eq!(
            cooking_times(Some("dinner")),
            ("20 minutes".to_string(), "40 minutes".to_string())
        );
        assert_eq!(
            cooking_times(None),
            ("15 minutes".to_string(), "30 minutes".to_string())
        );
    }

    #[test]
    fn test_seasonings_are_to_taste() {
        assert_eq!(
            format_ingredient("sea salt", &mut rng()),
            "sea salt - to taste"
        );
        assert_eq!(
            format_ingredient("black pepper", &mut rng()),
            "black pepper - to taste"
        );
    }

    #[test]
    fn test_liquids_use_tablespoons() {
        let formatted = format_ingredient("soy sauce", &mut rng());
        assert!(
            formatted.ends_with("tablespoon soy sauce")
                || formatted.ends_with("tablespoons soy sauce"),
            "unexpected format: {}",
            formatted
        );
    }

    #[test]
    fn test_other_ingredients_get_quantity_and_unit() {
        let formatted = format_ingredient("rice", &mut rng());
        let amount: u32 = formatted
            .split(' ')
            .next()
            .and_then(|a| a.parse().ok())
            .unwrap();
        assert!((1..=3).contains(&amount));
        assert!(formatted.ends_with("rice"));
    }

    #[test]
    fn test_cooking_state_keywords() {
        assert_eq!(cooking_state("chicken thighs"), "browned and cooked through");
        assert_eq!(cooking_state("red onion"), "translucent and fragrant");
        assert_eq!(cooking_state("bell pepper"), "slightly softened but still crisp");
        assert_eq!(cooking_state("basmati rice"), "cooked according to package instructions");
        assert_eq!(cooking_state("tofu"), "properly cooked");
    }

    #[test]
    fn test_indian_dinner_synthesis() {
        let request = RecipeRequest {
            ingredients: "chicken, rice".to_string(),
            cuisine: Some("indian".to_string()),
            meal_type: Some("dinner".to_string()),
            ..Default::default()
        };

        let recipe = synthesize(&request, &mut rng());
        assert!(recipe.title.contains("Indian"));
        assert!(recipe.title.contains("Dinner"));
        assert!(recipe.title.contains("Chicken"));
        assert_eq!(recipe.prep_time, "20 minutes");
        assert_eq!(recipe.cook_time, "40 minutes");
        assert!(recipe
            .instructions
            .iter()
            .any(|step| step.contains("ghee") && step.contains("bloom")));
    }

    #[test]
    fn test_soup_path_from_broth_ingredient() {
        let request = RecipeRequest::new("chicken, vegetable broth");
        let recipe = synthesize(&request, &mut rng());
        assert!(recipe
            .instructions
            .iter()
            .any(|step| step.contains("simmer for 15-20 minutes")));
    }

    #[test]
    fn test_tags_cover_request_fields() {
        let request = RecipeRequest {
            ingredients: "tofu, rice, peas".to_string(),
            cuisine: Some("chinese".to_string()),
            dietary: vec!["vegan".to_string()],
            meal_type: Some("lunch".to_string()),
            ..Default::default()
        };

        let recipe = synthesize(&request, &mut rng());
        assert_eq!(
            recipe.tags,
            vec!["chinese", "lunch", "vegan", "tofu-based", "simple", "quick"]
        );
    }

    #[test]
    fn test_complex_tag_above_five_ingredients() {
        let request = RecipeRequest::new("a, b, c, d, e, f");
        let recipe = synthesize(&request, &mut rng());
        assert!(recipe.tags.contains(&"complex".to_string()));
    }

    #[test]
    fn test_dietary_and_cuisine_tips() {
        let request = RecipeRequest {
            ingredients: "chicken, garlic".to_string(),
            cuisine: Some("indian".to_string()),
            dietary: vec!["gluten-free".to_string()],
            ..Default::default()
        };

        let recipe = synthesize(&request, &mut rng());
        assert!(recipe.tips.iter().any(|t| t.contains("rest for 5 minutes")));
        assert!(recipe.tips.iter().any(|t| t.contains("burn the garlic")));
        assert!(recipe.tips.iter().any(|t| t.contains("Blooming spices")));
        assert!(recipe.tips.iter().any(|t| t.contains("gluten-free")));
    }

    #[test]
    fn test_stable_apart_from_randomized_quantities() {
        let request = RecipeRequest {
            ingredients: "beef, noodles, scallions".to_string(),
            cuisine: Some("thai".to_string()),
            meal_type: Some("dinner".to_string()),
            ..Default::default()
        };

        let first = synthesize(&request, &mut StdRng::seed_from_u64(1));
        let second = synthesize(&request, &mut StdRng::seed_from_u64(2));

        assert_eq!(first.title, second.title);
        assert_eq!(first.description, second.description);
        assert_eq!(first.instructions, second.instructions);
        assert_eq!(first.tags, second.tags);
        assert_eq!(first.tips, second.tips);
        assert_eq!(first.ingredients.len(), second.ingredients.len());
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let request = RecipeRequest::new("mushrooms, cream");
        let first = synthesize(&request, &mut StdRng::seed_from_u64(42));
        let second = synthesize(&request, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
