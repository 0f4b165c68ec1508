use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::error::GenerateError;
use crate::model::Recipe;

/// Image reference substituted whenever the lookup collaborator fails.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=800";

/// An image-lookup collaborator.
///
/// Failures are never propagated past the orchestrator; it substitutes
/// [`PLACEHOLDER_IMAGE`] instead.
#[async_trait]
pub trait FetchImage: Send + Sync {
    async fn fetch_image(&self, recipe: &Recipe) -> Result<String, GenerateError>;
}

// Curated food photography, indexed by category below.
const FALLBACK_IMAGES: [&str; 12] = [
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1504674900247-0877df9cc836?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe?q=80&w=1374&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1547592180-85f173990554?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1490645935967-10de6ba17061?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1606787366850-de6330128bfc?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1556911073-38141963c9e0?q=80&w=1470&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?q=80&w=1481&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1567620905732-2d1ec7ab7445?q=80&w=1480&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1565958011703-44f9829ba187?q=80&w=1465&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1482049016688-2d84fb2da28d?q=80&w=1470&auto=format&fit=crop",
];

const BREAKFAST_IMAGE: usize = 0;
const SALAD_IMAGE: usize = 2;
const PASTA_IMAGE: usize = 8;
const DESSERT_IMAGE: usize = 9;

/// Local image lookup over a curated photo set.
///
/// Picks a category-appropriate image from the recipe's title, tags, and
/// ingredients, falling back to a random pick. Needs no network access and
/// never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CuratedImageLookup;

impl CuratedImageLookup {
    pub fn new() -> Self {
        CuratedImageLookup
    }

    fn categorized_image(recipe: &Recipe) -> &'static str {
        let title = recipe.title.to_lowercase();
        let tags: Vec<String> = recipe.tags.iter().map(|t| t.to_lowercase()).collect();
        let ingredients: Vec<String> = recipe
            .ingredients
            .iter()
            .map(|i| i.to_lowercase())
            .collect();
        let has_tag = |tag: &str| tags.iter().any(|t| t == tag);
        let ingredient_contains =
            |kw: &str| ingredients.iter().any(|i| i.contains(kw));

        if title.contains("dessert")
            || title.contains("cake")
            || title.contains("cookie")
            || title.contains("sweet")
            || has_tag("dessert")
            || ingredient_contains("sugar")
            || ingredient_contains("chocolate")
        {
            return FALLBACK_IMAGES[DESSERT_IMAGE];
        }

        if title.contains("salad") || has_tag("salad") || has_tag("vegetarian") || has_tag("vegan")
        {
            return FALLBACK_IMAGES[SALAD_IMAGE];
        }

        if title.contains("pasta")
            || title.contains("spaghetti")
            || ingredient_contains("pasta")
            || ingredient_contains("noodle")
        {
            return FALLBACK_IMAGES[PASTA_IMAGE];
        }

        if title.contains("breakfast")
            || has_tag("breakfast")
            || ingredient_contains("egg")
            || ingredient_contains("bacon")
            || ingredient_contains("toast")
        {
            return FALLBACK_IMAGES[BREAKFAST_IMAGE];
        }

        FALLBACK_IMAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_IMAGES[0])
    }
}

#[async_trait]
impl FetchImage for CuratedImageLookup {
    async fn fetch_image(&self, recipe: &Recipe) -> Result<String, GenerateError> {
        Ok(Self::categorized_image(recipe).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NutritionFacts;

    fn recipe(title: &str, tags: &[&str], ingredients: &[&str]) -> Recipe {
        Recipe {
            title: title.to_string(),
            description: "test".to_string(),
            image: String::new(),
            prep_time: "15 minutes".to_string(),
            cook_time: "30 minutes".to_string(),
            servings: 4,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: vec!["Cook".to_string()],
            tags: tags.iter().map(|s| s.to_string()).collect(),
            tips: vec![],
            nutrition_facts: NutritionFacts::estimate(),
        }
    }

    #[test]
    fn test_dessert_category() {
        let r = recipe("Chocolate Cake", &["dessert"], &["2 cups sugar"]);
        assert_eq!(
            CuratedImageLookup::categorized_image(&r),
            FALLBACK_IMAGES[DESSERT_IMAGE]
        );
    }

    #[test]
    fn test_salad_category_from_tag() {
        let r = recipe("Green Bowl", &["vegan"], &["lettuce"]);
        assert_eq!(
            CuratedImageLookup::categorized_image(&r),
            FALLBACK_IMAGES[SALAD_IMAGE]
        );
    }

    #[test]
    fn test_pasta_category_from_ingredient() {
        let r = recipe("Weeknight Dinner", &["italian"], &["1 pound pasta"]);
        assert_eq!(
            CuratedImageLookup::categorized_image(&r),
            FALLBACK_IMAGES[PASTA_IMAGE]
        );
    }

    #[test]
    fn test_breakfast_category_from_egg() {
        let r = recipe("Morning Scramble", &["quick"], &["3 eggs"]);
        assert_eq!(
            CuratedImageLookup::categorized_image(&r),
            FALLBACK_IMAGES[BREAKFAST_IMAGE]
        );
    }

    #[test]
    fn test_uncategorized_still_returns_a_known_image() {
        let r = recipe("Mystery Dish", &["homemade"], &["tofu"]);
        let image = CuratedImageLookup::categorized_image(&r);
        assert!(FALLBACK_IMAGES.contains(&image));
    }

    #[tokio::test]
    async fn test_fetch_image_never_fails() {
        let r = recipe("Anything", &[], &[]);
        let result = CuratedImageLookup::new().fetch_image(&r).await;
        assert!(result.is_ok());
    }
}
