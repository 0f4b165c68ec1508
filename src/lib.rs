pub mod config;
pub mod error;
pub mod generator;
pub mod images;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod recovery;
pub mod synthetic;

pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use generator::{RecipeGenerator, RecipeGeneratorBuilder};
pub use images::{CuratedImageLookup, FetchImage, PLACEHOLDER_IMAGE};
pub use model::{GeneratedRecipe, NutritionFacts, Recipe, RecipeRequest, RecipeSource};
pub use providers::{CohereProvider, GenerateText};

/// Generate a recipe with a generator built from configuration.
///
/// Convenience wrapper over [`RecipeGenerator::builder`]. The pipeline
/// itself always completes; the only errors here come from building the
/// generator (missing API key, malformed configuration).
///
/// # Example
/// ```no_run
/// # use recipe_forge::{generate_recipe, RecipeRequest};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut request = RecipeRequest::new("chicken, rice, peas");
/// request.cuisine = Some("indian".to_string());
///
/// let generated = generate_recipe(&request).await?;
/// println!("{}", generated.recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(
    request: &RecipeRequest,
) -> Result<GeneratedRecipe, GenerateError> {
    let generator = RecipeGenerator::builder().build()?;
    Ok(generator.generate(request).await)
}
