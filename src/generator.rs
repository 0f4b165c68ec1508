use log::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::images::{CuratedImageLookup, FetchImage, PLACEHOLDER_IMAGE};
use crate::model::{GeneratedRecipe, Recipe, RecipeRequest, RecipeSource};
use crate::prompt::build_prompt;
use crate::providers::{CohereProvider, GenerateText};
use crate::recovery;
use crate::synthetic;

/// The top-level generation pipeline.
///
/// Sequences remote generation, the ordered recovery stages, local
/// synthesis, and image attachment. Every request-scoped value is owned by
/// the call; the generator itself only holds the two collaborators and can
/// serve requests concurrently.
pub struct RecipeGenerator {
    provider: Box<dyn GenerateText>,
    images: Box<dyn FetchImage>,
}

impl RecipeGenerator {
    /// Creates a new builder for configuring a generator
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_forge::RecipeGenerator;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let generator = RecipeGenerator::builder()
    ///     .api_key("your-api-key")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> RecipeGeneratorBuilder {
        RecipeGeneratorBuilder::default()
    }

    /// Run the full pipeline for one request.
    ///
    /// Always returns a complete recipe: remote failures degrade to local
    /// synthesis and image failures degrade to the placeholder reference.
    /// The returned source records which stage produced the recipe.
    pub async fn generate(&self, request: &RecipeRequest) -> GeneratedRecipe {
        let (mut recipe, source) = if request.force_fallback {
            info!("forced fallback mode, using local recipe generator");
            (self.synthesize(request), RecipeSource::Synthesized)
        } else {
            match self.remote_attempt(request).await {
                Ok((recipe, source)) => {
                    info!("recipe recovered via {:?}", source);
                    (recipe, source)
                }
                Err(err) => {
                    if err.is_remote_unavailable() {
                        warn!("remote generation failed ({}), using local recipe generator", err);
                    } else {
                        warn!("recovery exhausted ({}), using local recipe generator", err);
                    }
                    (self.synthesize(request), RecipeSource::Synthesized)
                }
            }
        };

        recipe.image = match self.images.fetch_image(&recipe).await {
            Ok(image) => image,
            Err(err) => {
                warn!("image lookup failed ({}), using placeholder", err);
                PLACEHOLDER_IMAGE.to_string()
            }
        };

        GeneratedRecipe { recipe, source }
    }

    async fn remote_attempt(
        &self,
        request: &RecipeRequest,
    ) -> Result<(Recipe, RecipeSource), GenerateError> {
        let prompt = build_prompt(request);
        let raw = self.provider.generate(&prompt).await?;
        debug!("raw {} output: {}", self.provider.provider_name(), raw);
        recovery::recover_any(&raw, request)
    }

    fn synthesize(&self, request: &RecipeRequest) -> Recipe {
        synthetic::synthesize(request, &mut rand::thread_rng())
    }
}

/// Builder for configuring a [`RecipeGenerator`].
///
/// Without an explicit provider, one is constructed from configuration
/// (config.toml + RECIPE_FORGE__* environment variables), with the builder's
/// `api_key`/`model` taking precedence. The curated local image lookup is
/// the default image collaborator.
#[derive(Default)]
pub struct RecipeGeneratorBuilder {
    provider: Option<Box<dyn GenerateText>>,
    images: Option<Box<dyn FetchImage>>,
    api_key: Option<String>,
    model: Option<String>,
}

impl RecipeGeneratorBuilder {
    /// Use a specific text-generation collaborator
    pub fn provider(mut self, provider: Box<dyn GenerateText>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use a specific image-lookup collaborator
    pub fn images(mut self, images: Box<dyn FetchImage>) -> Self {
        self.images = Some(images);
        self
    }

    /// Set the API key directly instead of relying on configuration
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the generation provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build the generator
    ///
    /// # Errors
    /// Returns `GenerateError` if configuration loading fails or no API key
    /// is available for the default provider.
    pub fn build(self) -> Result<RecipeGenerator, GenerateError> {
        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                let mut config = GeneratorConfig::load()?;
                if let Some(key) = self.api_key {
                    config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    config.model = model;
                }
                Box::new(CohereProvider::from_config(&config)?)
            }
        };

        let images = self
            .images
            .unwrap_or_else(|| Box::new(CuratedImageLookup::new()));

        Ok(RecipeGenerator { provider, images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedProvider(Result<String, ()>);

    #[async_trait]
    impl GenerateText for CannedProvider {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(GenerateError::Remote {
                    status: 500,
                    body: "server error".to_string(),
                }),
            }
        }
    }

    struct FailingImages;

    #[async_trait]
    impl FetchImage for FailingImages {
        async fn fetch_image(&self, _recipe: &Recipe) -> Result<String, GenerateError> {
            Err(GenerateError::ImageLookup("service down".to_string()))
        }
    }

    fn generator(provider: CannedProvider) -> RecipeGenerator {
        RecipeGenerator {
            provider: Box::new(provider),
            images: Box::new(CuratedImageLookup::new()),
        }
    }

    #[tokio::test]
    async fn test_json_recovery_path() {
        let raw = r#"{"title": "Garlic Noodles", "servings": 2,
            "ingredients": ["8 oz noodles", "4 cloves garlic"],
            "instructions": ["Boil noodles", "Toss with garlic"]}"#;
        let generator = generator(CannedProvider(Ok(raw.to_string())));

        let generated = generator
            .generate(&RecipeRequest::new("noodles, garlic"))
            .await;

        assert_eq!(generated.source, RecipeSource::JsonRecovered);
        assert_eq!(generated.recipe.title, "Garlic Noodles");
        assert!(!generated.recipe.image.is_empty());
    }

    #[tokio::test]
    async fn test_text_recovery_path() {
        let raw = "Title: Garlic Noodles\nIngredients:\n- noodles\n- garlic\nInstructions:\n1. Boil\n2. Toss";
        let generator = generator(CannedProvider(Ok(raw.to_string())));

        let generated = generator
            .generate(&RecipeRequest::new("noodles, garlic"))
            .await;

        assert_eq!(generated.source, RecipeSource::TextRecovered);
        assert_eq!(generated.recipe.title, "Garlic Noodles");
    }

    #[tokio::test]
    async fn test_remote_failure_synthesizes() {
        let generator = generator(CannedProvider(Err(())));

        let generated = generator
            .generate(&RecipeRequest::new("chicken, rice"))
            .await;

        assert_eq!(generated.source, RecipeSource::Synthesized);
        assert!(generated.source.is_fallback());
        assert!(!generated.recipe.title.is_empty());
        assert!(!generated.recipe.instructions.is_empty());
    }

    #[tokio::test]
    async fn test_content_free_output_synthesizes() {
        let generator = generator(CannedProvider(Ok(
            "I'm sorry, I cannot help with that.".to_string(),
        )));

        let generated = generator.generate(&RecipeRequest::new("egg, flour")).await;
        assert_eq!(generated.source, RecipeSource::Synthesized);
        assert_eq!(generated.recipe.title, "Egg Delight");
    }

    #[tokio::test]
    async fn test_force_fallback_skips_remote() {
        // The provider would succeed; force_fallback must ignore it.
        let generator = generator(CannedProvider(Ok(
            r#"{"title": "Should Not Appear"}"#.to_string()
        )));

        let mut request = RecipeRequest::new("chicken, rice");
        request.force_fallback = true;

        let generated = generator.generate(&request).await;
        assert_eq!(generated.source, RecipeSource::Synthesized);
        assert_ne!(generated.recipe.title, "Should Not Appear");
    }

    #[tokio::test]
    async fn test_image_failure_masked_with_placeholder() {
        let generator = RecipeGenerator {
            provider: Box::new(CannedProvider(Err(()))),
            images: Box::new(FailingImages),
        };

        let generated = generator.generate(&RecipeRequest::new("tofu")).await;
        assert_eq!(generated.recipe.image, PLACEHOLDER_IMAGE);
    }
}
