pub mod json;
pub mod normalize;
pub mod text;

pub use normalize::normalize;

use log::debug;

use crate::error::GenerateError;
use crate::model::{Recipe, RecipeRequest, RecipeSource};

/// One stage of the degradation chain applied to raw model output.
///
/// Stages are evaluated in a fixed order by the orchestrator; each either
/// produces a complete, normalized recipe or a failure that hands control
/// to the next stage. Keeping the chain as an explicit list keeps the
/// degradation order auditable and each stage testable on its own.
pub trait RecoverRecipe {
    /// Provenance tag attached to recipes this stage produces.
    fn source(&self) -> RecipeSource;

    fn recover(&self, raw: &str, request: &RecipeRequest) -> Result<Recipe, GenerateError>;
}

/// Balanced-brace scan, syntactic repair, and strict JSON parse.
pub struct JsonRecovery;

impl RecoverRecipe for JsonRecovery {
    fn source(&self) -> RecipeSource {
        RecipeSource::JsonRecovered
    }

    fn recover(&self, raw: &str, request: &RecipeRequest) -> Result<Recipe, GenerateError> {
        let value = json::recover(raw)?;
        Ok(normalize::normalize(&value, request))
    }
}

/// Heuristic labeled-section extraction.
///
/// The extraction itself never fails, but a result carrying no labeled
/// content at all is pure placeholder and reported as
/// [`GenerateError::RecoveryExhausted`] so the orchestrator can synthesize
/// instead of returning a recipe the model contributed nothing to.
pub struct TextSections;

impl RecoverRecipe for TextSections {
    fn source(&self) -> RecipeSource {
        RecipeSource::TextRecovered
    }

    fn recover(&self, raw: &str, request: &RecipeRequest) -> Result<Recipe, GenerateError> {
        let (recipe, matched) = text::extract_report(raw, request);
        if matched {
            Ok(recipe)
        } else {
            Err(GenerateError::RecoveryExhausted)
        }
    }
}

/// The recovery stages in degradation order.
pub fn stages() -> Vec<Box<dyn RecoverRecipe>> {
    vec![Box::new(JsonRecovery), Box::new(TextSections)]
}

/// Run the stages in order against raw model output.
///
/// Fails only when every stage comes back empty-handed, in which case the
/// last stage's error (always `RecoveryExhausted`) is returned.
pub fn recover_any(
    raw: &str,
    request: &RecipeRequest,
) -> Result<(Recipe, RecipeSource), GenerateError> {
    let mut last = GenerateError::RecoveryExhausted;
    for stage in stages() {
        match stage.recover(raw, request) {
            Ok(recipe) => return Ok((recipe, stage.source())),
            Err(err) => {
                debug!("{:?} stage failed: {}", stage.source(), err);
                last = err;
            }
        }
    }
    Err(last)
}
