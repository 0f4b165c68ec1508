mod cohere;

pub use cohere::CohereProvider;

use async_trait::async_trait;

use crate::error::GenerateError;

/// A remote text-generation collaborator.
///
/// The pipeline treats any failure from this call identically: it falls
/// back to local synthesis.
#[async_trait]
pub trait GenerateText: Send + Sync {
    /// Provider name for diagnostics (e.g. "cohere")
    fn provider_name(&self) -> &str;

    /// Send a prompt and return the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
