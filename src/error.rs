use thiserror::Error;

/// Errors that can occur during recipe generation.
///
/// Everything here is recoverable from the pipeline's point of view:
/// JSON recovery failures trigger text-section extraction, remote failures
/// trigger local synthesis, and image failures are masked with a
/// placeholder. The variants exist so each fallback decision is made on a
/// typed value rather than by matching on message text.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The model output contained no balanced brace-delimited block
    #[error("no JSON object found in model output")]
    NoJsonFound,

    /// An extracted JSON candidate failed to parse even after repairs
    #[error("failed to parse extracted JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Transport-level failure reaching the generation API
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The generation API answered with a non-success status
    #[error("generation API error: {status} {body}")]
    Remote { status: u16, body: String },

    /// The generation response did not carry any generated text
    #[error("generation response missing text: {0}")]
    MalformedResponse(String),

    /// Every recovery stage produced only defaulted placeholder content
    #[error("model output contained no recoverable recipe content")]
    RecoveryExhausted,

    /// No API key available from the builder, config file, or environment
    #[error("no API key configured for the generation provider")]
    MissingApiKey,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Image lookup failure (masked with a placeholder by the orchestrator)
    #[error("image lookup failed: {0}")]
    ImageLookup(String),
}

impl GenerateError {
    /// True for failures of the remote generation call itself, the class
    /// that sends the pipeline to local synthesis.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(
            self,
            GenerateError::Transport(_)
                | GenerateError::Remote { .. }
                | GenerateError::MalformedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_unavailable_classification() {
        let remote = GenerateError::Remote {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert!(remote.is_remote_unavailable());
        assert!(!GenerateError::NoJsonFound.is_remote_unavailable());
        assert!(!GenerateError::MissingApiKey.is_remote_unavailable());
    }

    #[test]
    fn test_error_messages() {
        let err = GenerateError::Remote {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "generation API error: 429 rate limited");
        assert_eq!(
            GenerateError::NoJsonFound.to_string(),
            "no JSON object found in model output"
        );
    }
}
