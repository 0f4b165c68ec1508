use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::providers::GenerateText;

const DEFAULT_BASE_URL: &str = "https://api.cohere.ai";

/// Text generation via the Cohere generate API.
pub struct CohereProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CohereProvider {
    pub fn new(api_key: String, model: String) -> Self {
        CohereProvider {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Build a provider from loaded configuration.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(GenerateError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(CohereProvider {
            client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        CohereProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl GenerateText for CohereProvider {
    fn provider_name(&self) -> &str {
        "cohere"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let response = self
            .client
            .post(format!("{}/v1/generate", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "k": 0,
                "stop_sequences": [],
                "return_likelihoods": "NONE"
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let response_body: Value = response.json().await?;
        debug!("generation response: {:?}", response_body);

        response_body["generations"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                GenerateError::MalformedResponse(
                    "no generations[0].text in response".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"generations": [{"text": "{\"title\": \"Fried Rice\"}"}]}"#)
            .create();

        let provider = CohereProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "command".to_string(),
        );

        let result = provider.generate("make me a recipe").await.unwrap();
        assert!(result.contains("Fried Rice"));
        mock.assert();
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/generate")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "rate limited"}"#)
            .create();

        let provider = CohereProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "command".to_string(),
        );

        let result = provider.generate("prompt").await;
        match result {
            Err(GenerateError::Remote { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected Remote error, got {:?}", other.map(|_| ())),
        }
        mock.assert();
    }

    #[tokio::test]
    async fn test_generate_missing_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"generations": []}"#)
            .create();

        let provider = CohereProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "command".to_string(),
        );

        let result = provider.generate("prompt").await;
        assert!(matches!(result, Err(GenerateError::MalformedResponse(_))));
        mock.assert();
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = GeneratorConfig::default();
        assert!(matches!(
            CohereProvider::from_config(&config),
            Err(GenerateError::MissingApiKey)
        ));
    }
}
