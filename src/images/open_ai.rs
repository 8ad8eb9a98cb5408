use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::ImageGenConfig;
use crate::error::VaultError;
use crate::images::ImageGenerator;

/// Client for the OpenAI image-generation endpoint.
pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    size: String,
    quality: String,
}

impl OpenAiImageClient {
    /// Create a new client from configuration
    pub fn new(api_key: String, config: &ImageGenConfig) -> Result<Self, VaultError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(OpenAiImageClient {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            size: config.size.clone(),
            quality: config.quality.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        OpenAiImageClient {
            client: Client::new(),
            api_key,
            base_url,
            model: "gpt-image-1".to_string(),
            size: "1024x1024".to_string(),
            quality: "low".to_string(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String, VaultError> {
        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "n": 1,
                "size": self.size,
                "quality": self.quality
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VaultError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        debug!("image response keys: {:?}", body.as_object().map(|o| o.keys().collect::<Vec<_>>()));
        let b64 = body["data"][0]["b64_json"]
            .as_str()
            .ok_or(VaultError::MissingImageData)?
            .to_string();

        Ok(b64)
    }
}
