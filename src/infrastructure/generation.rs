//! # Generation Adapter
//!
//! JSON POST to the image-edit endpoint. Some deployments of the function
//! expect `image_urls` (array) instead of a single `image_url` field, so the
//! request carries both. Results come back under `data.images`.

use crate::domain::config::GenerationConfig;
use crate::domain::error::GenerationError;
use crate::domain::traits::StickerGenerator;
use crate::domain::types::GenerationRequest;
use crate::infrastructure::http_client;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Documented per-call ceiling of the service.
pub const MAX_IMAGES: u32 = 4;

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    prompt: &'a str,
    image_url: &'a str,
    image_urls: [&'a str; 1],
    num_images: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    data: GenerateData,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    images: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: String,
}

pub struct GenerationClient {
    endpoint: String,
    api_key: String,
    timeout: u64,
}

impl GenerationClient {
    /// Build the client, resolving the secret credential up front so a
    /// missing key fails at startup rather than at the last wizard step.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: config.resolve_api_key()?,
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl StickerGenerator for GenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<String>, GenerationError> {
        if request.num_images < 1 || request.num_images > MAX_IMAGES {
            return Err(GenerationError::CountOutOfRange(request.num_images));
        }

        let body = GenerateBody {
            prompt: &request.prompt,
            image_url: &request.image_url,
            image_urls: [&request.image_url],
            num_images: request.num_images,
        };

        tracing::debug!(endpoint = %self.endpoint, num_images = request.num_images, "requesting generation");
        let response = http_client()
            .post(&self.endpoint)
            .header("Authorization", format!("Key {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(Duration::from_secs(self.timeout))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::TimedOut(self.timeout)
                } else {
                    GenerationError::Network(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(GenerationError::Rejected {
                detail: extract_detail(status.as_u16(), &error_text),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Network(format!("Failed to parse response: {e}")))?;

        Ok(parsed.data.images.into_iter().map(|img| img.url).collect())
    }
}

/// Surface the first structured validation detail when the response exposes
/// one (the common shape of a 422), else the raw body.
fn extract_detail(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(first) = json
            .get("detail")
            .and_then(|d| d.as_array())
            .and_then(|d| d.first())
        {
            return format!("HTTP {status}: {first}");
        }
    }
    format!("HTTP {status}: {body}")
}
