//! # Image Hosting Adapter
//!
//! Multipart upload to a Cloudinary-style unsigned endpoint. The controller
//! needs a publicly fetchable URL before it may call the generation service;
//! this adapter produces it.

use crate::domain::config::HostingConfig;
use crate::domain::error::UploadError;
use crate::domain::traits::ImageHost;
use crate::infrastructure::http_client;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

/// Accepted raster formats, checked before any network transfer.
const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub struct HostingClient {
    config: HostingConfig,
}

impl HostingClient {
    pub fn new(config: HostingConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImageHost for HostingClient {
    async fn upload(&self, file: &Path) -> Result<String, UploadError> {
        let (file_name, mime) = validate_file_type(file)?;

        let metadata = tokio::fs::metadata(file).await.map_err(|e| UploadError::Io {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;
        if metadata.len() > self.config.max_file_bytes {
            return Err(UploadError::TooLarge {
                size: metadata.len(),
                limit: self.config.max_file_bytes,
            });
        }

        let bytes = tokio::fs::read(file).await.map_err(|e| UploadError::Io {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| UploadError::Network(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        tracing::debug!(endpoint = %self.config.endpoint, "uploading image");
        let response = http_client()
            .post(&self.config.endpoint)
            .multipart(form)
            .timeout(Duration::from_secs(self.config.timeout))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UploadError::TimedOut(self.config.timeout)
                } else {
                    UploadError::Network(format!("HTTP request failed: {e}"))
                }
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Network(format!("Failed to read response: {e}")))?;

        parse_upload_response(&body)
    }
}

fn validate_file_type(file: &Path) -> Result<(String, &'static str), UploadError> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType(extension));
    }

    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "image/webp",
    };

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    Ok((file_name, mime))
}

/// Success is the presence of a `secure_url` field; anything else is a
/// rejection carrying the raw body as diagnostic payload.
fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(url) = json.get("secure_url").and_then(|u| u.as_str()) {
            return Ok(url.to_string());
        }
    }
    Err(UploadError::Rejected {
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body = r#"{"asset_id":"abc","secure_url":"https://res.example/image/upload/v1/me.png"}"#;
        assert_eq!(
            parse_upload_response(body).unwrap(),
            "https://res.example/image/upload/v1/me.png"
        );
    }

    #[test]
    fn test_parse_rejection_keeps_raw_body() {
        let body = r#"{"error":{"message":"Upload preset not found"}}"#;
        match parse_upload_response(body) {
            Err(UploadError::Rejected { body: raw }) => assert!(raw.contains("preset not found")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_json_body_is_rejection() {
        assert!(matches!(
            parse_upload_response("<html>502</html>"),
            Err(UploadError::Rejected { .. })
        ));
    }

    #[test]
    fn test_validate_file_type() {
        assert!(validate_file_type(Path::new("selfie.PNG")).is_ok());
        assert_eq!(
            validate_file_type(Path::new("photo.jpeg")).unwrap().1,
            "image/jpeg"
        );
        assert!(matches!(
            validate_file_type(Path::new("clip.gif")),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_file_type(Path::new("noextension")),
            Err(UploadError::UnsupportedType(_))
        ));
    }
}
