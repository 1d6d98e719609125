//! # Configuration
//!
//! Main application configuration structure.
//! Matches the layout of `data/config.yaml`.

use crate::domain::error::GenerationError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
}

/// Configuration for the two external collaborators.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub hosting: HostingConfig,
    pub generation: GenerationConfig,
}

/// Image hosting service (multipart upload endpoint).
#[derive(Debug, Deserialize, Clone)]
pub struct HostingConfig {
    /// Full upload URL, e.g. `https://api.cloudinary.com/v1_1/<cloud>/image/upload`.
    pub endpoint: String,
    /// Unsigned upload preset identifier sent alongside the file.
    pub upload_preset: String,
    #[serde(default = "default_upload_timeout")]
    pub timeout: u64,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

/// AI image generation service.
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Full endpoint URL of the image-edit function.
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the credential, e.g. "FAL_KEY".
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_generation_timeout")]
    pub timeout: u64,
    /// Documented per-call ceiling of the service.
    #[serde(default = "default_max_images")]
    pub max_images: u32,
}

impl GenerationConfig {
    /// Resolve the secret credential, preferring the inline key over the
    /// environment variable.
    pub fn resolve_api_key(&self) -> Result<String, GenerationError> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        if let Some(env_var) = &self.api_key_env {
            return std::env::var(env_var).map_err(|e| {
                GenerationError::MissingCredential(format!("env var {env_var} not set: {e}"))
            });
        }
        Err(GenerationError::MissingCredential(
            "set api_key or api_key_env".to_string(),
        ))
    }
}

/// Wizard behaviour switches.
#[derive(Debug, Deserialize, Clone)]
pub struct WizardConfig {
    /// When false, the quantity step is skipped and `default_quantity` is used.
    #[serde(default = "default_true")]
    pub quantity_step: bool,
    #[serde(default = "default_quantity")]
    pub default_quantity: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            quantity_step: default_true(),
            default_quantity: default_quantity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> u32 {
    6
}

fn default_upload_timeout() -> u64 {
    60
}

fn default_generation_timeout() -> u64 {
    300
}

fn default_max_images() -> u32 {
    4
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
services:
  hosting:
    endpoint: "https://api.cloudinary.com/v1_1/demo/image/upload"
    upload_preset: "unsigned_preset"
  generation:
    endpoint: "https://fal.run/fal-ai/nano-banana/edit"
    api_key_env: "FAL_KEY"
    timeout: 120
wizard:
  quantity_step: false
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: AppConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.services.hosting.upload_preset, "unsigned_preset");
        assert_eq!(config.services.hosting.timeout, default_upload_timeout());
        assert_eq!(config.services.hosting.max_file_bytes, 10 * 1024 * 1024);
        assert_eq!(config.services.generation.timeout, 120);
        assert_eq!(config.services.generation.max_images, 4);
        assert!(!config.wizard.quantity_step);
        assert_eq!(config.wizard.default_quantity, 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let config: AppConfig = serde_yaml::from_str(&content).unwrap();
        assert_eq!(
            config.services.generation.endpoint,
            "https://fal.run/fal-ai/nano-banana/edit"
        );
    }

    #[test]
    fn test_resolve_api_key_prefers_inline() {
        let config = GenerationConfig {
            endpoint: String::new(),
            api_key: Some("secret".to_string()),
            api_key_env: Some("STICKERFORGE_UNSET_VAR".to_string()),
            timeout: default_generation_timeout(),
            max_images: default_max_images(),
        };
        assert_eq!(config.resolve_api_key().unwrap(), "secret");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let config = GenerationConfig {
            endpoint: String::new(),
            api_key: None,
            api_key_env: None,
            timeout: default_generation_timeout(),
            max_images: default_max_images(),
        };
        assert!(config.resolve_api_key().is_err());
    }
}
