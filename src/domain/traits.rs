//! # Domain Traits
//!
//! Abstract interfaces for the two external collaborators.
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::error::{GenerationError, UploadError};
use crate::domain::types::GenerationRequest;
use async_trait::async_trait;
use std::path::Path;

/// Abstract interface for the image hosting collaborator.
///
/// A single-shot upload with no partial-progress semantics: the file either
/// ends up at a publicly reachable URL or the call fails.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload a local file, returning its public URL.
    async fn upload(&self, file: &Path) -> Result<String, UploadError>;
}

/// Abstract interface for the sticker generation collaborator.
///
/// Long-running and single-shot; the caller must not retry automatically.
#[async_trait]
pub trait StickerGenerator: Send + Sync {
    /// Generate stickers from a prompt and a source image, returning the
    /// result image URLs.
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<String>, GenerationError>;
}
