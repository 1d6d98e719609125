//! # Error Types
//!
//! The failure taxonomy for the wizard: precondition failures that block an
//! action, upload failures from the hosting service, and generation failures
//! from the image service. Upload and generation errors never leave partial
//! state behind; validation errors never mutate state at all.

use thiserror::Error;

/// A precondition for the attempted action was not met.
///
/// These block the action entirely and are reported inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no photo has been uploaded yet")]
    MissingImage,

    #[error("no style has been selected yet")]
    MissingStyle,

    #[error("the price has not been accepted yet")]
    PriceNotAccepted,

    #[error("{0} is not one of the offered pack sizes")]
    QuantityNotOffered(u32),

    #[error("a generation call is already in flight")]
    GenerationInFlight,

    #[error("the current step is not complete yet")]
    StepIncomplete,
}

/// The hosting service rejected the file, or the transfer itself failed.
///
/// Size and type rejections happen before any network transfer.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported image type '{0}' (expected jpg, jpeg, png or webp)")]
    UnsupportedType(String),

    #[error("file is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("upload request failed: {0}")]
    Network(String),

    #[error("upload timed out after {0}s")]
    TimedOut(u64),

    /// The host answered but without a usable URL. Carries the raw response
    /// body as diagnostic payload.
    #[error("host rejected the upload: {body}")]
    Rejected { body: String },
}

/// The generation service rejected the request or failed to produce images.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API credential: {0}")]
    MissingCredential(String),

    #[error("num_images {0} is outside the supported 1..=4 range")]
    CountOutOfRange(u32),

    #[error("generation request failed: {0}")]
    Network(String),

    #[error("generation timed out after {0}s")]
    TimedOut(u64),

    #[error("generation was cancelled")]
    Cancelled,

    /// The service answered with an error. Carries the first structured
    /// validation detail when the response exposes one, else the raw body.
    #[error("service rejected the request: {detail}")]
    Rejected { detail: String },

    #[error("service returned no images")]
    Empty,
}

/// Umbrella error for controller operations.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl WizardError {
    /// True for errors that block an action without touching session state.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
