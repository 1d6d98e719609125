//! # Domain Types
//!
//! The style catalog, the wizard step sequence, and the request shape handed
//! to the generation collaborator.

use serde::{Deserialize, Serialize};

/// A visual treatment for the sticker pack.
///
/// Each style maps to a static prompt template and a price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleId {
    Kawaii,
    Chibi,
    Emoji,
    Magical,
}

impl StyleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleId::Kawaii => "kawaii",
            StyleId::Chibi => "chibi",
            StyleId::Emoji => "emoji",
            StyleId::Magical => "magical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kawaii" | "cute" => Some(StyleId::Kawaii),
            "chibi" => Some(StyleId::Chibi),
            "emoji" => Some(StyleId::Emoji),
            "magical" => Some(StyleId::Magical),
            _ => None,
        }
    }

    /// Human-readable name shown in the style list and price breakdown.
    pub fn display_name(&self) -> &'static str {
        match self {
            StyleId::Kawaii => "Kawaii Cute",
            StyleId::Chibi => "Chibi",
            StyleId::Emoji => "Emoji Expression",
            StyleId::Magical => "Magical Girl",
        }
    }

    pub fn all() -> [StyleId; 4] {
        [
            StyleId::Kawaii,
            StyleId::Chibi,
            StyleId::Emoji,
            StyleId::Magical,
        ]
    }
}

/// Position in the wizard's ordered step sequence.
///
/// Variant order is the step order; the derived `Ord` drives the monotonic
/// advance logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Upload,
    Style,
    Quantity,
    Review,
    Generate,
}

impl Step {
    pub const COUNT: u8 = 5;

    /// 1-based step number as shown to the user.
    pub fn number(&self) -> u8 {
        match self {
            Step::Upload => 1,
            Step::Style => 2,
            Step::Quantity => 3,
            Step::Review => 4,
            Step::Generate => 5,
        }
    }

    /// The following step, skipping Quantity when that step is disabled.
    pub fn next(&self, quantity_step: bool) -> Step {
        match self {
            Step::Upload => Step::Style,
            Step::Style if quantity_step => Step::Quantity,
            Step::Style => Step::Review,
            Step::Quantity => Step::Review,
            Step::Review => Step::Generate,
            Step::Generate => Step::Generate,
        }
    }

    /// The preceding step, skipping Quantity when that step is disabled.
    pub fn previous(&self, quantity_step: bool) -> Step {
        match self {
            Step::Upload => Step::Upload,
            Step::Style => Step::Upload,
            Step::Quantity => Step::Style,
            Step::Review if quantity_step => Step::Quantity,
            Step::Review => Step::Style,
            Step::Generate => Step::Review,
        }
    }
}

/// What the controller hands to the generation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Must be a publicly fetchable absolute URL; the controller guarantees
    /// this by routing local files through the hosting collaborator first.
    pub image_url: String,
    /// Already clamped to the collaborator's ceiling by the controller.
    pub num_images: u32,
}
