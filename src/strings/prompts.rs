//! # Prompt Templates
//!
//! Static per-style templates for the generation service. Prompt assembly
//! lives in `application::prompt`; this module only holds the text.

use crate::domain::types::StyleId;

/// Base template for each style. The quantity clause is appended by the
/// derivation, so these stay quantity-free.
pub fn style_template(style: StyleId) -> &'static str {
    match style {
        StyleId::Kawaii => {
            "Create a sticker pack in the Kawaii Cute style: adorable anime look with big sparkly eyes and sweet expressions."
        }
        StyleId::Chibi => {
            "Create a sticker pack in the Chibi style: super deformed cute characters with oversized heads and exaggerated features."
        }
        StyleId::Emoji => {
            "Create a sticker pack in the Emoji Expression style: fun, bold, expressive emoji-like reactions."
        }
        StyleId::Magical => {
            "Create a sticker pack in the Magical Girl style: sparkly and dreamy with glittery magical elements."
        }
    }
}

/// Fixed outfit reference keeping the pack visually consistent with the
/// source photo.
pub const OUTFIT_REFERENCE: &str = "white floral dress with puff sleeves";

pub const QUALITY_CLAUSE: &str =
    "Stickers should be high quality, suitable for digital use, and visually cohesive as a set.";
