//! # Prompt Derivation
//!
//! Pure mapping from the selected style and quantity to the text prompt sent
//! to the generation service. No randomness: identical inputs always produce
//! identical prompts.

use crate::domain::types::StyleId;
use crate::strings::prompts;

/// Expression pool cycled through when a pack asks for more stickers than
/// there are labels.
pub const EXPRESSIONS: [&str; 9] = [
    "laughing",
    "angry",
    "crying",
    "sulking",
    "thinking",
    "sleepy",
    "blowing a kiss",
    "winking",
    "surprised",
];

/// Expression used for a single-sticker pack.
pub const SOLO_EXPRESSION: &str = "laughing";

/// The expression labels for a pack of `quantity` stickers, drawn cyclically
/// from the pool in order.
pub fn expression_labels(quantity: u32) -> Vec<&'static str> {
    (0..quantity as usize)
        .map(|i| EXPRESSIONS[i % EXPRESSIONS.len()])
        .collect()
}

/// Build the full generation prompt for a style/quantity pair.
pub fn build_prompt(style: StyleId, quantity: u32) -> String {
    let mut prompt = String::from(prompts::style_template(style));

    if quantity > 1 {
        prompt.push('\n');
        prompt.push_str(&format!(
            "Each of the {} stickers should feature a unique expression: {}.",
            quantity,
            expression_labels(quantity).join(", ")
        ));
    } else {
        prompt.push('\n');
        prompt.push_str(&format!(
            "The sticker should feature a {SOLO_EXPRESSION} expression."
        ));
    }

    prompt.push('\n');
    prompt.push_str(&format!(
        "Maintain a consistent outfit inspired by: {}.",
        prompts::OUTFIT_REFERENCE
    ));
    prompt.push('\n');
    prompt.push_str(prompts::QUALITY_CLAUSE);

    prompt
}
