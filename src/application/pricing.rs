//! # Pricing
//!
//! Static lookup tables and the price derivation. A price only exists for
//! style/quantity pairs the tables define; anything else yields `None` so the
//! interface never shows a garbage number.

use crate::domain::types::StyleId;

/// Starting price for any sticker generation, in dollars.
pub const BASE_PRICE: f64 = 0.10;

/// Offered pack sizes and their multipliers.
pub const QUANTITY_TIERS: [(u32, f64); 4] = [(4, 1.0), (6, 1.3), (8, 1.6), (12, 2.0)];

pub fn style_multiplier(style: StyleId) -> f64 {
    match style {
        StyleId::Kawaii => 1.0,
        StyleId::Emoji => 1.2,
        StyleId::Chibi => 1.5,
        StyleId::Magical => 2.0,
    }
}

pub fn quantity_multiplier(quantity: u32) -> Option<f64> {
    QUANTITY_TIERS
        .iter()
        .find(|(count, _)| *count == quantity)
        .map(|(_, multiplier)| *multiplier)
}

pub fn is_offered_quantity(quantity: u32) -> bool {
    quantity_multiplier(quantity).is_some()
}

pub fn offered_quantities() -> impl Iterator<Item = u32> {
    QUANTITY_TIERS.iter().map(|(count, _)| *count)
}

/// A computed price with the line items shown on the review step.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub style: StyleId,
    pub quantity: u32,
    /// Base generation line item.
    pub base: f64,
    /// Style premium line item: `base * (style_multiplier - 1)`.
    pub style_premium: f64,
    /// Quantity premium line item: `base * style_multiplier * (quantity_multiplier - 1)`.
    pub quantity_premium: f64,
    pub total: f64,
}

/// Derive the price for a style/quantity pair.
///
/// Deterministic; returns `None` when the quantity is not an offered pack
/// size (the style set is closed, so the style side cannot be undefined).
pub fn quote(style: StyleId, quantity: u32) -> Option<PriceQuote> {
    let style_mult = style_multiplier(style);
    let quantity_mult = quantity_multiplier(quantity)?;

    Some(PriceQuote {
        style,
        quantity,
        base: BASE_PRICE,
        style_premium: BASE_PRICE * (style_mult - 1.0),
        quantity_premium: BASE_PRICE * style_mult * (quantity_mult - 1.0),
        total: BASE_PRICE * style_mult * quantity_mult,
    })
}
