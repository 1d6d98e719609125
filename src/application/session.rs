//! # Session
//!
//! The complete mutable state for one user's pass through the wizard.
//! Held in memory only, owned by the controller, serializable so a frontend
//! can snapshot or inspect it.

use crate::application::pricing::{self, PriceQuote};
use crate::domain::types::{Step, StyleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Public URL of the uploaded or linked photo.
    pub source_image: Option<String>,
    pub style: Option<StyleId>,
    pub quantity: u32,
    /// True only after the user explicitly confirmed the computed price.
    pub price_accepted: bool,
    pub current_step: Step,
    /// Output image URLs; empty until generation succeeds.
    pub result_images: Vec<String>,
    /// True only while a generation call is outstanding.
    pub is_generating: bool,
    pub started_at: String,
}

impl Session {
    pub fn new(default_quantity: u32) -> Self {
        Self {
            source_image: None,
            style: None,
            quantity: default_quantity,
            price_accepted: false,
            current_step: Step::Upload,
            result_images: Vec::new(),
            is_generating: false,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Pricing and results must never be stale relative to their inputs:
    /// called whenever `source_image`, `style`, or `quantity` changes.
    pub fn invalidate_downstream(&mut self) {
        self.price_accepted = false;
        self.result_images.clear();
    }

    /// Monotonic advance: never moves backwards.
    pub fn advance_to(&mut self, step: Step) {
        if step > self.current_step {
            self.current_step = step;
        }
    }

    /// Whether the preconditions of `step` are satisfied, i.e. whether the
    /// user may move past it.
    pub fn step_complete(&self, step: Step) -> bool {
        match step {
            Step::Upload => self.source_image.is_some(),
            Step::Style => self.style.is_some(),
            Step::Quantity => pricing::is_offered_quantity(self.quantity),
            Step::Review => self.price_accepted,
            Step::Generate => true,
        }
    }

    /// The current price, if the selections define one.
    pub fn price(&self) -> Option<PriceQuote> {
        self.style
            .and_then(|style| pricing::quote(style, self.quantity))
    }
}
