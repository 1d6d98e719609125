//! # Wizard Strings
//!
//! Step text and rendering for the console wizard. The controller decides
//! which step is active; this module only formats it.

use crate::application::pricing::{self, PriceQuote};
use crate::application::session::Session;
use crate::domain::types::{Step, StyleId};

pub fn step_title(step: Step) -> &'static str {
    match step {
        Step::Upload => "Upload Photo",
        Step::Style => "Choose Style",
        Step::Quantity => "Select Quantity",
        Step::Review => "Review & Pay",
        Step::Generate => "Generate & Download",
    }
}

/// The progress header shown above every step.
pub fn format_progress(session: &Session) -> String {
    format!(
        "Step {} of {}: {}",
        session.current_step.number(),
        Step::COUNT,
        step_title(session.current_step)
    )
}

/// Render the active step's instructions and current selections.
pub fn format_step(session: &Session) -> String {
    let mut output = format!("\n=== {} ===\n", format_progress(session));

    match session.current_step {
        Step::Upload => {
            output.push_str(
                "Enter a path to a photo (jpg, png or webp) to upload, or paste a public https:// URL.",
            );
            if let Some(url) = &session.source_image {
                output.push_str(&format!(
                    "\nCurrent photo: {url}\nType .remove to start over, or .next to continue.",
                ));
            }
        }
        Step::Style => {
            output.push_str("Pick a style for your sticker pack:\n");
            for (index, style) in StyleId::all().iter().enumerate() {
                let marker = if session.style == Some(*style) { "*" } else { " " };
                output.push_str(&format!(
                    " {marker} {}. {} ({})\n",
                    index + 1,
                    style.display_name(),
                    style.as_str()
                ));
            }
            output.push_str("Enter a number or style name.");
        }
        Step::Quantity => {
            output.push_str("How many stickers?\n");
            for count in pricing::offered_quantities() {
                let marker = if session.quantity == count { "*" } else { " " };
                output.push_str(&format!(" {marker} {count} stickers\n"));
            }
            output.push_str("Enter one of the offered pack sizes.");
        }
        Step::Review => match session.price() {
            Some(quote) => {
                output.push_str(&format_quote(&quote));
                output.push_str("\nType .ok to accept the price, or .back to change your choices.");
            }
            None => {
                output.push_str("No price available for the current selections; go .back and pick again.");
            }
        },
        Step::Generate => {
            if session.result_images.is_empty() {
                output.push_str(
                    "Payment confirmed. Type .go to generate your stickers (Ctrl-C cancels a running generation).",
                );
            } else {
                output.push_str("Your sticker pack:\n");
                for url in &session.result_images {
                    output.push_str(&format!("  {url}\n"));
                }
                output.push_str("Type .remove to start a new pack, or .quit to exit.");
            }
        }
    }

    output
}

/// The review step's line-item price breakdown.
pub fn format_quote(quote: &PriceQuote) -> String {
    let mut output = String::from("Generation cost:\n");
    output.push_str(&format!("  Base generation        ${:.2}\n", quote.base));
    output.push_str(&format!(
        "  {} style premium    ${:.2}\n",
        quote.style.display_name(),
        quote.style_premium
    ));
    output.push_str(&format!(
        "  {} stickers premium    ${:.2}\n",
        quote.quantity, quote.quantity_premium
    ));
    output.push_str(&format!("  Total                  ${:.2}", quote.total));
    output
}
