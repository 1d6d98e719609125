//! # Messages
//!
//! Constant strings and format functions for user-facing notices.

pub const WELCOME: &str = "Sticker Generator. Turn a photo into a custom sticker pack.";
pub const HELP: &str = "Commands: .back  .next  .remove  .ok (accept price)  .go (generate)  .help  .quit";
pub const UNKNOWN_INPUT: &str = "Didn't understand that. Type .help for the available commands.";
pub const GENERATING: &str = "Generating your stickers... (Ctrl-C to cancel)";
pub const GOODBYE: &str = "Bye!";

pub fn image_linked(url: &str) -> String {
    format!("Photo ready: {url}")
}

pub fn image_removed() -> String {
    "Photo removed. Back to the start.".to_string()
}

pub fn style_selected(name: &str) -> String {
    format!("Style selected: {name}")
}

pub fn quantity_selected(count: u32) -> String {
    format!("Pack size: {count} stickers")
}

pub const PRICE_ACCEPTED: &str = "Price accepted. You can generate your stickers now.";

pub fn generation_done(count: usize) -> String {
    format!("Done! {count} stickers are ready.")
}

pub fn upload_failed(err: &str) -> String {
    format!("Upload failed: {err}")
}

pub fn generation_failed(err: &str) -> String {
    format!("Generation failed: {err}")
}

pub fn blocked(err: &str) -> String {
    format!("Can't do that yet: {err}")
}
