//! # Infrastructure Layer
//!
//! HTTP adapters for the external collaborators.
//! Implements the traits defined in the Domain layer (ImageHost, StickerGenerator).

pub mod generation;
pub mod hosting;

use reqwest::Client;
use std::sync::OnceLock;

/// HTTP client reused across requests. Per-request timeouts come from config.
pub(crate) fn http_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| Client::builder().build().expect("Failed to create HTTP client"))
}
