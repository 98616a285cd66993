pub mod api;
pub mod client;
pub mod errors;
pub mod parser;
pub mod prompts;
pub mod types;
pub mod wire;

pub use api::GenerativeApi;
pub use client::{GeminiClient, GeminiConfig};
pub use errors::AiError;
pub use types::{AspectRatio, ImageRef, PostDraft};
