// Adapters layer: concrete implementations of the domain ports.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};
