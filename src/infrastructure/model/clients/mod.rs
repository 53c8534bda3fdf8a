//! Model clients

mod base;
mod gemini;
mod openai;

pub use base::HttpClientBase;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
