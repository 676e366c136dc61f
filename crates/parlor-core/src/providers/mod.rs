pub mod error;
pub mod gemini;
pub mod openai;
pub mod provider;

pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{GenerationParams, LlmProvider, LlmResponse, Message, Role, TokenUsage};
