pub mod catalog;
pub mod chat;
pub mod config;
pub mod generator;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod sidebar;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, Category, Personality, PersonalityConfig, ResponseFormatter, Status};
pub use chat::{Attachment, ChatMessage, ChatState, ChatView, PendingRequest, Sender, Ticket};
pub use config::{Credentials, ParlorConfig};
pub use generator::{GenerateError, ResponseGenerator};
pub use providers::{
    GeminiProvider, GenerationParams, LlmProvider, LlmResponse, Message, OpenAiProvider,
    ProviderError, Role, TokenUsage,
};
pub use session::{ChatSession, SessionStore};
pub use sidebar::{filter_personalities, Sidebar};
