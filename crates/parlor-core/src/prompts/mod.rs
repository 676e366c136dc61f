pub mod system;

pub use system::SystemPromptBuilder;
