pub mod error;
#[allow(clippy::module_inception)]
pub mod generator;

pub use error::GenerateError;
pub use generator::{ResponseGenerator, DEFAULT_MAX_OUTPUT_TOKENS};
