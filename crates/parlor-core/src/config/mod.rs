#[allow(clippy::module_inception)]
pub mod config;
pub mod credentials;
pub use config::{ParlorConfig, DEFAULT_MODEL};
pub use credentials::Credentials;
