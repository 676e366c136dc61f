pub mod builtin;
#[allow(clippy::module_inception)]
pub mod catalog;
pub mod persona_file;
pub mod personality;
pub mod profile;

pub use catalog::Catalog;
pub use personality::{Category, Personality, Status, UnknownCategory};
pub use profile::{PersonalityConfig, ResponseFormatter};
