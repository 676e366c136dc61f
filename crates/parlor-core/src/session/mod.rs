#[allow(clippy::module_inception)]
pub mod session;

pub use session::{ChatSession, SessionStore, SharedSession, ACKNOWLEDGEMENT};
