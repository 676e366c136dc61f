pub mod message;
pub mod view;

pub use message::{Attachment, AttachmentError, ChatMessage, Sender};
pub use view::{ChatState, ChatView, PendingRequest, Ticket};
