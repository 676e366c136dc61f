use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("no such file: {0}")]
    NotFound(PathBuf),
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),
}

/// Local file shown alongside a user message. Never uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub path: PathBuf,
}

impl Attachment {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AttachmentError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(AttachmentError::NotAFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            path: path.to_path_buf(),
        })
    }
}

/// One entry in the visible transcript. Fields are read-only after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    id: Uuid,
    content: String,
    sender: Sender,
    timestamp: DateTime<Local>,
    attachment: Option<Attachment>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Local::now(),
            attachment,
        }
    }

    /// AI reply stamped now, but never earlier than `not_before` so the
    /// transcript stays ordered even if the wall clock steps back.
    pub fn ai(content: impl Into<String>, not_before: Option<DateTime<Local>>) -> Self {
        let now = Local::now();
        let timestamp = match not_before {
            Some(t) if t > now => t,
            _ => now,
        };
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender: Sender::Ai,
            timestamp,
            attachment: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// `HH:MM` in local time, as shown next to each bubble.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn ids_are_unique() {
        let a = ChatMessage::user("hi", None);
        let b = ChatMessage::user("hi", None);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.sender(), Sender::User);
    }

    #[test]
    fn ai_timestamp_never_precedes_floor() {
        let future = Local::now() + Duration::seconds(30);
        let m = ChatMessage::ai("later", Some(future));
        assert_eq!(m.timestamp(), future);
        assert_eq!(m.sender(), Sender::Ai);
        assert!(m.attachment().is_none());
    }

    #[test]
    fn time_label_is_hours_and_minutes() {
        let m = ChatMessage::user("x", None);
        let label = m.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn attachment_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sketch.png");
        std::fs::write(&file, b"png").unwrap();

        let a = Attachment::from_path(&file).unwrap();
        assert_eq!(a.name, "sketch.png");
        assert!(matches!(
            Attachment::from_path(dir.path().join("nope.png")),
            Err(AttachmentError::NotFound(_))
        ));
        assert!(matches!(
            Attachment::from_path(dir.path()),
            Err(AttachmentError::NotAFile(_))
        ));
    }
}
