//! # Messages
//!
//! A `Message` is one entry in the conversation log. Once built it is never
//! changed: the log only grows, and every field is read-only from outside.

use chrono::Local;

/// Shown in place of a reply whenever the backend call fails for any reason.
pub const APOLOGY: &str = "I apologize, but I'm currently unable to process your request. \
This could be due to a connectivity issue. Please ensure the backend server is running and try again. \
If the problem persists, please consult with a healthcare professional directly.";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: u64,
    text: String,
    author: Author,
    timestamp: String,
    is_error: bool,
}

impl Message {
    pub fn user(id: u64, text: String, timestamp: String) -> Self {
        Self {
            id,
            text,
            author: Author::User,
            timestamp,
            is_error: false,
        }
    }

    pub fn assistant(id: u64, text: String, timestamp: String) -> Self {
        Self {
            id,
            text,
            author: Author::Assistant,
            timestamp,
            is_error: false,
        }
    }

    /// The synthetic assistant reply used when a round trip fails.
    pub fn failure(id: u64, timestamp: String) -> Self {
        Self {
            id,
            text: APOLOGY.to_string(),
            author: Author::Assistant,
            timestamp,
            is_error: true,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn is_assistant(&self) -> bool {
        self.author == Author::Assistant
    }
}

/// Current local time as `HH:MM`, display only.
pub fn timestamp_now() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_carries_apology_and_error_flag() {
        let msg = Message::failure(7, "10:30".to_string());
        assert_eq!(msg.id(), 7);
        assert_eq!(msg.text(), APOLOGY);
        assert_eq!(msg.author(), Author::Assistant);
        assert!(msg.is_error());
    }

    #[test]
    fn user_and_assistant_are_never_errors() {
        let user = Message::user(1, "hi".into(), "09:00".into());
        let reply = Message::assistant(2, "hello".into(), "09:01".into());
        assert!(!user.is_error());
        assert!(!user.is_assistant());
        assert!(!reply.is_error());
        assert!(reply.is_assistant());
    }

    #[test]
    fn timestamp_is_hours_and_minutes() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 5);
        assert_eq!(&ts[2..3], ":");
        assert!(ts[..2].chars().all(|c| c.is_ascii_digit()));
        assert!(ts[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
