//! # Application State
//!
//! Core business state for medchat. Domain logic only, no TUI types.
//! Presentation state (scroll offsets, draft cursor, animation) lives in the
//! `tui` module.
//!
//! ```text
//! App
//! ├── messages: Vec<Message>     // chronological, append-only
//! ├── awaiting_response: bool    // a round trip is in flight
//! ├── theme: Theme               // light or dark palette
//! └── next_id: u64               // id handed to the next message
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::message::{Message, timestamp_now};

/// Colour scheme flag. Only affects presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

pub struct App {
    messages: Vec<Message>,
    pub awaiting_response: bool,
    pub theme: Theme,
    next_id: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            awaiting_response: false,
            theme: Theme::default(),
            next_id: 1,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            theme: config.theme,
            ..Self::new()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_user(&mut self, text: String) -> &Message {
        let id = self.take_id();
        self.messages.push(Message::user(id, text, timestamp_now()));
        &self.messages[self.messages.len() - 1]
    }

    pub(crate) fn push_reply(&mut self, text: String) -> &Message {
        let id = self.take_id();
        self.messages.push(Message::assistant(id, text, timestamp_now()));
        &self.messages[self.messages.len() - 1]
    }

    pub(crate) fn push_failure(&mut self) -> &Message {
        let id = self.take_id();
        self.messages.push(Message::failure(id, timestamp_now()));
        &self.messages[self.messages.len() - 1]
    }
}
