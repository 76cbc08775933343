//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{BackendError, ChatBackend};
use crate::core::state::App;

/// A backend that answers every question with a canned outcome and
/// remembers what it was asked.
pub struct StubBackend {
    reply: Option<String>,
    pub asked: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            asked: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send(&self, text: &str) -> Result<String, BackendError> {
        self.asked.lock().unwrap().push(text.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(BackendError::Network("connection refused".to_string())),
        }
    }
}

/// Creates an App with a short conversation already in the log.
pub fn app_with_exchange() -> App {
    use crate::core::action::{Action, update};

    let mut app = App::new();
    update(&mut app, Action::Submit("What is a fever?".to_string()));
    update(
        &mut app,
        Action::ResponseReceived("A body temperature above 38°C.".to_string()),
    );
    app
}
