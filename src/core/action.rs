//! # Actions
//!
//! Everything that can happen in medchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend replies? That's `Action::ResponseReceived(body)`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! One round trip walks `Idle → Sending → Delivered | Failed → Idle`:
//! `Submit` enters Sending, and either completion action returns to Idle.

use log::{debug, info, warn};

use crate::backend::BackendError;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Trimmed, non-empty draft raised by the input box.
    Submit(String),
    /// The backend answered; the body is shown verbatim.
    ResponseReceived(String),
    /// The call failed. The cause is for the log only.
    RequestFailed(String),
    ToggleTheme,
    Quit,
}

impl Action {
    /// Collapse a backend outcome into the action the event loop dispatches.
    pub fn from_outcome(outcome: Result<String, BackendError>) -> Self {
        match outcome {
            Ok(body) => Action::ResponseReceived(body),
            Err(e) => Action::RequestFailed(e.to_string()),
        }
    }
}

/// I/O requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send this text to the backend.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if app.awaiting_response {
                warn!("Submit ignored: a response is still pending");
                return Effect::None;
            }
            let id = app.push_user(text.clone()).id();
            app.awaiting_response = true;
            info!("User message {} queued ({} bytes)", id, text.len());
            Effect::SpawnRequest(text)
        }
        Action::ResponseReceived(body) => {
            if !app.awaiting_response {
                warn!("Dropping response with no request in flight");
                return Effect::None;
            }
            let id = app.push_reply(body).id();
            app.awaiting_response = false;
            debug!("Assistant message {} appended", id);
            Effect::None
        }
        Action::RequestFailed(cause) => {
            if !app.awaiting_response {
                warn!("Dropping failure with no request in flight: {}", cause);
                return Effect::None;
            }
            warn!("Request failed: {}", cause);
            app.push_failure();
            app.awaiting_response = false;
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            debug!("Theme switched to {}", app.theme.label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
