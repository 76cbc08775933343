use std::fmt;

use async_trait::async_trait;

/// Why a round trip failed. Logged, never shown: every variant renders as
/// the same apology in the conversation.
#[derive(Debug)]
pub enum BackendError {
    /// Client could not be built (bad TLS setup, invalid endpoint).
    Config(String),
    /// Connection refused, DNS failure, timeout, reset.
    Network(String),
    /// Non-2xx status while `strict_status` is on.
    Status { status: u16, body: String },
    /// The response body could not be read as text.
    Body(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Status { status, body } => {
                write!(f, "backend returned HTTP {status}: {body}")
            }
            BackendError::Body(msg) => write!(f, "body read error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Text in, text out. One call per round trip, no conversation history.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Send one question and return the reply body verbatim.
    async fn send(&self, text: &str) -> Result<String, BackendError>;
}
