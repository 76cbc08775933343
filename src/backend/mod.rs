pub mod client;
pub mod form_post;

pub use client::{BackendError, ChatBackend};
pub use form_post::FormPostBackend;
