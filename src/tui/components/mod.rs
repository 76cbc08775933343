//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `Header`: assistant name, online marker, theme toggle
//! - `MessageBubble`: a single message with author label and timestamp
//! - `TypingIndicator`: pending-reply placeholder
//! - `WelcomePanel`: shown while the conversation is empty
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: the draft and its submission rules
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), not by
//! reading `App` directly. The theme reaches every component as a `Palette`
//! value; the awaiting flag reaches the input box as `disabled`.
//!
//! ```rust,ignore
//! tui.input_box.disabled = app.awaiting_response;
//! tui.input_box.palette = Palette::for_theme(app.theme);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── header.rs           (Top bar)
//! ├── message.rs          (Single message bubble)
//! ├── message_list.rs     (Scrollable message container)
//! ├── typing_indicator.rs (Pending reply bubble)
//! ├── welcome.rs          (Empty-conversation panel)
//! └── input_box/          (Draft editor)
//! ```

pub mod header;
pub use header::{HEADER_HEIGHT, Header, HeaderEvent};
pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod message;
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod typing_indicator;
pub mod welcome;
