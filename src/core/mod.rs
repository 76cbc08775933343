//! # Core Application Logic
//!
//! This module contains medchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (session state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  Backend   │
//!            │  Adapter   │            │  (reqwest) │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: The immutable `Message` record
//! - [`config`]: Settings resolution (file, env, CLI)

pub mod action;
pub mod config;
pub mod message;
pub mod state;
