//! Telegram front-end.
//!
//! Messages are reduced to the shared command model by the same parser
//! the CLI uses; slash-prefixed text is treated as an explicit command
//! and everything else falls through to the `chat` verb.

pub mod bot;
pub mod error;
pub mod handlers;

pub use bot::AssistantBot;
pub use error::{BotError, Result};
