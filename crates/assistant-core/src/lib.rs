//! The command core: parsing, classification and dispatch.
//!
//! Both front-ends (CLI and Telegram bot) reduce their input to the
//! shared [`assistant_models::Command`] through the parsers in
//! [`parse`], ask [`classify`] whether the command is local
//! (`Simple`) or network-bound (`Rich`), and hand it to the
//! [`Dispatcher`]. Everything after parsing is front-end-agnostic.

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod format;
pub mod parse;

pub use classify::{classify, ExecutionMode};
pub use dispatch::Dispatcher;

pub use assistant_models::{Command, CommandResult};
