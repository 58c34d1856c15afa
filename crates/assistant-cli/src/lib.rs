//! Command-line front-end.
//!
//! Clap parses the argument vector, [`cli::Cli::to_command`] lowers it
//! to the shared command model, and [`commands::execute`] runs it
//! through the same dispatcher the chat front-end uses.

pub mod cli;
pub mod commands;
