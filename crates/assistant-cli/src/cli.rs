//! Command-line interface definition using clap.
//!
//! Clap handles flag parsing and usage text; every subcommand is then
//! lowered to the shared [`Command`] model so execution is identical
//! to the chat front-end.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use assistant_models::{Command, Verb};

/// AI assistant - project-aware coding helper
#[derive(Parser, Debug)]
#[command(name = "ai-assistant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "ASSISTANT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Provider adapter for chat and generate
    #[arg(short, long, env = "ASSISTANT_PROVIDER")]
    pub provider: Option<String>,

    /// Print the result as JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Analyze one file in the active project
    Analyze {
        /// File path relative to the project root
        #[arg(required = true)]
        file: String,
    },

    /// Analyze the whole project tree
    AnalyzeProject {
        /// Project name (active project if omitted)
        name: Option<String>,
    },

    /// Ask the AI assistant
    Chat {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Generate code for a prompt
    Generate {
        /// Prompt text
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List all projects
    List,

    /// Create a new project
    Create {
        #[arg(required = true)]
        name: String,
    },

    /// Make a project the active one
    Switch {
        #[arg(required = true)]
        name: String,
    },

    /// Show project details (active project if omitted)
    Info { name: Option<String> },
}

impl Cli {
    /// Returns the state directory path, using the default if not
    /// specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(assistant_core::config::state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Lowers the parsed arguments to the shared command model. No
    /// subcommand means `help`.
    pub fn to_command(&self) -> Command {
        let Some(command) = &self.command else {
            return Command::new(Verb::Help);
        };
        match command {
            Commands::Project { action } => match action {
                ProjectAction::List => Command::new(Verb::ProjectList),
                ProjectAction::Create { name } => {
                    Command::with_args(Verb::ProjectCreate, [name.as_str()])
                }
                ProjectAction::Switch { name } => {
                    Command::with_args(Verb::ProjectSwitch, [name.as_str()])
                }
                ProjectAction::Info { name } => match name {
                    Some(name) => Command::with_args(Verb::ProjectInfo, [name.as_str()]),
                    None => Command::new(Verb::ProjectInfo),
                },
            },
            Commands::Analyze { file } => Command::with_args(Verb::Analyze, [file.as_str()]),
            Commands::AnalyzeProject { name } => match name {
                Some(name) => Command::with_args(Verb::AnalyzeProject, [name.as_str()]),
                None => Command::new(Verb::AnalyzeProject),
            },
            Commands::Chat { text } => Command::with_args(Verb::Chat, [text.join(" ")]),
            Commands::Generate { prompt } => {
                Command::with_args(Verb::Generate, [prompt.join(" ")])
            }
        }
    }
}
