//! The command model shared by the CLI and chat front-ends.
//!
//! Every request, regardless of the surface it arrived on, is reduced
//! to a [`Command`]: one verb, ordered positional arguments, and named
//! options. Execution produces exactly one [`CommandResult`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The operation a command requests.
///
/// The set is closed: input that does not resolve to one of the named
/// verbs becomes [`Verb::Unknown`]. There is no fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verb {
    /// Show usage information.
    Help,
    /// List all registered projects.
    ProjectList,
    /// Create a new project.
    ProjectCreate,
    /// Make a project the active one.
    ProjectSwitch,
    /// Show metadata for a project (the active one by default).
    ProjectInfo,
    /// Analyze a single file inside the active project.
    Analyze,
    /// Analyze the whole active project tree.
    AnalyzeProject,
    /// Forward free text to the language-model provider.
    Chat,
    /// Ask the provider to generate code for a prompt.
    Generate,
    /// Input that resolved to no known verb.
    Unknown,
}

impl Verb {
    /// Canonical kebab-case name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Help => "help",
            Verb::ProjectList => "project-list",
            Verb::ProjectCreate => "project-create",
            Verb::ProjectSwitch => "project-switch",
            Verb::ProjectInfo => "project-info",
            Verb::Analyze => "analyze",
            Verb::AnalyzeProject => "analyze-project",
            Verb::Chat => "chat",
            Verb::Generate => "generate",
            Verb::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request: one verb plus its arguments.
///
/// Commands are built fresh per invocation by a front-end parser and
/// are not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// The requested operation.
    pub verb: Verb,

    /// Ordered positional arguments.
    #[serde(default)]
    pub args: Vec<String>,

    /// Named options. Keys are unique; a BTreeMap keeps iteration
    /// order deterministic.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Command {
    /// Creates a command with no arguments.
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            args: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    /// Creates a command with positional arguments.
    pub fn with_args(verb: Verb, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            verb,
            args: args.into_iter().map(Into::into).collect(),
            options: BTreeMap::new(),
        }
    }

    /// Returns the positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Returns a named option value, if present.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Terminal status of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    /// The command completed successfully.
    Succeeded,
    /// The request itself was invalid (bad verb, bad arguments,
    /// missing project, duplicate project).
    FailedUser,
    /// The system failed: local I/O, provider error, or timeout.
    FailedSystem,
}

/// The uniform outcome of dispatching one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Terminal status.
    pub status: CommandStatus,

    /// Human-readable message for display on either front-end.
    pub message: String,

    /// Optional structured payload (e.g. an analysis report).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl CommandResult {
    /// Creates a success result.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Succeeded,
            message: message.into(),
            payload: None,
        }
    }

    /// Creates a success result carrying a structured payload.
    pub fn ok_with_payload(message: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            status: CommandStatus::Succeeded,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// Creates a user-error result.
    pub fn user_error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::FailedUser,
            message: message.into(),
            payload: None,
        }
    }

    /// Creates a system-error result.
    pub fn system_error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::FailedSystem,
            message: message.into(),
            payload: None,
        }
    }

    /// Returns true if the command succeeded.
    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Succeeded
    }

    /// Process exit code for this result: 0 on success, 1 for user
    /// errors, 2 for system errors.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            CommandStatus::Succeeded => 0,
            CommandStatus::FailedUser => 1,
            CommandStatus::FailedSystem => 2,
        }
    }
}
