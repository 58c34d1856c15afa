//! Command dispatch.
//!
//! The dispatcher is the single execution funnel: every parsed command
//! goes through it and comes back as exactly one
//! [`CommandResult`] — errors included. Simple commands run
//! synchronously against local state; Rich commands run against the
//! provider gateway under a bounded wait.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use assistant_analyzer::{Analyzer, AnalyzerError};
use assistant_gateway::{ChatMessage, ProviderError, ProviderGateway};
use assistant_models::{AnalysisReport, Command, CommandResult, Verb};
use assistant_persistence::{ProjectStore, StoreError};

use crate::config;
use crate::format;

/// System prompt prepended to `generate` requests.
const GENERATE_SYSTEM_PROMPT: &str =
    "You are a code generator. Reply with complete, working code for the request, \
     with a short explanation.";

/// Executes commands against the project store and the provider
/// gateway.
pub struct Dispatcher {
    timeout: Duration,
}

impl Dispatcher {
    /// Creates a dispatcher with an explicit provider-call bound.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Creates a dispatcher using the configured timeout.
    pub fn from_env() -> Self {
        Self::new(config::provider_timeout())
    }

    /// Executes a Simple command synchronously against local state.
    ///
    /// Unknown verbs are rejected here without touching the store or
    /// the network.
    pub fn dispatch_simple(&self, command: &Command, store: &mut ProjectStore) -> CommandResult {
        debug!(verb = %command.verb, "Dispatching simple command");
        match command.verb {
            Verb::Help => CommandResult::ok(format::help_text()),
            Verb::ProjectList => self.project_list(store),
            Verb::ProjectCreate => self.project_create(command, store),
            Verb::ProjectSwitch => self.project_switch(command, store),
            Verb::ProjectInfo => self.project_info(command, store),
            Verb::Analyze => self.analyze_file(command, store),
            Verb::AnalyzeProject => self.analyze_project(command, store),
            Verb::Unknown => {
                let input = command.args.join(" ");
                warn!(input = %input, "Rejected unknown command");
                CommandResult::user_error(format!(
                    "Unknown command '{}'. Try 'help' for the list of commands.",
                    input
                ))
            }
            Verb::Chat | Verb::Generate => CommandResult::system_error(format!(
                "'{}' requires the provider gateway",
                command.verb
            )),
        }
    }

    /// Executes a Rich command against the gateway, bounded by the
    /// configured timeout.
    pub async fn dispatch_rich(
        &self,
        command: &Command,
        gateway: &dyn ProviderGateway,
    ) -> CommandResult {
        let messages = match command.verb {
            Verb::Chat => {
                let Some(text) = nonempty_arg(command, 0) else {
                    return CommandResult::user_error("chat requires a message");
                };
                vec![ChatMessage::user(text)]
            }
            Verb::Generate => {
                let Some(prompt) = nonempty_arg(command, 0) else {
                    return CommandResult::user_error("generate requires a prompt");
                };
                vec![
                    ChatMessage::system(GENERATE_SYSTEM_PROMPT),
                    ChatMessage::user(prompt),
                ]
            }
            _ => {
                return CommandResult::user_error(format!(
                    "'{}' is not a provider command",
                    command.verb
                ))
            }
        };

        debug!(verb = %command.verb, provider = gateway.name(), "Dispatching rich command");
        match tokio::time::timeout(self.timeout, gateway.ask(&messages)).await {
            Ok(Ok(reply)) => CommandResult::ok(reply),
            Ok(Err(e)) => {
                warn!(provider = gateway.name(), error = %e, "Provider call failed");
                CommandResult::system_error(e.to_string())
            }
            Err(_) => {
                let e = ProviderError::Timeout(self.timeout.as_secs());
                warn!(provider = gateway.name(), error = %e, "Provider call timed out");
                CommandResult::system_error(e.to_string())
            }
        }
    }

    fn project_list(&self, store: &ProjectStore) -> CommandResult {
        match store.list() {
            Ok(projects) => {
                CommandResult::ok(format::format_project_list(&projects, store.get_active()))
            }
            Err(e) => store_error(e),
        }
    }

    fn project_create(&self, command: &Command, store: &mut ProjectStore) -> CommandResult {
        let Some(name) = command.arg(0) else {
            return CommandResult::user_error("project create requires a project name");
        };
        match store.create(name) {
            Ok(meta) => CommandResult::ok(format!(
                "Created project '{}' at {}",
                meta.name,
                meta.path.display()
            )),
            Err(e) => store_error(e),
        }
    }

    fn project_switch(&self, command: &Command, store: &mut ProjectStore) -> CommandResult {
        let Some(name) = command.arg(0) else {
            return CommandResult::user_error("project switch requires a project name");
        };
        match store.switch(name) {
            Ok(meta) => CommandResult::ok(format!("Switched to project '{}'", meta.name)),
            Err(e) => store_error(e),
        }
    }

    fn project_info(&self, command: &Command, store: &ProjectStore) -> CommandResult {
        let meta = match store.info(command.arg(0)) {
            Ok(meta) => meta,
            Err(e) => return store_error(e),
        };
        let file_count = match store.file_count(&meta.name) {
            Ok(count) => count,
            Err(e) => return store_error(e),
        };
        let is_active = store.get_active() == Some(meta.name.as_str());
        CommandResult::ok(format::format_project_info(&meta, file_count, is_active))
    }

    fn analyze_file(&self, command: &Command, store: &ProjectStore) -> CommandResult {
        let Some(file) = command.arg(0) else {
            return CommandResult::user_error("analyze requires a file path");
        };
        let meta = match store.info(None) {
            Ok(meta) => meta,
            Err(e) => return store_error(e),
        };
        match Analyzer::new(&meta.path).analyze_file(Path::new(file)) {
            Ok(report) => report_result(&report),
            Err(e) => analyzer_error(e),
        }
    }

    fn analyze_project(&self, command: &Command, store: &ProjectStore) -> CommandResult {
        let meta = match store.info(command.arg(0)) {
            Ok(meta) => meta,
            Err(e) => return store_error(e),
        };
        match Analyzer::new(&meta.path).analyze_project() {
            Ok(report) => report_result(&report),
            Err(e) => analyzer_error(e),
        }
    }
}

fn nonempty_arg<'a>(command: &'a Command, index: usize) -> Option<&'a str> {
    command.arg(index).filter(|s| !s.trim().is_empty())
}

fn report_result(report: &AnalysisReport) -> CommandResult {
    let message = format::format_report(report);
    match serde_json::to_value(report) {
        Ok(payload) => CommandResult::ok_with_payload(message, payload),
        Err(_) => CommandResult::ok(message),
    }
}

/// User mistakes map to user errors; I/O and state corruption map to
/// system errors.
fn store_error(e: StoreError) -> CommandResult {
    match e {
        StoreError::AlreadyExists(_)
        | StoreError::NotFound(_)
        | StoreError::NoActiveProject
        | StoreError::InvalidName(_) => CommandResult::user_error(e.to_string()),
        StoreError::ReadError { .. } | StoreError::WriteError { .. } | StoreError::Json(_) => {
            CommandResult::system_error(e.to_string())
        }
    }
}

fn analyzer_error(e: AnalyzerError) -> CommandResult {
    match e {
        AnalyzerError::FileNotFound(_)
        | AnalyzerError::OutsideProject(_)
        | AnalyzerError::UnsupportedFile(_) => CommandResult::user_error(e.to_string()),
        AnalyzerError::ReadError { .. } => CommandResult::system_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_models::CommandStatus;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::tempdir;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Duration::from_secs(5))
    }

    struct StubGateway {
        reply: &'static str,
        delay: Duration,
    }

    #[async_trait]
    impl ProviderGateway for StubGateway {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn ask(&self, _messages: &[ChatMessage]) -> assistant_gateway::Result<String> {
            tokio::time::sleep(self.delay).await;
            Ok(self.reply.to_string())
        }
    }

    #[test]
    fn test_help_succeeds() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();

        let result = dispatcher().dispatch_simple(&Command::new(Verb::Help), &mut store);
        assert!(result.is_success());
        assert!(result.message.contains("project create"));
    }

    #[test]
    fn test_create_then_duplicate() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();
        let d = dispatcher();
        let cmd = Command::with_args(Verb::ProjectCreate, ["demo"]);

        let first = d.dispatch_simple(&cmd, &mut store);
        assert!(first.is_success());

        let second = d.dispatch_simple(&cmd, &mut store);
        assert_eq!(second.status, CommandStatus::FailedUser);
        assert!(second.message.contains("already exists"));
    }

    #[test]
    fn test_create_requires_name() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();

        let result =
            dispatcher().dispatch_simple(&Command::new(Verb::ProjectCreate), &mut store);
        assert_eq!(result.status, CommandStatus::FailedUser);
        assert!(result.message.contains("name"));
    }

    #[test]
    fn test_switch_missing_project() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();

        let cmd = Command::with_args(Verb::ProjectSwitch, ["ghost"]);
        let result = dispatcher().dispatch_simple(&cmd, &mut store);
        assert_eq!(result.status, CommandStatus::FailedUser);
        assert!(result.message.contains("not found"));
    }

    #[test]
    fn test_info_without_active_project() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();

        let result =
            dispatcher().dispatch_simple(&Command::new(Verb::ProjectInfo), &mut store);
        assert_eq!(result.status, CommandStatus::FailedUser);
        assert!(result.message.contains("no active project"));
    }

    #[test]
    fn test_analyze_project_reports_payload() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();
        let d = dispatcher();

        let meta = store.create("demo").unwrap();
        fs::write(meta.path.join("main.rs"), "/// Doc.\nfn main() {}\n").unwrap();
        store.switch("demo").unwrap();

        let result = d.dispatch_simple(&Command::new(Verb::AnalyzeProject), &mut store);
        assert!(result.is_success());
        assert!(result.message.contains("Maturity"));

        let payload = result.payload.unwrap();
        assert_eq!(payload["file_count"], 1);
    }

    #[test]
    fn test_analyze_file_outside_project_is_user_error() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();
        let d = dispatcher();

        store.create("demo").unwrap();
        store.switch("demo").unwrap();
        fs::write(dir.path().join("secret.txt"), "shh").unwrap();

        let cmd = Command::with_args(Verb::Analyze, ["../../secret.txt"]);
        let result = d.dispatch_simple(&cmd, &mut store);
        assert_eq!(result.status, CommandStatus::FailedUser);
    }

    #[test]
    fn test_unknown_command_is_rejected_locally() {
        let dir = tempdir().unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();

        let cmd = Command::with_args(Verb::Unknown, ["frobnicate"]);
        let result = dispatcher().dispatch_simple(&cmd, &mut store);
        assert_eq!(result.status, CommandStatus::FailedUser);
        assert!(result.message.contains("frobnicate"));
        assert!(result.message.contains("help"));
    }

    #[tokio::test]
    async fn test_chat_returns_provider_reply() {
        let gateway = StubGateway {
            reply: "hello back",
            delay: Duration::ZERO,
        };
        let cmd = Command::with_args(Verb::Chat, ["hello"]);

        let result = dispatcher().dispatch_rich(&cmd, &gateway).await;
        assert!(result.is_success());
        assert_eq!(result.message, "hello back");
    }

    #[tokio::test]
    async fn test_chat_requires_text() {
        let gateway = StubGateway {
            reply: "unused",
            delay: Duration::ZERO,
        };

        let result = dispatcher()
            .dispatch_rich(&Command::new(Verb::Chat), &gateway)
            .await;
        assert_eq!(result.status, CommandStatus::FailedUser);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_as_system_error() {
        let gateway = StubGateway {
            reply: "too late",
            delay: Duration::from_millis(200),
        };
        let d = Dispatcher::new(Duration::from_millis(20));

        let cmd = Command::with_args(Verb::Chat, ["hello"]);
        let result = d.dispatch_rich(&cmd, &gateway).await;
        assert_eq!(result.status, CommandStatus::FailedSystem);
        assert!(result.message.contains("timed out"));
        assert_eq!(result.exit_code(), 2);
    }
}
