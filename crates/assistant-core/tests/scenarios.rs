//! End-to-end flows through parse, classify and dispatch.

use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::tempdir;

use assistant_core::{classify, parse, Dispatcher, ExecutionMode};
use assistant_gateway::{ChatMessage, ProviderGateway};
use assistant_models::{CommandStatus, Verb};
use assistant_persistence::ProjectStore;

struct EchoGateway;

#[async_trait]
impl ProviderGateway for EchoGateway {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn ask(&self, messages: &[ChatMessage]) -> assistant_gateway::Result<String> {
        Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
    }
}

struct StalledGateway;

#[async_trait]
impl ProviderGateway for StalledGateway {
    fn name(&self) -> &'static str {
        "stalled"
    }

    async fn ask(&self, _messages: &[ChatMessage]) -> assistant_gateway::Result<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(String::new())
    }
}

/// Runs one input string the way a chat front-end would: parse,
/// classify, dispatch.
fn run_text(text: &str, dispatcher: &Dispatcher, store: &mut ProjectStore) -> assistant_models::CommandResult {
    let command = parse::from_text(text);
    assert_eq!(classify(command.verb), ExecutionMode::Simple);
    dispatcher.dispatch_simple(&command, store)
}

#[test]
fn test_project_lifecycle_over_chat_surface() {
    let dir = tempdir().unwrap();
    let mut store = ProjectStore::open(dir.path()).unwrap();
    let dispatcher = Dispatcher::new(Duration::from_secs(5));

    let created = run_text("project create demo", &dispatcher, &mut store);
    assert!(created.is_success(), "{}", created.message);

    let switched = run_text("/project switch demo", &dispatcher, &mut store);
    assert!(switched.is_success());

    let listed = run_text("project list", &dispatcher, &mut store);
    assert!(listed.message.contains("* demo"));

    let info = run_text("project info", &dispatcher, &mut store);
    assert!(info.message.contains("Status: active"));
}

#[test]
fn test_both_surfaces_produce_the_same_command() {
    let from_cli = parse::from_tokens(&["project", "create", "demo"]);
    let from_chat = parse::from_text("project create demo");
    let from_slash = parse::from_text("/project create demo");

    assert_eq!(from_cli, from_chat);
    assert_eq!(from_cli, from_slash);
}

#[test]
fn test_duplicate_create_leaves_registry_unchanged() {
    let dir = tempdir().unwrap();
    let mut store = ProjectStore::open(dir.path()).unwrap();
    let dispatcher = Dispatcher::new(Duration::from_secs(5));

    run_text("project create demo", &dispatcher, &mut store);
    let before: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();

    let dup = run_text("project create demo", &dispatcher, &mut store);
    assert_eq!(dup.status, CommandStatus::FailedUser);
    assert_eq!(dup.exit_code(), 1);

    let after: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(before, after);
}

#[test]
fn test_analyze_project_after_switch() {
    let dir = tempdir().unwrap();
    let mut store = ProjectStore::open(dir.path()).unwrap();
    let dispatcher = Dispatcher::new(Duration::from_secs(5));

    run_text("project create demo", &dispatcher, &mut store);
    run_text("project switch demo", &dispatcher, &mut store);

    let project = store.info(None).unwrap();
    fs::write(project.path.join("README.md"), "# Demo\n").unwrap();
    fs::write(project.path.join("main.rs"), "/// Doc.\nfn main() {}\n").unwrap();

    let result = run_text("analyze-project", &dispatcher, &mut store);
    assert!(result.is_success());
    assert!(result.message.contains("Maturity"));

    let payload = result.payload.unwrap();
    assert_eq!(payload["health"]["has_readme"], true);
}

#[test]
fn test_unknown_slash_command_fails_closed() {
    let dir = tempdir().unwrap();
    let mut store = ProjectStore::open(dir.path()).unwrap();
    let dispatcher = Dispatcher::new(Duration::from_secs(5));

    let command = parse::from_text("/project creat demo");
    assert_eq!(command.verb, Verb::Unknown);

    let result = dispatcher.dispatch_simple(&command, &mut store);
    assert_eq!(result.status, CommandStatus::FailedUser);
    assert!(store.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_free_text_routes_to_the_gateway() {
    let dispatcher = Dispatcher::new(Duration::from_secs(5));

    let command = parse::from_text("how do I reverse a list?");
    assert_eq!(command.verb, Verb::Chat);
    assert_eq!(classify(command.verb), ExecutionMode::Rich);

    let result = dispatcher.dispatch_rich(&command, &EchoGateway).await;
    assert!(result.is_success());
    assert_eq!(result.message, "how do I reverse a list?");
}

#[tokio::test]
async fn test_stalled_provider_is_a_system_error() {
    let dispatcher = Dispatcher::new(Duration::from_millis(20));

    let command = parse::from_text("generate a fizzbuzz");
    let result = dispatcher.dispatch_rich(&command, &StalledGateway).await;

    assert_eq!(result.status, CommandStatus::FailedSystem);
    assert_eq!(result.exit_code(), 2);
}
