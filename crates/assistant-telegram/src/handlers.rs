//! Message handlers for the Telegram bot.
//!
//! Every incoming text goes through the same pipeline the CLI uses:
//! parse to the shared command model, classify, dispatch. The handlers
//! here only move text in and out of Telegram.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatAction;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use assistant_core::{classify, format, parse, Command, Dispatcher, ExecutionMode};
use assistant_gateway::ProviderGateway;
use assistant_persistence::ProjectStore;

/// Bot commands teloxide registers with Telegram for autocompletion.
/// Everything else, slash-prefixed or not, is parsed by the shared
/// command parser.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "Start the bot and get help")]
    Start,

    #[command(description = "Show available commands")]
    Help,
}

/// State shared across handlers.
pub struct BotState {
    /// Project store, serialized behind a mutex: Telegram updates
    /// arrive concurrently but store mutations must not interleave.
    pub store: tokio::sync::Mutex<ProjectStore>,
    /// Selected provider adapter.
    pub gateway: Arc<dyn ProviderGateway>,
    /// Shared dispatcher.
    pub dispatcher: Dispatcher,
}

/// Runs one parsed command through classify and dispatch, and
/// returns the reply to send.
pub async fn respond(command: &Command, state: &BotState) -> String {
    let result = match classify(command.verb) {
        ExecutionMode::Simple => {
            let mut store = state.store.lock().await;
            state.dispatcher.dispatch_simple(command, &mut store)
        }
        ExecutionMode::Rich => {
            state
                .dispatcher
                .dispatch_rich(command, state.gateway.as_ref())
                .await
        }
    };

    if result.is_success() {
        result.message
    } else {
        format!("Error: {}", result.message)
    }
}

/// Handle the /start command.
pub async fn handle_start(bot: Bot, msg: Message) -> ResponseResult<()> {
    let welcome = format!(
        "Welcome! I manage your coding projects and answer questions.\n\n\
         Send a command like 'project create demo', or just ask me \
         something in plain text.\n\n{}",
        format::help_text()
    );
    bot.send_message(msg.chat.id, welcome).await?;

    info!(chat_id = %msg.chat.id, user = ?msg.from.as_ref().map(|u| &u.username), "User started bot");
    Ok(())
}

/// Handle the /help command.
pub async fn handle_help(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, format::help_text()).await?;
    Ok(())
}

/// Handle any other text message, slash-prefixed or free-form.
pub async fn handle_text(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let command = parse::from_text(text);

    // Provider calls can take a while; show a typing indicator.
    if classify(command.verb) == ExecutionMode::Rich {
        let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;
    }

    let reply = respond(&command, &state).await;
    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        warn!(chat_id = %msg.chat.id, error = %e, "Failed to send reply");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::tempdir;

    use assistant_gateway::ChatMessage;

    struct EchoGateway;

    #[async_trait]
    impl ProviderGateway for EchoGateway {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn ask(&self, messages: &[ChatMessage]) -> assistant_gateway::Result<String> {
            Ok(format!(
                "echo: {}",
                messages.last().map(|m| m.content.as_str()).unwrap_or("")
            ))
        }
    }

    fn state(dir: &std::path::Path) -> BotState {
        BotState {
            store: tokio::sync::Mutex::new(ProjectStore::open(dir).unwrap()),
            gateway: Arc::new(EchoGateway),
            dispatcher: Dispatcher::new(Duration::from_secs(5)),
        }
    }

    async fn reply_to(text: &str, state: &BotState) -> String {
        respond(&parse::from_text(text), state).await
    }

    #[tokio::test]
    async fn test_slash_command_mutates_the_store() {
        let dir = tempdir().unwrap();
        let state = state(dir.path());

        let reply = reply_to("/project create demo", &state).await;
        assert!(reply.contains("Created project 'demo'"), "{reply}");

        let listed = reply_to("project list", &state).await;
        assert!(listed.contains("demo"));
    }

    #[tokio::test]
    async fn test_free_text_goes_to_the_provider() {
        let dir = tempdir().unwrap();
        let state = state(dir.path());

        let reply = reply_to("how are you?", &state).await;
        assert_eq!(reply, "echo: how are you?");
    }

    #[tokio::test]
    async fn test_unknown_slash_command_reports_error() {
        let dir = tempdir().unwrap();
        let state = state(dir.path());

        let reply = reply_to("/frobnicate", &state).await;
        assert!(reply.starts_with("Error:"));
        assert!(reply.contains("frobnicate"));
    }

    #[tokio::test]
    async fn test_duplicate_create_reports_user_error() {
        let dir = tempdir().unwrap();
        let state = state(dir.path());

        reply_to("/project create demo", &state).await;
        let reply = reply_to("/project create demo", &state).await;
        assert!(reply.contains("already exists"));
    }
}
