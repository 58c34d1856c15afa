//! Bot setup and the teloxide dispatch tree.

use std::path::Path;
use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{info, warn};

use assistant_core::Dispatcher as CommandDispatcher;
use assistant_gateway::create_gateway;
use assistant_persistence::ProjectStore;

use crate::error::{BotError, Result};
use crate::handlers::{handle_help, handle_start, handle_text, BotCommand, BotState};

/// The Telegram bot for the AI assistant.
pub struct AssistantBot {
    bot: Bot,
    state: Arc<BotState>,
}

impl AssistantBot {
    /// Creates the bot.
    ///
    /// Requires `TELEGRAM_BOT_TOKEN` to be set; opens the project
    /// store under `state_dir` and selects the provider adapter by
    /// name.
    pub fn new(state_dir: &Path, provider: &str) -> Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| BotError::NoToken)?;

        let store = ProjectStore::open(state_dir)?;
        let gateway = create_gateway(provider)?;

        let state = Arc::new(BotState {
            store: tokio::sync::Mutex::new(store),
            gateway,
            dispatcher: CommandDispatcher::from_env(),
        });

        Ok(Self {
            bot: Bot::new(token),
            state,
        })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Runs the bot in long-polling mode until interrupted.
    pub async fn run(&self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        let bot = self.bot.clone();
        let state_for_text = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<BotCommand>()
                    .endpoint(|bot: Bot, msg: Message, cmd: BotCommand| async move {
                        match cmd {
                            BotCommand::Start => handle_start(bot, msg).await,
                            BotCommand::Help => handle_help(bot, msg).await,
                        }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.text().is_some())
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_text);
                        async move { handle_text(bot, msg, state).await }
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
