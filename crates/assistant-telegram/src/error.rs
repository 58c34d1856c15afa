//! Error types for the Telegram bot.

use thiserror::Error;

use assistant_gateway::ProviderError;
use assistant_persistence::StoreError;

/// Errors that can occur while setting up or running the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// The project store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The provider gateway could not be created.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
