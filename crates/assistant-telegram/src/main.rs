//! AI assistant Telegram bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p assistant-telegram
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use assistant_core::config;
use assistant_telegram::AssistantBot;

/// Telegram bot for the AI assistant
#[derive(Parser, Debug)]
#[command(name = "assistant-telegram")]
#[command(about = "Telegram bot for the AI assistant")]
struct Args {
    /// Provider adapter for chat and generate
    #[arg(short, long, env = "ASSISTANT_PROVIDER")]
    provider: Option<String>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load provider credentials and the bot token from .env if present
    let _ = dotenvy::dotenv();

    let filter = match args.verbose {
        0 => "assistant_telegram=info,teloxide=warn",
        1 => "assistant_telegram=debug,teloxide=info",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let provider = args.provider.unwrap_or_else(config::provider_name);
    let bot = AssistantBot::new(&config::state_dir(), &provider)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("AI Assistant Telegram Bot");
            println!("   Bot: @{}", username);
            println!("   Provider: {}", provider);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\nOpen Telegram and send /start to begin");
    println!("Press Ctrl+C to stop\n");

    bot.run().await?;
    Ok(())
}
