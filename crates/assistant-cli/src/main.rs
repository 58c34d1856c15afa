//! AI assistant CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use assistant_cli::cli::Cli;
use assistant_cli::commands;

fn main() {
    // Load .env if it exists (provider credentials etc.)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));
    fmt().with_env_filter(filter).with_target(false).init();

    let provider = cli
        .provider
        .clone()
        .unwrap_or_else(assistant_core::config::provider_name);

    let command = cli.to_command();
    let result = commands::execute(&command, &cli.state_dir(), &provider);

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    } else if result.is_success() {
        println!("{}", result.message);
    } else {
        eprintln!("Error: {}", result.message);
    }

    std::process::exit(result.exit_code());
}
