// Entrypoint for the CLI application.
// - Loads `.env`, reads the token, parses the single URL argument.
// - Returns `anyhow::Result` so a missing token or a network failure
//   ends the process with a non-zero status.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vk_link_cli::{api::VkClient, config::Config, ui};

/// Программа для сокращения ссылок и проверки кликов
#[derive(Parser)]
#[command(name = "vk-link")]
struct Cli {
    /// Введите ссылку
    url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let cli = Cli::parse();

    let api = VkClient::from_config(&config)?;
    ui::run(&api, cli.url.as_deref(), &mut std::io::stdout().lock())?;
    Ok(())
}
