use anyhow::{Context, Result, anyhow};
use cleanbot::core::config::AppConfig;
use cleanbot::slack::SlackBot;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    cleanbot::setup_logging();
    cleanbot::install_panic_hook();

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        anyhow!(e)
    })?;
    info!(bot_name = %config.bot_name, "Starting cleanbot");

    let bot = SlackBot::new(&config).context("Failed to initialize bot")?;

    // Losing the gateway is the only fatal failure; surface it as a non-zero exit.
    bot.run().await.map_err(|e| {
        error!("Bot stopped: {}", e);
        anyhow!(e)
    })
}
