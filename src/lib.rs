/// cleanbot - A Slack chatbot that removes stale deployment directories on request.
///
/// The bot connects over Slack Socket Mode, watches its permitted channels for
/// messages that start by mentioning it, and answers a handful of commands:
/// `help`, `ping`, greetings, and `cleanup <web|mobile> <dir>...`, which deletes
/// the named directories under a configured base directory.
///
/// # Architecture
///
/// - `core` holds the platform-independent pieces: bot state built at
///   authentication, the command dispatcher, the cleanup handler and the notifier
/// - `slack` adapts them to Slack: Web API client, Socket Mode gateway,
///   mention parsing and reply templates
/// - slack-morphism for Slack API interactions
/// - Tokio for the async runtime
///
/// # Example
///
/// ```no_run
/// use cleanbot::core::config::AppConfig;
/// use cleanbot::slack::SlackBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     cleanbot::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let bot = SlackBot::new(&config)?;
///     bot.run().await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod core;
pub mod errors;
pub mod slack;
pub mod utils;

pub use errors::SlackError;

/// Configure structured logging with JSON output.
///
/// The filter comes from `RUST_LOG` and defaults to `info` (`debug` with the
/// `debug-logs` feature). Calling it more than once is harmless; only the first
/// call installs a subscriber.
///
/// # Example
///
/// ```
/// cleanbot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Routes panics through `tracing` instead of stderr.
///
/// Panics inside event handlers are caught by the session and do not stop the
/// bot; this hook makes sure they still show up in the structured log.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(location = %location, "Unexpected panic: {}", info);
    }));
}
