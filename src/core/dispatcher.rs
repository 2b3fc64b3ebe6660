//! Routes eligible inbound messages to the command handlers.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::cleanup::{CleanupFs, CleanupHandler, CleanupReport};
use super::config::AppConfig;
use super::models::{CleanupContext, CleanupRequest, IncomingMessage, ParsedCommand};
use super::notifier::Notifier;
use super::state::BotState;
use crate::slack::command_parser::parse_command;
use crate::slack::response_builder::{Placeholder, Reply, Template};

/// Greeting words answered with the hello template.
pub const GREETINGS: [&str; 4] = ["hello", "hi", "hai", "hei"];

/// The fixed command set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Cleanup(Vec<String>),
    Greet(String),
    Ping,
    Unknown(String),
}

impl From<ParsedCommand> for Command {
    fn from(parsed: ParsedCommand) -> Self {
        match parsed.name.as_str() {
            "help" => Command::Help,
            "cleanup" => Command::Cleanup(parsed.args),
            "ping" => Command::Ping,
            word if GREETINGS.contains(&word) => Command::Greet(parsed.name),
            _ => Command::Unknown(parsed.name),
        }
    }
}

/// What the dispatcher did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored,
    Help,
    IncorrectCommand,
    Cleanup(CleanupReport),
    Greeting,
    Pong,
    NotRecognised,
}

/// Everything a handler needs, built once the session is authenticated.
pub struct SessionContext {
    config: AppConfig,
    state: BotState,
    notifier: Notifier,
    fs: Arc<dyn CleanupFs>,
}

impl SessionContext {
    #[must_use]
    pub fn new(
        config: AppConfig,
        state: BotState,
        notifier: Notifier,
        fs: Arc<dyn CleanupFs>,
    ) -> Self {
        Self {
            config,
            state,
            notifier,
            fs,
        }
    }

    /// Announces the bot in every permitted channel.
    pub async fn welcome(&self) {
        let text = Reply::new(Template::Welcome)
            .with(Placeholder::BotName, self.state.identity.name.as_str())
            .build();
        self.notifier.notify(&text).await;
    }

    /// Only plain `message` events from our team in a permitted channel qualify.
    #[must_use]
    pub fn is_eligible(&self, message: &IncomingMessage) -> bool {
        let identity = &self.state.identity;
        message.kind == "message"
            && message.team == identity.team.id
            && identity.permits_channel(&message.channel)
            && message.subtype.is_none()
    }

    pub async fn dispatch(&self, message: &IncomingMessage) -> DispatchOutcome {
        if let Some(subtype) = &message.subtype {
            debug!(channel = %message.channel, "Message Sub Type: {}", subtype);
        }
        if !self.is_eligible(message) {
            return DispatchOutcome::Ignored;
        }

        let Some(parsed) = parse_command(&message.text, &self.state.identity.id) else {
            return DispatchOutcome::Ignored;
        };

        #[cfg(feature = "debug-logs")]
        debug!(user = %message.user, "Received command text: {}", message.text);

        #[cfg(not(feature = "debug-logs"))]
        debug!(
            user = %message.user,
            "Received command text ({} chars, content masked)",
            message.text.len()
        );

        let user_id = message.user.as_str();
        let user_name = self.state.users.display_name(user_id);
        let command = Command::from(parsed);
        info!(channel = %message.channel, user = %user_id, command = ?command, "Dispatching command");

        match command {
            Command::Help => {
                self.notifier.notify(Template::Help.text()).await;
                DispatchOutcome::Help
            }
            Command::Cleanup(args) if args.len() < 2 => {
                let text = Reply::new(Template::IncorrectCommand)
                    .for_user(user_id, user_name)
                    .append(Template::Help.text())
                    .build();
                self.notifier.notify(&text).await;
                DispatchOutcome::IncorrectCommand
            }
            Command::Cleanup(mut args) => {
                let context_arg = args.remove(0);
                let request = CleanupRequest {
                    correlation_id: Uuid::new_v4().to_string(),
                    user_id: user_id.to_string(),
                    context: CleanupContext::from_arg(&context_arg),
                    context_arg,
                    targets: args,
                };
                let report = CleanupHandler::new(&self.config, self.fs.as_ref(), &self.notifier)
                    .handle(&request, user_name)
                    .await;
                DispatchOutcome::Cleanup(report)
            }
            Command::Greet(word) => {
                let text = Reply::new(Template::Hello)
                    .with(Placeholder::Greet, word)
                    .for_user(user_id, user_name)
                    .build();
                self.notifier.notify(&text).await;
                DispatchOutcome::Greeting
            }
            Command::Ping => {
                self.notifier.notify(Template::Pong.text()).await;
                DispatchOutcome::Pong
            }
            Command::Unknown(_) => {
                self.notifier
                    .notify(Template::CommandNotRecognised.text())
                    .await;
                DispatchOutcome::NotRecognised
            }
        }
    }
}
