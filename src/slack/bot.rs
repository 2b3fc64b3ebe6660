use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::client::SlackClient;
use super::socket::SocketModeGateway;
use crate::core::cleanup::TokioFs;
use crate::core::config::AppConfig;
use crate::core::session::Session;
use crate::errors::SlackError;

/// Capacity of the queue between the socket listener and the session.
const EVENT_QUEUE_CAPACITY: usize = 256;

/// The running bot: a Socket Mode gateway feeding a single session.
pub struct SlackBot {
    config: AppConfig,
    slack_client: SlackClient,
}

impl SlackBot {
    /// # Errors
    ///
    /// Returns an error if the Slack HTTP client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Self, SlackError> {
        let slack_client = SlackClient::new(config.slack_bot_token.clone())?;
        Ok(Self {
            config: config.clone(),
            slack_client,
        })
    }

    /// Runs until the gateway stops.
    ///
    /// Events are handled strictly in arrival order; a handler finishes before
    /// the next event is looked at.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error if authentication or the socket connection
    /// fails. This is fatal for the process.
    pub async fn run(self) -> Result<(), SlackError> {
        for name in self.config.empty_base_dirs() {
            warn!("{} is empty; cleanup targets resolve against the working directory", name);
        }

        let (tx, mut rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let gateway = SocketModeGateway::new(
            self.slack_client.clone(),
            self.config.slack_app_token.clone(),
        );
        let listener = tokio::spawn(gateway.run(tx));

        let mut session = Session::new(
            self.config.clone(),
            Arc::new(self.slack_client.clone()),
            Arc::new(TokioFs),
        );
        while let Some(event) = rx.recv().await {
            session.handle_event(event).await;
        }

        info!("Gateway event stream closed");
        match listener.await {
            Ok(result) => result,
            Err(e) => {
                error!("Gateway task failed: {}", e);
                Err(SlackError::GeneralError(format!("gateway task failed: {e}")))
            }
        }
    }
}
