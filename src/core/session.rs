//! Sequential handling of gateway events.

use std::sync::Arc;
use tracing::{error, warn};

use super::cleanup::CleanupFs;
use super::config::AppConfig;
use super::dispatcher::{DispatchOutcome, SessionContext};
use super::models::GatewayEvent;
use super::notifier::{MessageSink, Notifier};
use super::state::BotState;

/// Owns the bot session and applies gateway events one at a time.
///
/// The context is created by the first `Authenticated` event and is read-only
/// afterwards. Events arriving before authentication are dropped.
pub struct Session {
    config: AppConfig,
    sink: Arc<dyn MessageSink>,
    fs: Arc<dyn CleanupFs>,
    context: Option<Arc<SessionContext>>,
}

impl Session {
    #[must_use]
    pub fn new(config: AppConfig, sink: Arc<dyn MessageSink>, fs: Arc<dyn CleanupFs>) -> Self {
        Self {
            config,
            sink,
            fs,
            context: None,
        }
    }

    /// Applies one event. Returns the dispatch outcome for message events.
    ///
    /// Message handling runs on its own task so a panicking handler is logged
    /// and the session keeps processing later events.
    pub async fn handle_event(&mut self, event: GatewayEvent) -> Option<DispatchOutcome> {
        match event {
            GatewayEvent::Authenticated(payload) => {
                if self.context.is_some() {
                    warn!("Ignoring repeated authentication; bot state is fixed for the process");
                    return None;
                }
                let state = BotState::from_authentication(&self.config, payload);
                let notifier = Notifier::new(Arc::clone(&self.sink), state.permitted_channel_ids());
                self.context = Some(Arc::new(SessionContext::new(
                    self.config.clone(),
                    state,
                    notifier,
                    Arc::clone(&self.fs),
                )));
                None
            }
            GatewayEvent::ConnectionOpened => {
                match &self.context {
                    Some(context) => context.welcome().await,
                    None => warn!("Connection opened before authentication; skipping welcome"),
                }
                None
            }
            GatewayEvent::Message(message) => {
                let Some(context) = self.context.clone() else {
                    warn!(channel = %message.channel, "Dropping message received before authentication");
                    return None;
                };
                let handle = tokio::spawn(async move { context.dispatch(&message).await });
                match handle.await {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        error!("Message handler failed: {}", e);
                        None
                    }
                }
            }
        }
    }
}
