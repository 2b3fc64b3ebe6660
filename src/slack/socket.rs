//! Socket Mode connection gateway.
//!
//! Uses slack-morphism's socket mode listener to receive events over a
//! WebSocket. Callbacks only translate Slack payloads into [`GatewayEvent`]s
//! and queue them; the bot consumes the queue one event at a time.

use slack_morphism::prelude::*;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::client::SlackClient;
use crate::core::models::{GatewayEvent, IncomingMessage};
use crate::errors::SlackError;

/// Shared state for socket mode callbacks.
#[derive(Clone)]
struct GatewayState {
    events: mpsc::Sender<GatewayEvent>,
}

pub struct SocketModeGateway {
    client: SlackClient,
    app_token: SlackApiToken,
}

impl SocketModeGateway {
    #[must_use]
    pub fn new(client: SlackClient, app_token: String) -> Self {
        Self {
            client,
            app_token: SlackApiToken::new(SlackApiTokenValue::new(app_token)),
        }
    }

    /// Authenticates, connects, and forwards events until the listener stops.
    ///
    /// Emits `Authenticated` first and `ConnectionOpened` once the socket is up.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails, the socket cannot be opened,
    /// or the event consumer has gone away.
    pub async fn run(self, events: mpsc::Sender<GatewayEvent>) -> Result<(), SlackError> {
        let payload = self.client.fetch_authentication().await?;
        events
            .send(GatewayEvent::Authenticated(payload))
            .await
            .map_err(|_| consumer_gone())?;

        let callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_events);

        let listener_env = Arc::new(
            SlackClientEventsListenerEnvironment::new(self.client.hyper_client())
                .with_error_handler(handle_listener_error)
                .with_user_state(GatewayState {
                    events: events.clone(),
                }),
        );

        let listener = SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_env,
            callbacks,
        );

        listener.listen_for(&self.app_token).await?;
        info!("Slack socket mode connected");

        events
            .send(GatewayEvent::ConnectionOpened)
            .await
            .map_err(|_| consumer_gone())?;

        let exit_code = listener.serve().await;
        info!(exit_code, "Slack socket mode listener stopped");
        Ok(())
    }
}

fn consumer_gone() -> SlackError {
    SlackError::GeneralError("Gateway event consumer stopped".to_string())
}

fn handle_listener_error(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> HttpStatusCode {
    warn!(error = %err, "Slack socket mode error");
    HttpStatusCode::OK
}

async fn handle_push_events(
    event: SlackPushEventCallback,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> UserCallbackResult<()> {
    let SlackEventCallbackBody::Message(message) = event.event else {
        debug!("Ignoring event callback type");
        return Ok(());
    };

    let events = {
        let guard = states.read().await;
        let state = guard
            .get_user_state::<GatewayState>()
            .ok_or("missing gateway state")?;
        state.events.clone()
    };

    let incoming = to_incoming_message(&event.team_id, message);
    events.send(GatewayEvent::Message(incoming)).await?;
    Ok(())
}

/// Flattens a Slack message event into the gateway's message shape.
#[must_use]
pub fn to_incoming_message(team_id: &SlackTeamId, event: SlackMessageEvent) -> IncomingMessage {
    IncomingMessage {
        kind: "message".to_string(),
        team: team_id.to_string(),
        channel: event
            .origin
            .channel
            .map(|c| c.to_string())
            .unwrap_or_default(),
        user: event.sender.user.map(|u| u.to_string()).unwrap_or_default(),
        text: event.content.and_then(|c| c.text).unwrap_or_default(),
        subtype: event.subtype.map(|s| subtype_name(&s)),
    }
}

fn subtype_name(subtype: &SlackMessageEventType) -> String {
    serde_json::to_value(subtype)
        .ok()
        .and_then(|v| v.as_str().map(ToString::to_string))
        .unwrap_or_else(|| format!("{subtype:?}"))
}
