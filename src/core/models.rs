use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    // Whether the bot user has joined the channel
    pub is_member: bool,
}

/// Everything the gateway knows once the session is authenticated.
#[derive(Debug, Clone, Default)]
pub struct AuthenticatedPayload {
    pub users: Vec<User>,
    pub channels: Vec<Channel>,
    pub team: Team,
    /// The authenticated bot user as reported by `auth.test`.
    pub self_user: Option<User>,
}

/// The bot's own identity, resolved once at authentication.
#[derive(Debug, Clone, Default)]
pub struct BotIdentity {
    /// Empty when no workspace user carries the configured bot name.
    pub id: String,
    pub name: String,
    pub channels: Vec<Channel>,
    pub channel_ids: HashSet<String>,
    pub team: Team,
}

impl BotIdentity {
    #[must_use]
    pub fn permits_channel(&self, channel_id: &str) -> bool {
        self.channel_ids.contains(channel_id)
    }
}

/// Read-only user id → user mapping built at authentication.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Display name for `id`, or an empty string for users joined after startup.
    #[must_use]
    pub fn display_name(&self, id: &str) -> &str {
        self.get(id).map_or("", |u| u.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// A message event as delivered by the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub team: String,
    pub channel: String,
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased first token.
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupContext {
    Web,
    Mobile,
}

impl CleanupContext {
    /// Only `mobile` selects the mobile tree; every other value falls back to web.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "mobile" {
            CleanupContext::Mobile
        } else {
            CleanupContext::Web
        }
    }
}

#[derive(Debug, Clone)]
pub struct CleanupRequest {
    pub correlation_id: String,
    pub user_id: String,
    pub context: CleanupContext,
    /// The context argument exactly as typed, echoed back in replies.
    pub context_arg: String,
    pub targets: Vec<String>,
}

/// Events emitted by the connection gateway, in arrival order.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    Authenticated(AuthenticatedPayload),
    ConnectionOpened,
    Message(IncomingMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_contexts_fall_back_to_web() {
        assert_eq!(CleanupContext::from_arg("mobile"), CleanupContext::Mobile);
        assert_eq!(CleanupContext::from_arg("web"), CleanupContext::Web);
        assert_eq!(CleanupContext::from_arg("Mobile"), CleanupContext::Web);
        assert_eq!(CleanupContext::from_arg("staging"), CleanupContext::Web);
    }

    #[test]
    fn incoming_message_deserializes_wire_shape() {
        let msg: IncomingMessage = serde_json::from_str(
            r#"{"type":"message","team":"T1","channel":"C1","user":"U1","text":"<@U2> ping"}"#,
        )
        .unwrap();
        assert_eq!(msg.kind, "message");
        assert!(msg.subtype.is_none());
    }
}
