//! Bot state resolved once when the gateway authenticates.

use tracing::{info, warn};

use super::config::AppConfig;
use super::models::{AuthenticatedPayload, BotIdentity, UserDirectory};
use crate::utils::filters::filter_permitted_channels;

#[derive(Debug, Clone, Default)]
pub struct BotState {
    pub identity: BotIdentity,
    pub users: UserDirectory,
}

impl BotState {
    /// Builds the bot state from the authentication payload.
    ///
    /// The payload is trusted as-is. If no user is named after the configured
    /// bot, `identity.id` stays empty and mention detection never matches.
    #[must_use]
    pub fn from_authentication(config: &AppConfig, payload: AuthenticatedPayload) -> Self {
        let mut identity = BotIdentity {
            name: config.bot_name.clone(),
            ..BotIdentity::default()
        };
        let mut users = UserDirectory::default();

        for user in payload.users {
            if user.name == identity.name {
                identity.id.clone_from(&user.id);
            }
            users.insert(user);
        }

        identity.channels = filter_permitted_channels(payload.channels, &config.allowed_channels);
        identity.channel_ids = identity.channels.iter().map(|c| c.id.clone()).collect();
        identity.team = payload.team;

        let self_name = payload.self_user.map(|u| u.name).unwrap_or_default();
        info!("Logged in as {} of team {}", self_name, identity.team.name);

        if identity.id.is_empty() {
            warn!(
                bot_name = %identity.name,
                "No workspace user matches the bot name; mentions will never be recognised"
            );
        }
        if users.is_empty() {
            warn!("Workspace user list is empty; replies will carry blank user names");
        }
        if identity.channels.is_empty() {
            warn!("No permitted channels; notifications will be dropped");
        }

        Self { identity, users }
    }

    #[must_use]
    pub fn permitted_channel_ids(&self) -> Vec<String> {
        self.identity.channels.iter().map(|c| c.id.clone()).collect()
    }
}
