//! Slack API client module
//!
//! Encapsulates the Web API calls the bot needs, with retry logic and error handling.

use async_trait::async_trait;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{
    SlackApiChatPostMessageRequest, SlackApiConversationsListRequest, SlackApiTeamInfoRequest,
    SlackApiUsersListRequest,
};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackConversationType, SlackCursorId,
    SlackMessageContent,
};
use std::sync::Arc;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{debug, info};

use crate::core::models::{AuthenticatedPayload, Channel, Team, User};
use crate::core::notifier::MessageSink;
use crate::errors::SlackError;

/// Page size for `users.list` / `conversations.list`.
const PAGE_LIMIT: u16 = 200;

/// Slack Web API client with retry logic and error handling
#[derive(Clone)]
pub struct SlackClient {
    client: Arc<SlackHyperClient>,
    token: SlackApiToken,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns an error if the HTTPS connector cannot be created.
    pub fn new(token: String) -> Result<Self, SlackError> {
        let connector = SlackClientHyperConnector::new().map_err(|e| {
            SlackError::GeneralError(format!("Failed to create Slack HTTP connector: {}", e))
        })?;

        Ok(Self {
            client: Arc::new(SlackHyperClient::new(connector)),
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        })
    }

    /// Shared hyper client, reused by the Socket Mode listener.
    #[must_use]
    pub fn hyper_client(&self) -> Arc<SlackHyperClient> {
        Arc::clone(&self.client)
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SlackError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, SlackError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);

        Retry::spawn(strategy, operation).await
    }

    /// Posts `text` to a channel. Sent exactly once; only the read calls retry.
    ///
    /// # Errors
    ///
    /// Returns an error if `chat.postMessage` fails.
    pub async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), SlackError> {
        let request = SlackApiChatPostMessageRequest::new(
            SlackChannelId::new(channel_id.to_string()),
            SlackMessageContent::new().with_text(text.to_string()),
        );
        self.client
            .open_session(&self.token)
            .chat_post_message(&request)
            .await?;
        Ok(())
    }

    /// Collects the users, channels, team and own identity of the workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the underlying Web API calls keeps failing.
    pub async fn fetch_authentication(&self) -> Result<AuthenticatedPayload, SlackError> {
        let auth = self
            .with_retry(|| async { Ok(self.client.open_session(&self.token).auth_test().await?) })
            .await?;
        let users = self.list_users().await?;
        let channels = self.list_member_channels().await?;
        let team = self
            .with_retry(|| async {
                let info = self
                    .client
                    .open_session(&self.token)
                    .team_info(&SlackApiTeamInfoRequest::new())
                    .await?;
                Ok(Team {
                    id: info.team.id.to_string(),
                    name: info.team.name.unwrap_or_default(),
                })
            })
            .await?;

        let self_id = auth.user_id.to_string();
        let self_user = users.iter().find(|u| u.id == self_id).cloned();

        info!(
            users = users.len(),
            channels = channels.len(),
            team = %team.name,
            "Fetched workspace directory"
        );

        Ok(AuthenticatedPayload {
            users,
            channels,
            team,
            self_user,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, SlackError> {
        let mut users = Vec::new();
        let mut cursor: Option<SlackCursorId> = None;

        loop {
            let page_cursor = cursor.clone();
            let response = self
                .with_retry(|| {
                    let page_cursor = page_cursor.clone();
                    async move {
                        let mut request = SlackApiUsersListRequest::new().with_limit(PAGE_LIMIT);
                        if let Some(c) = page_cursor {
                            request = request.with_cursor(c);
                        }
                        Ok(self.client.open_session(&self.token).users_list(&request).await?)
                    }
                })
                .await?;

            users.extend(response.members.into_iter().map(|member| User {
                id: member.id.to_string(),
                name: member.name.unwrap_or_default(),
            }));

            cursor = next_cursor(response.response_metadata.and_then(|m| m.next_cursor));
            if cursor.is_none() {
                break;
            }
            debug!(fetched = users.len(), "Fetching next users.list page");
        }

        Ok(users)
    }

    async fn list_member_channels(&self) -> Result<Vec<Channel>, SlackError> {
        let mut channels = Vec::new();
        let mut cursor: Option<SlackCursorId> = None;

        loop {
            let page_cursor = cursor.clone();
            let response = self
                .with_retry(|| {
                    let page_cursor = page_cursor.clone();
                    async move {
                        let mut request = SlackApiConversationsListRequest::new()
                            .with_exclude_archived(true)
                            .with_limit(PAGE_LIMIT)
                            .with_types(vec![
                                SlackConversationType::Public,
                                SlackConversationType::Private,
                            ]);
                        if let Some(c) = page_cursor {
                            request = request.with_cursor(c);
                        }
                        Ok(self.client.open_session(&self.token).conversations_list(&request).await?)
                    }
                })
                .await?;

            channels.extend(response.channels.into_iter().map(|info| Channel {
                id: info.id.to_string(),
                name: info.name.unwrap_or_default(),
                is_member: info.flags.is_member.unwrap_or(false),
            }));

            cursor = next_cursor(response.response_metadata.and_then(|m| m.next_cursor));
            if cursor.is_none() {
                break;
            }
            debug!(fetched = channels.len(), "Fetching next conversations.list page");
        }

        Ok(channels)
    }
}

/// Slack signals the last page with a missing or empty cursor.
fn next_cursor(cursor: Option<SlackCursorId>) -> Option<SlackCursorId> {
    cursor.filter(|c| !c.0.is_empty())
}

#[async_trait]
impl MessageSink for SlackClient {
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), SlackError> {
        self.post_message(channel_id, text).await
    }
}
