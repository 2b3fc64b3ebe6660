use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::errors::SlackError;

/// Outbound half of the connection gateway.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), SlackError>;
}

/// Broadcasts rendered replies to every permitted channel.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn MessageSink>,
    channel_ids: Vec<String>,
}

impl Notifier {
    #[must_use]
    pub fn new(sink: Arc<dyn MessageSink>, channel_ids: Vec<String>) -> Self {
        Self { sink, channel_ids }
    }

    /// Sends `text` to each permitted channel in order.
    ///
    /// A failed send is logged and skipped; there is no retry at this layer.
    pub async fn notify(&self, text: &str) {
        for channel_id in &self.channel_ids {
            if let Err(e) = self.sink.send(channel_id, text).await {
                warn!(channel = %channel_id, "Failed to deliver notification: {}", e);
            }
        }
    }
}
