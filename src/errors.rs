use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Filesystem operation failed: {0}")]
    FilesystemError(#[from] std::io::Error),

    #[error("Refusing to touch cleanup target `{target}`: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("{0}")]
    GeneralError(String),
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

impl From<anyhow::Error> for SlackError {
    fn from(error: anyhow::Error) -> Self {
        SlackError::GeneralError(error.to_string())
    }
}
