use std::env;
use std::path::PathBuf;

use crate::errors::SlackError;

/// Bot name looked up among workspace users when `SLACK_BOT_NAME` is unset.
pub const DEFAULT_BOT_NAME: &str = "maeda";

/// Channel allow-list used when `BOT_ALLOWED_CHANNELS` is unset.
pub const DEFAULT_ALLOWED_CHANNELS: &[&str] = &["autobot"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_app_token: String,
    pub bot_name: String,
    pub cleanup_dir_web: PathBuf,
    pub cleanup_dir_mobile: PathBuf,
    /// Empty means every channel the bot is a member of is permitted.
    pub allowed_channels: Vec<String>,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `SlackError::ConfigError` naming the first missing token.
    pub fn from_env() -> Result<Self, SlackError> {
        Ok(Self {
            slack_bot_token: required_var("SLACK_BOT_TOKEN")?,
            slack_app_token: required_var("SLACK_APP_TOKEN")?,
            bot_name: env::var("SLACK_BOT_NAME").unwrap_or_else(|_| DEFAULT_BOT_NAME.to_string()),
            cleanup_dir_web: PathBuf::from(env::var("BOT_CLEANUP_DIR_WEB").unwrap_or_default()),
            cleanup_dir_mobile: PathBuf::from(
                env::var("BOT_CLEANUP_DIR_MOBILE").unwrap_or_default(),
            ),
            allowed_channels: match env::var("BOT_ALLOWED_CHANNELS") {
                Ok(raw) => parse_channel_list(&raw),
                Err(_) => DEFAULT_ALLOWED_CHANNELS
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
        })
    }

    /// Names of configuration values that are present but empty.
    ///
    /// These are not fatal: an empty base directory resolves targets relative
    /// to the working directory, which is almost never what the operator wants.
    #[must_use]
    pub fn empty_base_dirs(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if self.cleanup_dir_web.as_os_str().is_empty() {
            empty.push("BOT_CLEANUP_DIR_WEB");
        }
        if self.cleanup_dir_mobile.as_os_str().is_empty() {
            empty.push("BOT_CLEANUP_DIR_MOBILE");
        }
        empty
    }
}

fn required_var(name: &str) -> Result<String, SlackError> {
    env::var(name).map_err(|e| SlackError::ConfigError(format!("{}: {}", name, e)))
}

/// Splits a comma-separated channel list, dropping blanks and a leading `#`.
#[must_use]
pub fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('#'))
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
