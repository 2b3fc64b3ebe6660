#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use cleanbot::core::cleanup::CleanupFs;
use cleanbot::core::config::AppConfig;
use cleanbot::core::models::{AuthenticatedPayload, Channel, GatewayEvent, IncomingMessage, Team, User};
use cleanbot::core::notifier::MessageSink;
use cleanbot::core::session::Session;
use cleanbot::errors::SlackError;

pub const BOT_ID: &str = "UBOT";
pub const TEAM_ID: &str = "T1";
pub const CHANNEL_ID: &str = "C_AUTOBOT";
pub const USER_ID: &str = "U_STEVEN";

/// Records every outbound message.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), SlackError> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    Exists(PathBuf),
    Remove(PathBuf),
}

/// In-memory filesystem that records every call.
#[derive(Default)]
pub struct FakeFs {
    existing: Mutex<HashSet<PathBuf>>,
    failing: HashSet<PathBuf>,
    calls: Mutex<Vec<FsCall>>,
}

impl FakeFs {
    pub fn with_dirs(dirs: &[&str]) -> Self {
        Self {
            existing: Mutex::new(dirs.iter().map(PathBuf::from).collect()),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, dir: &str) -> Self {
        self.failing.insert(PathBuf::from(dir));
        self
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn still_exists(&self, dir: &str) -> bool {
        self.existing.lock().unwrap().contains(Path::new(dir))
    }
}

#[async_trait]
impl CleanupFs for FakeFs {
    async fn exists(&self, path: &Path) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(FsCall::Exists(path.to_path_buf()));
        self.existing.lock().unwrap().contains(path)
    }

    async fn remove_all(&self, path: &Path) -> std::io::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(FsCall::Remove(path.to_path_buf()));
        if self.failing.contains(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.existing.lock().unwrap().remove(path);
        Ok(())
    }
}

pub fn config(web: &str, mobile: &str) -> AppConfig {
    AppConfig {
        slack_bot_token: "xoxb-test".to_string(),
        slack_app_token: "xapp-test".to_string(),
        bot_name: "maeda".to_string(),
        cleanup_dir_web: PathBuf::from(web),
        cleanup_dir_mobile: PathBuf::from(mobile),
        allowed_channels: vec!["autobot".to_string()],
    }
}

pub fn payload() -> AuthenticatedPayload {
    AuthenticatedPayload {
        users: vec![
            User {
                id: BOT_ID.to_string(),
                name: "maeda".to_string(),
            },
            User {
                id: USER_ID.to_string(),
                name: "steven".to_string(),
            },
        ],
        channels: vec![
            Channel {
                id: CHANNEL_ID.to_string(),
                name: "autobot".to_string(),
                is_member: true,
            },
            Channel {
                id: "C_GENERAL".to_string(),
                name: "general".to_string(),
                is_member: true,
            },
        ],
        team: Team {
            id: TEAM_ID.to_string(),
            name: "Acme".to_string(),
        },
        self_user: Some(User {
            id: BOT_ID.to_string(),
            name: "maeda".to_string(),
        }),
    }
}

pub fn message(text: &str) -> IncomingMessage {
    IncomingMessage {
        kind: "message".to_string(),
        team: TEAM_ID.to_string(),
        channel: CHANNEL_ID.to_string(),
        user: USER_ID.to_string(),
        text: text.to_string(),
        subtype: None,
    }
}

/// A session that has already processed the authentication event.
pub async fn authenticated_session(
    config: AppConfig,
    sink: Arc<RecordingSink>,
    fs: Arc<dyn CleanupFs>,
) -> Session {
    let mut session = Session::new(config, sink, fs);
    session
        .handle_event(GatewayEvent::Authenticated(payload()))
        .await;
    session
}
