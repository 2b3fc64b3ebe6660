//! Directory cleanup for deployment trees.
//!
//! Targets are checked against a fixed denylist and joined onto the base
//! directory of the requested context. Existing directories are removed
//! concurrently and the completion reply only lists targets whose removal
//! actually finished without error.

use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::config::AppConfig;
use super::models::{CleanupContext, CleanupRequest};
use super::notifier::Notifier;
use crate::errors::SlackError;
use crate::slack::response_builder::{Placeholder, Reply, Template};
use crate::utils::paths::safe_join;

/// Directory names that hold live deployment state and must never be removed.
pub const RESERVED_TARGETS: [&str; 4] = ["current", "releases", "repo", "shared"];

/// Filesystem operations the cleanup handler relies on.
#[async_trait]
pub trait CleanupFs: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;
    /// Removes a directory tree, or a single file or symlink.
    async fn remove_all(&self, path: &Path) -> std::io::Result<()>;
}

/// `CleanupFs` backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl CleanupFs for TokioFs {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn remove_all(&self, path: &Path) -> std::io::Result<()> {
        let metadata = tokio::fs::symlink_metadata(path).await?;
        if metadata.is_dir() {
            tokio::fs::remove_dir_all(path).await
        } else {
            tokio::fs::remove_file(path).await
        }
    }
}

/// Blank names and reserved deployment directories are refused outright.
#[must_use]
pub fn is_prohibited_target(target: &str) -> bool {
    target.trim().is_empty() || RESERVED_TARGETS.contains(&target)
}

/// Base directory for a cleanup context.
#[must_use]
pub fn base_dir(config: &AppConfig, context: CleanupContext) -> &Path {
    match context {
        CleanupContext::Web => &config.cleanup_dir_web,
        CleanupContext::Mobile => &config.cleanup_dir_mobile,
    }
}

/// Per-target outcome of one cleanup request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    pub missing: Vec<String>,
    pub prohibited: Vec<String>,
}

pub struct CleanupHandler<'a> {
    config: &'a AppConfig,
    fs: &'a dyn CleanupFs,
    notifier: &'a Notifier,
}

impl<'a> CleanupHandler<'a> {
    #[must_use]
    pub fn new(config: &'a AppConfig, fs: &'a dyn CleanupFs, notifier: &'a Notifier) -> Self {
        Self {
            config,
            fs,
            notifier,
        }
    }

    pub async fn handle(&self, request: &CleanupRequest, user_name: &str) -> CleanupReport {
        let span = info_span!(
            "cleanup",
            correlation_id = %request.correlation_id,
            user = %request.user_id,
            context = %request.context_arg
        );
        self.run(request, user_name).instrument(span).await
    }

    async fn run(&self, request: &CleanupRequest, user_name: &str) -> CleanupReport {
        let user_id = request.user_id.as_str();
        let action = format!("cleanup {}", request.context_arg);
        let base = base_dir(self.config, request.context);
        let mut report = CleanupReport::default();

        if request.context == CleanupContext::Web && request.context_arg != "web" {
            debug!("Unrecognised context falls back to the web base directory");
        }

        self.notifier
            .notify(&Reply::new(Template::Processing).for_user(user_id, user_name).build())
            .await;

        let mut pending: Vec<(String, PathBuf)> = Vec::new();
        for target in &request.targets {
            if is_prohibited_target(target) {
                self.notify_prohibited(user_id, user_name, &action, target).await;
                report.prohibited.push(target.clone());
                continue;
            }

            let path = match safe_join(base, target) {
                Ok(path) => path,
                Err(e) => {
                    warn!(target = %target, "{}", e);
                    self.notify_prohibited(user_id, user_name, &action, target).await;
                    report.prohibited.push(target.clone());
                    continue;
                }
            };

            if self.fs.exists(&path).await {
                pending.push((target.clone(), path));
            } else {
                self.notifier
                    .notify(
                        &Reply::new(Template::NotExist)
                            .for_user(user_id, user_name)
                            .with(Placeholder::Action, format!("{action} {target}"))
                            .with(Placeholder::Context, target.as_str())
                            .build(),
                    )
                    .await;
                report.missing.push(target.clone());
            }
        }

        let outcomes = join_all(pending.iter().map(|(target, path)| async move {
            info!(target = %target, path = %path.display(), "Removing target");
            (target, path, self.fs.remove_all(path).await.map_err(SlackError::from))
        }))
        .await;

        for (target, path, outcome) in outcomes {
            match outcome {
                Ok(()) => report.succeeded.push(target.clone()),
                Err(e) => {
                    error!(target = %target, path = %path.display(), "{}", e);
                    self.notifier
                        .notify(
                            &Reply::new(Template::RemovalFailed)
                                .for_user(user_id, user_name)
                                .with(Placeholder::Action, action.as_str())
                                .with(Placeholder::Context, target.as_str())
                                .build(),
                        )
                        .await;
                    report.failed.push(target.clone());
                }
            }
        }

        let summary = format!("\n_Successful:_ *{}*", report.succeeded.join(","));
        self.notifier
            .notify(
                &Reply::new(Template::ProcessCompleted)
                    .for_user(user_id, user_name)
                    .with(Placeholder::Action, action.as_str())
                    .append(&summary)
                    .build(),
            )
            .await;

        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            missing = report.missing.len(),
            prohibited = report.prohibited.len(),
            "Cleanup finished"
        );
        report
    }

    async fn notify_prohibited(&self, user_id: &str, user_name: &str, action: &str, target: &str) {
        self.notifier
            .notify(
                &Reply::new(Template::Prohibit)
                    .for_user(user_id, user_name)
                    .with(Placeholder::Action, action)
                    .with(Placeholder::Context, target)
                    .build(),
            )
            .await;
    }
}
