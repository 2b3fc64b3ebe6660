//! Platform-independent bot logic: state, parsing, cleanup and notification.

pub mod cleanup;
pub mod config;
pub mod dispatcher;
pub mod models;
pub mod notifier;
pub mod session;
pub mod state;
