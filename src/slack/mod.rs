//! All Slack-specific functionality

pub mod bot;
pub mod client;
pub mod command_parser;
pub mod response_builder;
pub mod socket;

// Re-export main types for convenience
pub use bot::SlackBot;
pub use client::SlackClient;
pub use socket::SocketModeGateway;
