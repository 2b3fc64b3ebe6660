use crate::core::models::Channel;

/// Filters authenticated channels down to the ones the bot may talk in.
///
/// Only channels the bot has joined are considered. A non-empty `allow_list`
/// further restricts them by name; an empty one keeps every joined channel.
#[must_use]
pub fn filter_permitted_channels(channels: Vec<Channel>, allow_list: &[String]) -> Vec<Channel> {
    channels
        .into_iter()
        .filter(|channel| {
            let is_allowed =
                allow_list.is_empty() || allow_list.iter().any(|name| *name == channel.name);
            channel.is_member && is_allowed
        })
        .collect()
}
