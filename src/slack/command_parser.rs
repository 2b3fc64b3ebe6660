//! Mention detection and command tokenisation for inbound message text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::ParsedCommand;

/// A leading `<...>` reference plus at most one whitespace character.
///
/// `.+` is greedy on purpose: the span runs to the last `>` on the first line,
/// which is how Slack clients have always been matched by this bot.
static LEADING_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<.+>\s?").expect("static regex compile"));

/// Returns the mention-like span the text starts with, if any.
#[must_use]
pub fn leading_mention(text: &str) -> Option<&str> {
    LEADING_MENTION_RE.find(text).map(|m| m.as_str())
}

/// Parses a message addressed to the bot.
///
/// Returns `None` unless the text starts with a mention-like token whose span
/// contains `bot_id`. An empty `bot_id` never matches. The remainder is
/// trimmed and split on single spaces; the first token is lowercased.
///
/// # Examples
///
/// ```
/// use cleanbot::slack::command_parser::parse_command;
///
/// let cmd = parse_command("<@U42> Cleanup web feature-1", "U42").unwrap();
/// assert_eq!(cmd.name, "cleanup");
/// assert_eq!(cmd.args, vec!["web", "feature-1"]);
///
/// assert!(parse_command("cleanup web feature-1 <@U42>", "U42").is_none());
/// ```
#[must_use]
pub fn parse_command(text: &str, bot_id: &str) -> Option<ParsedCommand> {
    if bot_id.is_empty() {
        return None;
    }

    let mention = leading_mention(text)?;
    if !mention.contains(bot_id) {
        return None;
    }

    let mut tokens = text[mention.len()..].trim().split(' ').map(ToString::to_string);
    let name = tokens.next().unwrap_or_default().to_lowercase();
    let args = tokens.collect();

    Some(ParsedCommand { name, args })
}
