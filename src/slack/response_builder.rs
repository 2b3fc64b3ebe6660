//! Response-related utilities for Slack interactions.
//!
//! Every reply the bot sends is one of the fixed [`Template`]s. Placeholders
//! of the form `{{KEY}}` are filled from a key → value map in a single
//! left-to-right pass, so substituted values are never scanned again.

use std::collections::HashMap;

/// Placeholder keys understood by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    BotName,
    UserId,
    UserName,
    Action,
    Context,
    Greet,
}

impl Placeholder {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Placeholder::BotName => "BOT_NAME",
            Placeholder::UserId => "USER_ID",
            Placeholder::UserName => "USER_NAME",
            Placeholder::Action => "ACTION",
            Placeholder::Context => "CONTEXT",
            Placeholder::Greet => "GREET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Welcome,
    Help,
    IncorrectCommand,
    CommandNotRecognised,
    Hello,
    Pong,
    Processing,
    ProcessCompleted,
    Prohibit,
    NotExist,
    RemovalFailed,
}

const HELP_TEXT: &str = concat!(
    "\n",
    "_Hello there! for your information, I can process commands as follow:_ \n\n",
    "`cleanup &lt;context&gt; &lt;branch/ticket&gt;`\n\n",
    "_*context*:_ `web|mobile`\n\n",
    "_*branch/ticket*:_ `branch name or ticket number` _can be multiple separate by &lt;space&gt;_\n",
);

impl Template {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Template::Welcome => "{{BOT_NAME}} here! at your service!!",
            Template::Help => HELP_TEXT,
            Template::IncorrectCommand => {
                "<@{{USER_ID}}|{{USER_NAME}}>_!_\n _please ensure you give me the correct command pattern._\n\n----\n\n"
            }
            Template::CommandNotRecognised => {
                "_I could not recognise your intention! please try another command or type help._"
            }
            Template::Hello => "{{GREET}} juga <@{{USER_ID}}|{{USER_NAME}}>! :smile:",
            Template::Pong => "PONG!",
            Template::Processing => {
                "_Hi <@{{USER_ID}}|{{USER_NAME}}>,_\n_Your request is being processed. Please wait..._ :sunglasses:"
            }
            Template::ProcessCompleted => {
                "<@{{USER_ID}}|{{USER_NAME}}>_, your request for_ `{{ACTION}}` _has been *completed*!_"
            }
            Template::Prohibit => {
                "<@{{USER_ID}}|{{USER_NAME}}>_, it's prohibit to_ `{{ACTION}}` _for_ `{{CONTEXT}}`"
            }
            Template::NotExist => {
                "<@{{USER_ID}}|{{USER_NAME}}>_, could not do `{{ACTION}}` since `{{CONTEXT}}` does not exist!_"
            }
            Template::RemovalFailed => {
                "<@{{USER_ID}}|{{USER_NAME}}>_, failed to_ `{{ACTION}}` _for_ `{{CONTEXT}}`_, please check the server logs._"
            }
        }
    }
}

/// Builder for a single rendered reply.
///
/// ```
/// use cleanbot::slack::response_builder::{Placeholder, Reply, Template};
///
/// let text = Reply::new(Template::Hello)
///     .with(Placeholder::Greet, "hi")
///     .with(Placeholder::UserId, "U123")
///     .with(Placeholder::UserName, "steven")
///     .build();
/// assert_eq!(text, "hi juga <@U123|steven>! :smile:");
/// ```
#[derive(Debug, Clone)]
pub struct Reply {
    template: Template,
    values: HashMap<&'static str, String>,
    suffix: String,
}

impl Reply {
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self {
            template,
            values: HashMap::new(),
            suffix: String::new(),
        }
    }

    /// Shorthand for the `<@USER_ID|USER_NAME>` pair most templates start with.
    #[must_use]
    pub fn for_user(self, user_id: &str, user_name: &str) -> Self {
        self.with(Placeholder::UserId, user_id)
            .with(Placeholder::UserName, user_name)
    }

    #[must_use]
    pub fn with(mut self, key: Placeholder, value: impl Into<String>) -> Self {
        self.values.insert(key.key(), value.into());
        self
    }

    /// Appends literal text after the rendered template. It is not substituted.
    #[must_use]
    pub fn append(mut self, text: &str) -> Self {
        self.suffix.push_str(text);
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut out = render(self.template.text(), &self.values);
        out.push_str(&self.suffix);
        out
    }
}

/// Substitutes `{{KEY}}` placeholders in one pass. Unknown keys are left as-is.
#[must_use]
pub fn render(template: &str, values: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after_open[..end];
        match values.get(key) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_not_rescanned() {
        let text = Reply::new(Template::Prohibit)
            .for_user("U1", "{{ACTION}}")
            .with(Placeholder::Action, "cleanup web")
            .with(Placeholder::Context, "{{USER_ID}}")
            .build();
        assert_eq!(
            text,
            "<@U1|{{ACTION}}>_, it's prohibit to_ `cleanup web` _for_ `{{USER_ID}}`"
        );
    }

    #[test]
    fn unknown_and_unterminated_placeholders_survive() {
        let values = HashMap::from([("A", "x".to_string())]);
        assert_eq!(render("{{A}} {{B}} {{A", &values), "x {{B}} {{A");
    }

    #[test]
    fn static_templates_render_verbatim() {
        assert_eq!(Reply::new(Template::Pong).build(), "PONG!");
        assert_eq!(Reply::new(Template::Help).build(), HELP_TEXT);
    }
}
