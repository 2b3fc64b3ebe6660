use std::collections::HashMap;

use cleanbot::slack::response_builder::{Placeholder, Reply, Template, render};

#[test]
fn test_welcome_uses_bot_name() {
    let text = Reply::new(Template::Welcome)
        .with(Placeholder::BotName, "maeda")
        .build();
    assert_eq!(text, "maeda here! at your service!!");
}

#[test]
fn test_prohibit_reply_names_action_and_target() {
    let text = Reply::new(Template::Prohibit)
        .for_user("U1", "steven")
        .with(Placeholder::Action, "cleanup web")
        .with(Placeholder::Context, "current")
        .build();
    assert_eq!(
        text,
        "<@U1|steven>_, it's prohibit to_ `cleanup web` _for_ `current`"
    );
}

#[test]
fn test_completed_reply_appends_literal_suffix() {
    // The suffix is appended after rendering and never substituted.
    let text = Reply::new(Template::ProcessCompleted)
        .for_user("U1", "steven")
        .with(Placeholder::Action, "cleanup mobile")
        .append("\n_Successful:_ *{{USER_ID}}*")
        .build();
    assert_eq!(
        text,
        "<@U1|steven>_, your request for_ `cleanup mobile` _has been *completed*!_\n_Successful:_ *{{USER_ID}}*"
    );
}

#[test]
fn test_substituted_values_are_not_rescanned() {
    let mut values = HashMap::new();
    values.insert("USER_NAME", "{{USER_ID}}".to_string());
    values.insert("USER_ID", "U1".to_string());

    assert_eq!(
        render("<@{{USER_ID}}|{{USER_NAME}}>", &values),
        "<@U1|{{USER_ID}}>"
    );
}

#[test]
fn test_missing_values_leave_placeholders() {
    let text = Reply::new(Template::NotExist)
        .with(Placeholder::UserId, "U1")
        .build();
    assert!(text.starts_with("<@U1|{{USER_NAME}}>"));
    assert!(text.contains("`{{ACTION}}`"));
}

#[test]
fn test_help_describes_cleanup_usage() {
    let help = Template::Help.text();
    assert!(help.contains("`cleanup &lt;context&gt; &lt;branch/ticket&gt;`"));
    assert!(help.contains("`web|mobile`"));
    assert!(!help.contains("{{"), "help text takes no placeholders");
}
