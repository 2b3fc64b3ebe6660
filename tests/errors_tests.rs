use std::error::Error;
use cleanbot::errors::SlackError;

#[test]
fn test_slack_error_implements_error_trait() {
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    let error = SlackError::ConfigError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_slack_error_display() {
    let error = SlackError::ApiError("not_authed".to_string());
    assert_eq!(format!("{error}"), "Failed to access Slack API: not_authed");

    let error = SlackError::ConfigError("SLACK_BOT_TOKEN must be set".to_string());
    assert_eq!(
        format!("{error}"),
        "Invalid configuration: SLACK_BOT_TOKEN must be set"
    );

    let error = SlackError::InvalidTarget {
        target: "../etc".to_string(),
        reason: "contains a path separator".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "Refusing to touch cleanup target `../etc`: contains a path separator"
    );
}

#[test]
fn test_slack_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let slack_err: SlackError = err.into();
    match slack_err {
        SlackError::GeneralError(msg) => assert_eq!(msg, "test error"),
        other => panic!("Unexpected error type: {other:?}"),
    }

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let slack_err: SlackError = io.into();
    assert!(matches!(slack_err, SlackError::FilesystemError(_)));
    assert!(slack_err.source().is_some());
}
