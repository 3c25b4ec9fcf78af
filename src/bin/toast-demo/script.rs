use std::time::Duration;

use maxui_toast::config::HumantimeDuration;
use maxui_toast::error::ScriptError;
use maxui_toast::{Appearance, ToastAction, ToastId, ToastOptions};
use serde::Deserialize;
use serde_with::serde_as;
use tracing::info;

/// One line of a demo script, e.g.
/// `{"op":"show","message":"Saved","duration":"5s"}`.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    Show(ShowCommand),
    /// Dismiss through the control surface.
    Dismiss { id: ToastId },
    /// Press the close button of a rendered toast.
    Close { id: ToastId },
    /// Press the action button of a rendered toast.
    Action { id: ToastId },
    Clear,
    Wait {
        #[serde_as(as = "HumantimeDuration")]
        duration: Duration,
    },
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ShowCommand {
    #[serde(default)]
    pub id: Option<ToastId>,
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub action: Option<ScriptAction>,
    #[serde(default = "yes")]
    pub dismissible: bool,
    #[serde(default)]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub duration: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptAction {
    pub label: String,
    #[serde(default = "yes")]
    pub auto_close: bool,
}

const fn yes() -> bool {
    true
}

impl ShowCommand {
    pub fn into_options(self) -> ToastOptions {
        let mut options = ToastOptions::new(self.message)
            .appearance(self.appearance)
            .dismissible(self.dismissible);
        if let Some(id) = self.id {
            options = options.id(id);
        }
        if let Some(description) = self.description {
            options = options.description(description);
        }
        if let Some(duration) = self.duration {
            options = options.duration(duration);
        }
        if let Some(action) = self.action {
            let label = action.label.clone();
            options = options.action(
                ToastAction::new(action.label)
                    .auto_close(action.auto_close)
                    .on_click(move || info!(label = %label, "toast action clicked")),
            );
        }
        options
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Command>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|err| ScriptError::Parse {
            line: line_no,
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{Command, parse_line};
    use maxui_toast::Appearance;
    use std::time::Duration;

    #[test]
    fn parses_show_with_defaults() {
        let parsed = parse_line(1, r#"{"op":"show","message":"Saved"}"#);
        let Ok(Some(Command::Show(show))) = parsed else {
            panic!("expected a show command, got {parsed:?}");
        };
        assert_eq!(show.message, "Saved");
        assert!(show.dismissible);
        assert!(show.duration.is_none());
        assert_eq!(show.appearance, Appearance::Neutral);
    }

    #[test]
    fn parses_durations_in_both_forms() {
        let parsed = parse_line(1, r#"{"op":"show","message":"m","duration":0}"#);
        assert!(matches!(parsed, Ok(Some(Command::Show(s))) if s.duration == Some(Duration::ZERO)));

        let parsed = parse_line(2, r#"{"op":"wait","duration":"1s"}"#);
        assert!(matches!(
            parsed,
            Ok(Some(Command::Wait { duration })) if duration == Duration::from_secs(1)
        ));
    }

    #[test]
    fn skips_comments_and_reports_bad_lines() {
        assert!(matches!(parse_line(1, "# setup"), Ok(None)));
        assert!(matches!(parse_line(2, "   "), Ok(None)));
        let err = parse_line(3, r#"{"op":"explode"}"#);
        assert!(matches!(err, Err(e) if e.is_recoverable()));
    }

    #[test]
    fn action_keeps_auto_close_flag() {
        let parsed = parse_line(
            1,
            r#"{"op":"show","message":"m","action":{"label":"Undo","auto_close":false}}"#,
        );
        let Ok(Some(Command::Show(show))) = parsed else {
            panic!("expected a show command");
        };
        let options = show.into_options();
        let action = options.action.as_ref().map(|a| (a.label.as_str(), a.auto_close));
        assert_eq!(action, Some(("Undo", false)));
    }
}
