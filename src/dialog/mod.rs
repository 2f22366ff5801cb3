//! Dialog model: what to show and what the user can answer
//!
//! Types here are platform-free. [`layout`] turns a request into pixel
//! geometry, [`state`] is the input state machine, [`painter`] draws through a
//! [`DisplaySession`](crate::platform::DisplaySession) and [`runner`] drives
//! the whole thing against one session.

pub mod layout;
pub mod painter;
pub mod runner;
pub mod state;

use crate::error::DialogError;
use crate::labels::Labels;
use serde::Serialize;
use std::str::FromStr;

pub use layout::LayoutMetrics;
pub use runner::run;
pub use state::{DialogEvent, DialogPhase, DialogState, Key, Transition};

/// Which buttons the dialog offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonSet {
    #[default]
    Ok,
    OkCancel,
    YesNo,
}

/// Icon drawn left of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    None,
    Info,
    Warning,
    Error,
    Question,
    Stop,
    Success,
}

/// Outcome of one dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultCode {
    Confirm,
    Cancel,
    Yes,
    No,
    /// A native API could not tell which button was chosen
    None,
}

impl ResultCode {
    /// Whether Escape may resolve to this button
    pub fn is_cancel_capable(self) -> bool {
        matches!(self, ResultCode::Cancel | ResultCode::No)
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResultCode::Confirm => "confirm",
            ResultCode::Cancel => "cancel",
            ResultCode::Yes => "yes",
            ResultCode::No => "no",
            ResultCode::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for ButtonSet {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(ButtonSet::Ok),
            "ok-cancel" | "okcancel" => Ok(ButtonSet::OkCancel),
            "yes-no" | "yesno" => Ok(ButtonSet::YesNo),
            other => Err(DialogError::UnsupportedConfiguration(format!(
                "unknown button set '{other}'"
            ))),
        }
    }
}

impl FromStr for Icon {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Icon::None),
            "info" | "information" => Ok(Icon::Info),
            "warning" => Ok(Icon::Warning),
            "error" => Ok(Icon::Error),
            "question" => Ok(Icon::Question),
            "stop" => Ok(Icon::Stop),
            "success" => Ok(Icon::Success),
            other => Err(DialogError::UnsupportedConfiguration(format!(
                "unknown icon '{other}'"
            ))),
        }
    }
}

/// Immutable input to one dialog invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub caption: String,
    pub text: String,
    pub buttons: ButtonSet,
    pub icon: Icon,
}

impl DialogRequest {
    pub fn new(
        caption: impl Into<String>,
        text: impl Into<String>,
        buttons: ButtonSet,
        icon: Icon,
    ) -> Self {
        Self {
            caption: caption.into(),
            text: text.into(),
            buttons,
            icon,
        }
    }

    /// Body split into rendered lines; never empty
    pub fn lines(&self) -> Vec<&str> {
        self.text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }
}

/// One button: caption and the result it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEntry {
    pub label: String,
    pub result: ResultCode,
}

/// Ordered buttons for one invocation. Index 0 is the default button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    entries: Vec<ButtonEntry>,
}

impl ButtonSpec {
    pub fn new(set: ButtonSet, labels: &Labels) -> Self {
        let entry = |label: &str, result| ButtonEntry {
            label: label.to_string(),
            result,
        };

        let entries = match set {
            ButtonSet::Ok => vec![entry(&labels.ok, ResultCode::Confirm)],
            ButtonSet::OkCancel => vec![
                entry(&labels.ok, ResultCode::Confirm),
                entry(&labels.cancel, ResultCode::Cancel),
            ],
            ButtonSet::YesNo => vec![
                entry(&labels.yes, ResultCode::Yes),
                entry(&labels.no, ResultCode::No),
            ],
        };

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ButtonEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ButtonEntry> {
        self.entries.iter()
    }

    /// Results this spec can ever produce
    pub fn results(&self) -> Vec<ResultCode> {
        self.entries.iter().map(|e| e.result).collect()
    }

    /// What Escape resolves to, if anything.
    ///
    /// The last cancel-capable button wins; a lone Confirm button also answers
    /// Escape. Anything else leaves Escape without effect.
    pub fn escape_result(&self) -> Option<ResultCode> {
        if let Some(cancel) = self.entries.iter().rev().find(|e| e.result.is_cancel_capable()) {
            return Some(cancel.result);
        }
        match self.entries.as_slice() {
            [only] if only.result == ResultCode::Confirm => Some(ResultCode::Confirm),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{BuiltinLabels, LabelSource};

    fn english() -> Labels {
        BuiltinLabels.resolve("en")
    }

    #[test]
    fn test_button_sets_map_to_results() {
        let labels = english();
        assert_eq!(ButtonSpec::new(ButtonSet::Ok, &labels).results(), vec![ResultCode::Confirm]);
        assert_eq!(
            ButtonSpec::new(ButtonSet::OkCancel, &labels).results(),
            vec![ResultCode::Confirm, ResultCode::Cancel]
        );
        assert_eq!(
            ButtonSpec::new(ButtonSet::YesNo, &labels).results(),
            vec![ResultCode::Yes, ResultCode::No]
        );
    }

    #[test]
    fn test_labels_come_from_locale() {
        let spec = ButtonSpec::new(ButtonSet::YesNo, &BuiltinLabels.resolve("de"));
        let labels: Vec<_> = spec.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Ja", "Nein"]);
    }

    #[test]
    fn test_escape_targets() {
        let labels = english();
        assert_eq!(ButtonSpec::new(ButtonSet::Ok, &labels).escape_result(), Some(ResultCode::Confirm));
        assert_eq!(
            ButtonSpec::new(ButtonSet::OkCancel, &labels).escape_result(),
            Some(ResultCode::Cancel)
        );
        assert_eq!(ButtonSpec::new(ButtonSet::YesNo, &labels).escape_result(), Some(ResultCode::No));
    }

    #[test]
    fn test_lines_split_on_newline() {
        let request = DialogRequest::new("c", "one\r\ntwo\nthree", ButtonSet::Ok, Icon::None);
        assert_eq!(request.lines(), vec!["one", "two", "three"]);

        let empty = DialogRequest::new("c", "", ButtonSet::Ok, Icon::None);
        assert_eq!(empty.lines(), vec![""]);
    }

    #[test]
    fn test_selectors_parse() {
        assert_eq!("OK-CANCEL".parse::<ButtonSet>().unwrap(), ButtonSet::OkCancel);
        assert_eq!("yesno".parse::<ButtonSet>().unwrap(), ButtonSet::YesNo);
        assert_eq!("information".parse::<Icon>().unwrap(), Icon::Info);
        assert_eq!("stop".parse::<Icon>().unwrap(), Icon::Stop);
    }

    #[test]
    fn test_unknown_selector_is_unsupported_configuration() {
        let err = "maybe".parse::<ButtonSet>().unwrap_err();
        assert!(matches!(err, DialogError::UnsupportedConfiguration(_)));
        let err = "skull".parse::<Icon>().unwrap_err();
        assert!(matches!(err, DialogError::UnsupportedConfiguration(_)));
    }

    #[test]
    fn test_result_code_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ResultCode::Confirm).unwrap(), "\"confirm\"");
        assert_eq!(ResultCode::No.to_string(), "no");
    }
}
