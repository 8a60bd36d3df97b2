//! Document-wide settings.

use serde::{Deserialize, Serialize};

/// Whether the document is a data-collecting form or a static page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    #[default]
    Form,
    Page,
}

/// Configuration applying to the whole tree rather than any single element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub title: String,
    pub submit_text: String,
    pub primary_color: String,
    pub project_kind: ProjectKind,
    /// Side effects triggered on submit, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SubmissionAction>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Untitled form".to_string(),
            submit_text: "Submit".to_string(),
            primary_color: "#3b82f6".to_string(),
            project_kind: ProjectKind::Form,
            actions: Vec::new(),
        }
    }
}

impl Settings {
    pub fn is_form(&self) -> bool {
        self.project_kind == ProjectKind::Form
    }

    /// Enabled actions in declaration order.
    pub fn enabled_actions(&self) -> impl Iterator<Item = &SubmissionAction> {
        self.actions.iter().filter(|a| a.enabled)
    }
}

/// A declared side effect of submitting the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAction {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub kind: ActionKind,
}

fn default_enabled() -> bool {
    true
}

impl SubmissionAction {
    pub fn webhook(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            kind: ActionKind::Webhook { url: url.into() },
        }
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            kind: ActionKind::Redirect { url: url.into() },
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            kind: ActionKind::Message { text: text.into() },
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// What a submission action does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// POST the submitted values as JSON.
    Webhook { url: String },
    /// Navigate away; later actions are not run.
    Redirect { url: String },
    /// Show an inline message.
    Message { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn actions_serialize_flat_with_type_tag() {
        let action = SubmissionAction::webhook("https://example.com/hook");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "enabled": true, "type": "webhook", "url": "https://example.com/hook" })
        );
    }

    #[test]
    fn enabled_defaults_to_true() {
        let action: SubmissionAction =
            serde_json::from_value(json!({ "type": "message", "text": "Thanks!" })).unwrap();
        assert_eq!(action, SubmissionAction::message("Thanks!"));
    }

    #[test]
    fn enabled_actions_skip_disabled() {
        let settings = Settings {
            actions: vec![
                SubmissionAction::webhook("a").disabled(),
                SubmissionAction::message("b"),
            ],
            ..Default::default()
        };
        let enabled: Vec<_> = settings.enabled_actions().collect();
        assert_eq!(enabled, vec![&SubmissionAction::message("b")]);
    }

    #[test]
    fn settings_roundtrip() {
        let settings = Settings {
            title: "Contact".into(),
            project_kind: ProjectKind::Page,
            actions: vec![SubmissionAction::redirect("/thanks")],
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_value(json!({ "title": "Feedback" })).unwrap();
        assert_eq!(settings.title, "Feedback");
        assert_eq!(settings.submit_text, "Submit");
        assert!(settings.is_form());
    }
}
