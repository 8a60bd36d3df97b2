//! Kind-specific element attributes.

use serde::{Deserialize, Serialize};

/// One choice of a select or radio group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Visual variant of a button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Link,
}

/// Button-specific attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonAttrs {
    #[serde(default)]
    pub variant: ButtonVariant,
    /// Navigation target. A button without `href` submits the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub new_tab: bool,
}

/// Image-specific attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Entry of a menu element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
}

/// Link of a social element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Normalize a sparse per-cell background array to exactly `count` entries.
///
/// Missing trailing entries become `None`; entries beyond `count` are dropped.
pub fn backgrounds_for(backgrounds: &[Option<String>], count: usize) -> Vec<Option<String>> {
    (0..count)
        .map(|i| backgrounds.get(i).cloned().flatten())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backgrounds_are_padded_and_truncated() {
        let sparse = vec![Some("#fff".to_string()), None, Some("#000".to_string())];
        assert_eq!(
            backgrounds_for(&sparse, 4),
            vec![Some("#fff".to_string()), None, Some("#000".to_string()), None]
        );
        assert_eq!(backgrounds_for(&sparse, 1), vec![Some("#fff".to_string())]);
        assert!(backgrounds_for(&[], 0).is_empty());
    }

    #[test]
    fn button_defaults_are_omitted() {
        let json = serde_json::to_value(ButtonAttrs::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "variant": "primary" }));
    }
}
