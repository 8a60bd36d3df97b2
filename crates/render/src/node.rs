//! Render intermediate representation.

use crate::style::Style;
use element::{ButtonVariant, ChoiceOption, ElementId, ElementKind, MenuItem, SocialLink};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Output of [`crate::project`]: everything a canvas, live form or exporter
/// needs, already resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub title: String,
    pub nodes: Vec<RenderNode>,
    /// Closing submit button of form projections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit: Option<SubmitButton>,
}

impl RenderTree {
    /// Depth-first, pre-order iteration over every node.
    pub fn iter(&self) -> impl Iterator<Item = &RenderNode> {
        let mut stack: Vec<&RenderNode> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Field bindings in document order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldBinding> {
        self.iter().filter_map(|node| node.field.as_ref())
    }

    pub fn find(&self, id: ElementId) -> Option<&RenderNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Indented one-line-per-node summary.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for node in self.iter() {
            let marker = match &node.chrome {
                Some(chrome) if chrome.selected => "* ",
                _ => "  ",
            };
            out.push_str(&"  ".repeat(node.depth));
            out.push_str(marker);
            out.push_str(&node.summary());
            out.push('\n');
        }
        if let Some(submit) = &self.submit {
            out.push_str(&format!("  [{}]\n", submit.text));
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Whether the element sits inside a container.
    pub nested: bool,
    pub depth: usize,
    pub width_percent: f32,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome: Option<Chrome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    fn summary(&self) -> String {
        let text = match &self.content {
            Content::Field { label, .. } => label.clone().unwrap_or_default(),
            Content::Text { text } => text.clone(),
            Content::Button { text, .. } => text.clone(),
            Content::Image { alt, .. } => alt.clone(),
            Content::Menu { items } => format!("{} items", items.len()),
            Content::Social { links } => format!("{} links", links.len()),
            Content::Cells { backgrounds } => format!("{} cells", backgrounds.len()),
            Content::Divider | Content::Container => String::new(),
        };
        let name = self
            .field
            .as_ref()
            .map(|f| format!(" <{}{}>", f.name, if f.required { "*" } else { "" }))
            .unwrap_or_default();
        format!(
            "{} {} \"{}\"{} [{}]",
            self.kind,
            self.id,
            text,
            name,
            crate::style::format_percent(self.width_percent)
        )
    }
}

/// What a node displays, by kind family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Field {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<ChoiceOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_rating: Option<u8>,
        /// Shown as an inert preview rather than an editable control.
        disabled: bool,
    },
    Text {
        text: String,
    },
    Button {
        text: String,
        variant: ButtonVariant,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        new_tab: bool,
    },
    Image {
        src: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    Divider,
    Social {
        links: Vec<SocialLink>,
    },
    Menu {
        items: Vec<MenuItem>,
    },
    /// Columns, rows and grids: one background slot per cell.
    Cells {
        backgrounds: Vec<Option<String>>,
    },
    Container,
}

/// HTML input type a field binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputType {
    Text,
    Email,
    Number,
    Tel,
    Date,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Rating,
    Hidden,
}

impl InputType {
    pub fn for_kind(kind: ElementKind) -> Option<Self> {
        Some(match kind {
            ElementKind::Text => Self::Text,
            ElementKind::Email => Self::Email,
            ElementKind::Number => Self::Number,
            ElementKind::Phone => Self::Tel,
            ElementKind::Date => Self::Date,
            ElementKind::Textarea => Self::Textarea,
            ElementKind::Select => Self::Select,
            ElementKind::Checkbox => Self::Checkbox,
            ElementKind::Radio => Self::Radio,
            ElementKind::Rating => Self::Rating,
            ElementKind::Hidden => Self::Hidden,
            _ => return None,
        })
    }
}

/// Binding of an input node to the submitted data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub id: ElementId,
    pub name: String,
    pub required: bool,
    pub input: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Editing affordances drawn around a node on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chrome {
    pub selected: bool,
    pub toolbar: bool,
    pub resize_handles: bool,
    /// Containers accept drops.
    pub drop_zone: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitButton {
    pub text: String,
    pub background: String,
}
