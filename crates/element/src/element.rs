use crate::attrs::{ButtonAttrs, ChoiceOption, ImageAttrs, MenuItem, SocialLink};
use crate::layout::{FlexLayout, GridTemplate, Layout, Spacing};
use crate::{ElementId, ElementKind};
use serde::{Deserialize, Serialize};

/// Attribute keys an [`crate::ElementPatch`] may touch.
pub const ATTRIBUTE_KEYS: &[&str] = &[
    "label",
    "name",
    "placeholder",
    "required",
    "content",
    "children",
    "width",
    "margin",
    "padding",
    "gap",
    "flex",
    "grid",
    "options",
    "button",
    "image",
    "menuItems",
    "socialLinks",
    "maxRating",
    "columnCount",
    "rowCount",
    "columnBackgrounds",
    "rowBackgrounds",
];

/// Keys fixed for an element's lifetime.
pub const IMMUTABLE_KEYS: &[&str] = &["id", "type"];

/// A node of the form/page tree.
///
/// Elements own their children directly, so a tree serializes to nested
/// JSON as-is. Only container kinds may hold children; see
/// [`Element::drop_invalid_children`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Data key the element's value is submitted under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Display text for headings, paragraphs, rich text and buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,

    #[serde(flatten)]
    pub layout: Layout,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<ButtonAttrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttrs>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u8>,
    /// Sparse, indexed by column position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_backgrounds: Vec<Option<String>>,
    /// Sparse, indexed by row position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_backgrounds: Vec<Option<String>>,
}

/// Generated data key for a fresh input element, e.g. `email_1a2b3c4d`.
pub fn default_name(kind: ElementKind, id: ElementId) -> String {
    format!("{}_{}", kind.as_ref().replace('-', "_"), id.short())
}

impl Element {
    /// An element with no attributes set beyond its id and kind.
    pub fn bare(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            label: None,
            name: None,
            placeholder: None,
            required: false,
            content: None,
            children: Vec::new(),
            layout: Layout::default(),
            options: Vec::new(),
            button: None,
            image: None,
            menu_items: Vec::new(),
            social_links: Vec::new(),
            max_rating: None,
            column_count: None,
            row_count: None,
            column_backgrounds: Vec::new(),
            row_backgrounds: Vec::new(),
        }
    }

    /// A fresh element carrying the defaults for its kind.
    pub fn new(kind: ElementKind) -> Self {
        let mut element = Self::bare(kind);

        if kind.is_input() {
            element.name = Some(default_name(kind, element.id));
            if kind != ElementKind::Hidden {
                element.label = Some(kind.display_name().to_string());
            }
        }

        match kind {
            ElementKind::Text | ElementKind::Email | ElementKind::Number | ElementKind::Phone => {
                element.placeholder = Some(format!("Enter {}", kind.display_name().to_lowercase()));
            }
            ElementKind::Textarea => {
                element.placeholder = Some("Enter text".to_string());
            }
            ElementKind::Select | ElementKind::Radio => {
                element.options = vec![
                    ChoiceOption::new("Option 1", "option_1"),
                    ChoiceOption::new("Option 2", "option_2"),
                ];
            }
            ElementKind::Rating => {
                element.max_rating = Some(5);
            }
            ElementKind::Heading => {
                element.content = Some("Heading".to_string());
            }
            ElementKind::Paragraph => {
                element.content = Some("Paragraph text".to_string());
            }
            ElementKind::RichText => {
                element.content = Some("Rich text".to_string());
            }
            ElementKind::Button => {
                element.content = Some("Button".to_string());
                element.button = Some(ButtonAttrs::default());
            }
            ElementKind::Image => {
                element.image = Some(ImageAttrs {
                    src: "https://placehold.co/600x400".to_string(),
                    alt: "Image".to_string(),
                    width: None,
                    height: None,
                });
            }
            ElementKind::Social => {
                element.social_links = vec![
                    SocialLink {
                        platform: "facebook".to_string(),
                        url: "#".to_string(),
                    },
                    SocialLink {
                        platform: "twitter".to_string(),
                        url: "#".to_string(),
                    },
                ];
            }
            ElementKind::Container => {
                element.layout.padding = Spacing::all(16);
            }
            ElementKind::Columns => {
                element.column_count = Some(2);
                element.layout.flex = Some(FlexLayout::row());
                element.layout.gap = Some(16);
            }
            ElementKind::Rows => {
                element.row_count = Some(2);
                element.layout.flex = Some(FlexLayout::column());
                element.layout.gap = Some(16);
            }
            ElementKind::Grid => {
                element.layout.grid = Some(GridTemplate::default());
                element.layout.gap = Some(16);
            }
            ElementKind::Menu => {
                element.menu_items = vec![
                    MenuItem {
                        label: "Home".to_string(),
                        href: "/".to_string(),
                    },
                    MenuItem {
                        label: "About".to_string(),
                        href: "/about".to_string(),
                    },
                ];
                element.layout.flex = Some(FlexLayout::row());
            }
            _ => {}
        }

        element
    }

    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_width(mut self, columns: u8) -> Self {
        self.layout.width = Some(columns);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Number of cells a columns/rows/grid container lays out.
    pub fn cell_count(&self) -> usize {
        match self.kind {
            ElementKind::Columns => self.column_count.unwrap_or(2) as usize,
            ElementKind::Rows => self.row_count.unwrap_or(2) as usize,
            ElementKind::Grid => self.layout.grid.unwrap_or_default().cell_count(),
            _ => 0,
        }
    }

    /// Find an element in this subtree (including self) by depth-first search.
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Ids of this element and every descendant, in pre-order.
    pub fn subtree_ids(&self) -> Vec<ElementId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<ElementId>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }

    /// Number of elements in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }

    /// Deep clone of this subtree with a fresh id on every element.
    pub fn clone_with_fresh_ids(&self) -> Element {
        let mut clone = self.clone();
        clone.refresh_ids();
        clone
    }

    fn refresh_ids(&mut self) {
        self.id = ElementId::new();
        for child in &mut self.children {
            child.refresh_ids();
        }
    }

    /// Remove children from every non-container element in this subtree.
    ///
    /// Returns the ids of the elements whose children were dropped.
    pub fn drop_invalid_children(&mut self) -> Vec<ElementId> {
        let mut dropped = Vec::new();
        self.drop_invalid_children_into(&mut dropped);
        dropped
    }

    fn drop_invalid_children_into(&mut self, dropped: &mut Vec<ElementId>) {
        if !self.kind.is_container() && !self.children.is_empty() {
            self.children.clear();
            dropped.push(self.id);
            return;
        }
        for child in &mut self.children {
            child.drop_invalid_children_into(dropped);
        }
    }
}
