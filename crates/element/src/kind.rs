use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// The kind of an element.
///
/// Determines which attributes are meaningful, whether the element may hold
/// children, and how it is projected for rendering.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ElementKind {
    // Inputs
    Text,
    Email,
    Number,
    Phone,
    Date,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Rating,
    Hidden,

    // Content
    Heading,
    Paragraph,
    RichText,
    Button,
    Image,
    Divider,
    Social,

    // Containers
    Container,
    Columns,
    Rows,
    Grid,
    Menu,
}

impl Default for ElementKind {
    fn default() -> Self {
        Self::Text
    }
}

/// Palette grouping used by sidebars listing draggable kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KindCategory {
    Input,
    Content,
    Layout,
}

impl ElementKind {
    /// Whether elements of this kind may hold children.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Container | Self::Columns | Self::Rows | Self::Grid | Self::Menu
        )
    }

    /// Whether elements of this kind capture a value under a `name` key.
    pub fn is_input(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Email
                | Self::Number
                | Self::Phone
                | Self::Date
                | Self::Textarea
                | Self::Select
                | Self::Checkbox
                | Self::Radio
                | Self::Rating
                | Self::Hidden
        )
    }

    /// Whether this kind carries a list of choice options.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Whether this kind displays `content` text.
    pub fn has_content(self) -> bool {
        matches!(
            self,
            Self::Heading | Self::Paragraph | Self::RichText | Self::Button
        )
    }

    pub fn category(self) -> KindCategory {
        if self.is_input() {
            KindCategory::Input
        } else if self.is_container() {
            KindCategory::Layout
        } else {
            KindCategory::Content
        }
    }

    /// All kinds in palette order.
    pub fn all() -> impl Iterator<Item = ElementKind> {
        Self::iter()
    }

    /// Human-readable name shown in the palette.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Email => "Email",
            Self::Number => "Number",
            Self::Phone => "Phone",
            Self::Date => "Date",
            Self::Textarea => "Text Area",
            Self::Select => "Dropdown",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Group",
            Self::Rating => "Star Rating",
            Self::Hidden => "Hidden Field",
            Self::Heading => "Heading",
            Self::Paragraph => "Paragraph",
            Self::RichText => "Rich Text",
            Self::Button => "Button",
            Self::Image => "Image",
            Self::Divider => "Divider",
            Self::Social => "Social Links",
            Self::Container => "Container",
            Self::Columns => "Columns",
            Self::Rows => "Rows",
            Self::Grid => "Grid",
            Self::Menu => "Menu",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn containers_are_exactly_the_layout_kinds() {
        let containers: Vec<_> = ElementKind::all().filter(|k| k.is_container()).collect();
        assert_eq!(
            containers,
            vec![
                ElementKind::Container,
                ElementKind::Columns,
                ElementKind::Rows,
                ElementKind::Grid,
                ElementKind::Menu,
            ]
        );
    }

    #[test]
    fn no_kind_is_both_input_and_container() {
        for kind in ElementKind::all() {
            assert!(!(kind.is_input() && kind.is_container()), "{kind}");
        }
    }

    #[test]
    fn kind_tags_are_kebab_case() {
        let json = serde_json::to_value(ElementKind::RichText).unwrap();
        assert_eq!(json, "rich-text");
        assert_eq!(ElementKind::RichText.to_string(), "rich-text");
        assert_eq!(ElementKind::from_str("rich-text").unwrap(), ElementKind::RichText);
    }

    #[test]
    fn categories() {
        assert_eq!(ElementKind::Email.category(), KindCategory::Input);
        assert_eq!(ElementKind::Grid.category(), KindCategory::Layout);
        assert_eq!(ElementKind::Image.category(), KindCategory::Content);
    }
}
