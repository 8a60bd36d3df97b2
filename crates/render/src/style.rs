//! CSS declarations computed from element layout.
//!
//! Pure functions of the element: no tree or settings involved, so every
//! output that consumes a render node agrees on widths and spacing.

use element::{Align, Element, FlexDirection, Justify, Layout};
use serde::{Deserialize, Serialize};

/// A single `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Ordered CSS declarations for one node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(Vec<Declaration>);

impl Style {
    pub fn push(&mut self, property: &str, value: impl Into<String>) {
        self.0.push(Declaration {
            property: property.to_string(),
            value: value.into(),
        });
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.0
    }

    /// Inline `style` attribute form, e.g. `width: 50%; margin: 0px 8px 0px 8px`.
    pub fn to_inline(&self) -> String {
        self.0
            .iter()
            .map(|d| format!("{}: {}", d.property, d.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Format a percentage with at most four decimals and no trailing zeros.
pub fn format_percent(percent: f32) -> String {
    let formatted = format!("{:.4}", percent);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

fn justify_css(justify: Justify) -> &'static str {
    match justify {
        Justify::Start => "flex-start",
        Justify::Center => "center",
        Justify::End => "flex-end",
        Justify::SpaceBetween => "space-between",
        Justify::SpaceAround => "space-around",
    }
}

fn align_css(align: Align) -> &'static str {
    match align {
        Align::Start => "flex-start",
        Align::Center => "center",
        Align::End => "flex-end",
        Align::Stretch => "stretch",
    }
}

/// Compute the box style of an element.
pub fn element_style(element: &Element) -> Style {
    let layout: &Layout = &element.layout;
    let mut style = Style::default();

    style.push("width", format_percent(layout.width_percent()));
    if !layout.margin.is_zero() {
        style.push("margin", layout.margin.to_css());
    }
    if !layout.padding.is_zero() {
        style.push("padding", layout.padding.to_css());
    }

    if let Some(grid) = layout.grid {
        style.push("display", "grid");
        style.push(
            "grid-template-columns",
            format!("repeat({}, minmax(0, 1fr))", grid.columns.max(1)),
        );
        style.push(
            "grid-template-rows",
            format!("repeat({}, auto)", grid.rows.max(1)),
        );
    } else if let Some(flex) = layout.flex {
        style.push("display", "flex");
        let direction = match flex.direction {
            FlexDirection::Row => "row",
            FlexDirection::Column => "column",
        };
        style.push("flex-direction", direction);
        style.push("justify-content", justify_css(flex.justify));
        style.push("align-items", align_css(flex.align));
        if flex.wrap {
            style.push("flex-wrap", "wrap");
        }
    }

    if let Some(gap) = layout.gap {
        style.push("gap", format!("{}px", gap));
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use element::{ElementKind, Spacing};

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(100.0), "100%");
        assert_eq!(format_percent(50.0), "50%");
        assert_eq!(format_percent(4.0 / 12.0 * 100.0), "33.3333%");
        assert_eq!(format_percent(12.5), "12.5%");
    }

    #[test]
    fn width_and_spacing() {
        let mut element = Element::new(ElementKind::Text).with_width(6);
        element.layout.margin = Spacing::symmetric(4, 8);
        let style = element_style(&element);

        assert_eq!(style.get("width"), Some("50%"));
        assert_eq!(style.get("margin"), Some("4px 8px 4px 8px"));
        assert_eq!(style.get("padding"), None);
        assert_eq!(style.to_inline(), "width: 50%; margin: 4px 8px 4px 8px");
    }

    #[test]
    fn columns_are_a_flex_row() {
        let style = element_style(&Element::new(ElementKind::Columns));
        assert_eq!(style.get("display"), Some("flex"));
        assert_eq!(style.get("flex-direction"), Some("row"));
        assert_eq!(style.get("gap"), Some("16px"));
    }

    #[test]
    fn grid_template() {
        let style = element_style(&Element::new(ElementKind::Grid));
        assert_eq!(style.get("display"), Some("grid"));
        assert_eq!(style.get("grid-template-columns"), Some("repeat(2, minmax(0, 1fr))"));
        assert_eq!(style.get("flex-direction"), None);
    }
}
