//! Layout attributes for elements.
//!
//! Layout is purely presentational: nothing here links an element to its
//! siblings. Widths are expressed in columns of a 12-column grid.

use serde::{Deserialize, Serialize};

/// Number of columns in the width grid.
pub const GRID_COLUMNS: u8 = 12;

/// Presentational layout attributes shared by every element kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Width in grid columns, 1 to 12. `None` means full width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u8>,

    /// Outer spacing in px.
    #[serde(default, skip_serializing_if = "Spacing::is_zero")]
    pub margin: Spacing,

    /// Inner spacing in px.
    #[serde(default, skip_serializing_if = "Spacing::is_zero")]
    pub padding: Spacing,

    /// Gap between children in px (containers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<u16>,

    /// Flexbox arrangement of children (containers, rows, menus).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<FlexLayout>,

    /// Grid template (grid containers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridTemplate>,
}

impl Layout {
    /// Effective width in columns, clamped into 1..=12.
    pub fn effective_width(&self) -> u8 {
        self.width.unwrap_or(GRID_COLUMNS).clamp(1, GRID_COLUMNS)
    }

    /// Width as a percentage of the containing block.
    pub fn width_percent(&self) -> f32 {
        self.effective_width() as f32 / GRID_COLUMNS as f32 * 100.0
    }

    /// Whether the stored width lies in the valid column range.
    pub fn has_valid_width(&self) -> bool {
        self.width.map_or(true, |w| (1..=GRID_COLUMNS).contains(&w))
    }
}

/// Spacing on each side of a box, in px.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub bottom: i32,
    #[serde(default)]
    pub left: i32,
}

impl Spacing {
    /// Uniform spacing on all sides.
    pub fn all(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric spacing (vertical, horizontal).
    pub fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Total horizontal spacing (left + right).
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical spacing (top + bottom).
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// CSS shorthand, e.g. `8px 16px 8px 16px`.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Flexbox arrangement of a container's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexLayout {
    #[serde(default)]
    pub direction: FlexDirection,
    #[serde(default)]
    pub justify: Justify,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub wrap: bool,
}

impl FlexLayout {
    pub fn row() -> Self {
        Self::default()
    }

    pub fn column() -> Self {
        Self {
            direction: FlexDirection::Column,
            ..Default::default()
        }
    }
}

/// Direction children are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

/// Alignment along the main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

/// Alignment along the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

/// Track counts of a grid container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTemplate {
    pub columns: u8,
    pub rows: u8,
}

impl Default for GridTemplate {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 2,
        }
    }
}

impl GridTemplate {
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}
