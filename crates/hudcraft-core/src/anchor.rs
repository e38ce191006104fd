//! Anchor-relative coordinate model.
//!
//! An element is positioned by one of nine anchors on a 3×3 grid plus an
//! integer offset. The offset is measured from the anchor's reference point,
//! and its sign depends on which edge the anchor is pinned to: right- and
//! bottom-pinned anchors measure inwards with negative values.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::document::Value;

/// Alignment along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    /// Pinned to the left (or top) edge.
    Start,
    /// Centered: placed at 50% and translated back by half the element size.
    Middle,
    /// Pinned to the right (or bottom) edge.
    End,
}

impl Align {
    /// Classify a position into a third of `extent`.
    pub fn classify(position: f64, extent: f64) -> Self {
        if position < extent / 3.0 {
            Align::Start
        } else if position > (extent / 3.0) * 2.0 {
            Align::End
        } else {
            Align::Middle
        }
    }

    /// Reference coordinate of this alignment within `extent`.
    pub fn reference(self, extent: f64) -> f64 {
        match self {
            Align::Start => 0.0,
            Align::Middle => extent / 2.0,
            Align::End => extent,
        }
    }

    /// Signed distance of `position` from this alignment's reference point.
    pub fn offset_of(self, position: f64, extent: f64) -> f64 {
        match self {
            Align::Start => position,
            Align::Middle => position - extent / 2.0,
            Align::End => -(extent - position),
        }
    }

    /// Leading coordinate of an element of `size` placed with this
    /// alignment and the margins from its near and far edge.
    fn element_start(self, near: Option<f64>, far: Option<f64>, extent: f64, size: f64) -> f64 {
        match self {
            Align::Start => near.unwrap_or(0.0),
            Align::Middle => extent / 2.0 + near.unwrap_or(0.0) - size / 2.0,
            Align::End => extent - far.unwrap_or(0.0) - size,
        }
    }
}

/// Error returned when a string is not one of the nine anchors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown anchor: {0}")]
pub struct AnchorParseError(pub String);

/// One of the nine anchor points of the 3×3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorType {
    #[default]
    TopLeft,
    TopMiddle,
    TopRight,
    LeftMiddle,
    Middle,
    RightMiddle,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl AnchorType {
    /// All anchors in grid order (row by row, top to bottom).
    pub const ALL: [AnchorType; 9] = [
        AnchorType::TopLeft,
        AnchorType::TopMiddle,
        AnchorType::TopRight,
        AnchorType::LeftMiddle,
        AnchorType::Middle,
        AnchorType::RightMiddle,
        AnchorType::BottomLeft,
        AnchorType::BottomMiddle,
        AnchorType::BottomRight,
    ];

    /// The configuration string for this anchor.
    pub fn as_str(self) -> &'static str {
        match self {
            AnchorType::TopLeft => "top_left",
            AnchorType::TopMiddle => "top_middle",
            AnchorType::TopRight => "top_right",
            AnchorType::LeftMiddle => "left_middle",
            AnchorType::Middle => "middle",
            AnchorType::RightMiddle => "right_middle",
            AnchorType::BottomLeft => "bottom_left",
            AnchorType::BottomMiddle => "bottom_middle",
            AnchorType::BottomRight => "bottom_right",
        }
    }

    /// Build an anchor from horizontal and vertical alignment.
    pub fn from_aligns(horizontal: Align, vertical: Align) -> Self {
        use Align::*;
        match (vertical, horizontal) {
            (Start, Start) => AnchorType::TopLeft,
            (Start, Middle) => AnchorType::TopMiddle,
            (Start, End) => AnchorType::TopRight,
            (Middle, Start) => AnchorType::LeftMiddle,
            (Middle, Middle) => AnchorType::Middle,
            (Middle, End) => AnchorType::RightMiddle,
            (End, Start) => AnchorType::BottomLeft,
            (End, Middle) => AnchorType::BottomMiddle,
            (End, End) => AnchorType::BottomRight,
        }
    }

    /// Parse an anchor, falling back to `TopLeft` for unknown strings.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Read an anchor from a document value, with the rendering fallback.
    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_str)
            .map(Self::parse_or_default)
            .unwrap_or_default()
    }

    /// Base placement of an element pinned to this anchor.
    pub fn placement(self) -> Placement {
        use Align::*;
        let (horizontal, vertical) = match self {
            AnchorType::TopLeft => (Start, Start),
            AnchorType::TopMiddle => (Middle, Start),
            AnchorType::TopRight => (End, Start),
            AnchorType::LeftMiddle => (Start, Middle),
            AnchorType::Middle => (Middle, Middle),
            AnchorType::RightMiddle => (End, Middle),
            AnchorType::BottomLeft => (Start, End),
            AnchorType::BottomMiddle => (Middle, End),
            AnchorType::BottomRight => (End, End),
        };
        Placement {
            horizontal,
            vertical,
        }
    }
}

impl fmt::Display for AnchorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorType {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnchorType::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == s)
            .ok_or_else(|| AnchorParseError(s.to_string()))
    }
}

impl From<AnchorType> for Value {
    fn from(anchor: AnchorType) -> Self {
        Value::from(anchor.as_str())
    }
}

/// Base placement of an anchor: which edge (or center) each axis is fixed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub horizontal: Align,
    pub vertical: Align,
}

/// Integer displacement from an anchor's reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Read an offset from a document value.
    ///
    /// Anything other than a pair of numbers reads as zero.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_pair) {
            Some((dx, dy)) => Self::new(dx.round() as i64, dy.round() as i64),
            None => Self::ZERO,
        }
    }
}

impl From<Offset> for Value {
    fn from(offset: Offset) -> Self {
        Value::pair(offset.dx, offset.dy)
    }
}

/// Edge-relative margins. `None` means the margin is not set on that edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

/// Base placement of an element pinned to `anchor`.
pub fn anchor_base_placement(anchor: AnchorType) -> Placement {
    anchor.placement()
}

/// Express an offset as margins from the edges the anchor is pinned to.
///
/// Left-pinned and centered axes take the offset as a positive margin from
/// the left (top); right-pinned axes take the negated offset as a margin
/// from the right (bottom).
pub fn apply_offset(anchor: AnchorType, offset: Offset) -> Margins {
    let placement = anchor.placement();
    let mut margins = Margins::default();

    match placement.horizontal {
        Align::Start | Align::Middle => margins.left = Some(offset.dx as f64),
        Align::End => margins.right = Some(-offset.dx as f64),
    }
    match placement.vertical {
        Align::Start | Align::Middle => margins.top = Some(offset.dy as f64),
        Align::End => margins.bottom = Some(-offset.dy as f64),
    }

    margins
}

/// The point an (anchor, offset) pair designates inside a surface.
///
/// This is the inverse of the drag mapping: the anchor's reference point
/// plus the offset.
pub fn resolve_point(anchor: AnchorType, offset: Offset, surface: Size) -> Point {
    let placement = anchor.placement();
    Point::new(
        placement.horizontal.reference(surface.width) + offset.dx as f64,
        placement.vertical.reference(surface.height) + offset.dy as f64,
    )
}

/// On-surface rectangle of an element of `element` size, laid out from its
/// base placement and the margins of its offset.
pub fn element_rect(anchor: AnchorType, offset: Offset, surface: Size, element: Size) -> Rect {
    let placement = anchor_base_placement(anchor);
    let margins = apply_offset(anchor, offset);
    let x0 = placement.horizontal.element_start(
        margins.left,
        margins.right,
        surface.width,
        element.width,
    );
    let y0 = placement.vertical.element_start(
        margins.top,
        margins.bottom,
        surface.height,
        element.height,
    );
    Rect::from_origin_size((x0, y0), element)
}
