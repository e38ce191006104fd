//! Drag state machine for repositioning HUD modules.
//!
//! While a module is dragged, every pointer move is mapped to the anchor of
//! the surface third it falls in and an offset from that anchor.

use kurbo::{Point, Rect};

use crate::anchor::{Align, AnchorType, Offset};

/// Current drag state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A module (by id) is being dragged.
    Dragging(String),
}

/// The placement a pointer position maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTarget {
    pub anchor: AnchorType,
    pub offset: Offset,
    /// The pointer position, surface-local and clamped to the surface.
    pub clamped: Point,
}

/// Round to the nearest integer, halves towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Map a pointer position (client coordinates) to an anchor and offset on
/// `surface`.
///
/// Positions outside the surface are clamped to its edges.
pub fn drag_target(position: Point, surface: Rect) -> DragTarget {
    let width = surface.width();
    let height = surface.height();
    let x = (position.x - surface.x0).clamp(0.0, width);
    let y = (position.y - surface.y0).clamp(0.0, height);

    let horizontal = Align::classify(x, width);
    let vertical = Align::classify(y, height);

    DragTarget {
        anchor: AnchorType::from_aligns(horizontal, vertical),
        offset: Offset::new(
            round_half_up(horizontal.offset_of(x, width)),
            round_half_up(vertical.offset_of(y, height)),
        ),
        clamped: Point::new(x, y),
    }
}

/// Tracks which module is being dragged and which one is selected.
///
/// Selection survives the end of a drag; it is only replaced by another
/// press or cleared explicitly.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    selection: Option<String>,
    /// Bounding box of the drag surface in client coordinates.
    surface: Rect,
}

impl DragController {
    /// Create an idle controller for a surface.
    pub fn new(surface: Rect) -> Self {
        Self {
            state: DragState::Idle,
            selection: None,
            surface: surface.abs(),
        }
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    /// Update the surface bounding box (e.g. after a resize).
    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface.abs();
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Id of the module being dragged.
    pub fn dragging(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(id) => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Whether move/up events must be routed to this controller.
    ///
    /// Capture is taken when a drag begins and released when it ends.
    pub fn captures_pointer(&self) -> bool {
        self.is_dragging()
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn select(&mut self, id: &str) {
        self.selection = Some(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Press on a module: start dragging it and select it.
    pub fn begin(&mut self, id: &str) {
        log::debug!("Drag started: {}", id);
        self.state = DragState::Dragging(id.to_string());
        self.select(id);
    }

    /// Pointer moved. Returns the new placement while dragging.
    pub fn track(&self, position: Point) -> Option<DragTarget> {
        if !self.is_dragging() {
            return None;
        }
        Some(drag_target(position, self.surface))
    }

    /// Release. Returns the id of the module whose drag just ended.
    pub fn end(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(id) => {
                log::debug!("Drag ended: {}", id);
                Some(id)
            }
            DragState::Idle => None,
        }
    }
}
