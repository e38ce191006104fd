//! Snap functionality for pinning modules to anchors.

use kurbo::{Point, Rect, Size};

use crate::anchor::{AnchorType, Offset, resolve_point};
use crate::module::HudModule;

/// One cell of the 3×3 snap overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorTarget {
    pub anchor: AnchorType,
    /// Reference point of the anchor on the surface.
    pub point: Point,
    /// The third of the surface that snaps to this anchor.
    pub cell: Rect,
}

/// Collect the nine anchor targets of a surface, in grid order.
pub fn anchor_targets(surface: Size) -> Vec<AnchorTarget> {
    let cell_w = surface.width / 3.0;
    let cell_h = surface.height / 3.0;

    AnchorType::ALL
        .iter()
        .enumerate()
        .map(|(i, &anchor)| {
            let col = (i % 3) as f64;
            let row = (i / 3) as f64;
            AnchorTarget {
                anchor,
                point: resolve_point(anchor, Offset::ZERO, surface),
                cell: Rect::new(
                    col * cell_w,
                    row * cell_h,
                    (col + 1.0) * cell_w,
                    (row + 1.0) * cell_h,
                ),
            }
        })
        .collect()
}

/// The target cell containing a surface-local point.
pub fn target_at(surface: Size, point: Point) -> Option<AnchorTarget> {
    anchor_targets(surface)
        .into_iter()
        .find(|target| target.cell.contains(point))
}

/// The fields to write when snapping a module.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub module_id: String,
    pub anchor_key: String,
    pub offset_key: String,
    pub anchor: AnchorType,
    /// Always zero: snapping resets the offset to the anchor's origin.
    pub offset: Offset,
}

/// Snap the selected module to `anchor`.
///
/// Returns `None` when nothing is selected or the selection does not name a
/// known module.
pub fn snap_to_anchor(
    selected: Option<&str>,
    modules: &[HudModule],
    anchor: AnchorType,
) -> Option<SnapResult> {
    let selected = selected?;
    let module = modules.iter().find(|m| m.id == selected)?;
    Some(SnapResult {
        module_id: module.id.clone(),
        anchor_key: module.anchor_key.clone(),
        offset_key: module.offset_key.clone(),
        anchor,
        offset: Offset::ZERO,
    })
}
