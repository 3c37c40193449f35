//! Tooltip placement relative to the draggable icon.
//!
//! The tooltip is centred horizontally on the icon and sits above it by
//! default. When there is no room above, it flips below. The result is
//! then clamped inside the viewport minus `edge_margin` on every side.

use super::{clamp_low_wins, AnchorRect, ContentBox, Viewport};
use serde::{Deserialize, Serialize};

/// Vertical distance between icon and tooltip.
pub const DEFAULT_GAP: f64 = 12.0;

/// Minimum distance from any viewport edge.
pub const DEFAULT_EDGE_MARGIN: f64 = 16.0;

/// Side of the anchor the tooltip ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
    pub placement: Placement,
}

impl TooltipPosition {
    /// True when both coordinates moved by less than `epsilon` and the
    /// side is unchanged.
    pub fn approx_eq(&self, other: &TooltipPosition, epsilon: f64) -> bool {
        self.placement == other.placement
            && (self.left - other.left).abs() < epsilon
            && (self.top - other.top).abs() < epsilon
    }
}

/// Position the tooltip with the default gap.
pub fn compute_placement(
    anchor: &AnchorRect,
    content: &ContentBox,
    viewport: &Viewport,
    edge_margin: f64,
) -> TooltipPosition {
    compute_placement_with_gap(anchor, content, viewport, edge_margin, DEFAULT_GAP)
}

pub fn compute_placement_with_gap(
    anchor: &AnchorRect,
    content: &ContentBox,
    viewport: &Viewport,
    edge_margin: f64,
    gap: f64,
) -> TooltipPosition {
    let left = anchor.left + anchor.width / 2.0 - content.width / 2.0;
    let left = clamp_low_wins(
        left,
        edge_margin,
        viewport.width - content.width - edge_margin,
    );

    let mut top = anchor.top - gap - content.height;
    let mut placement = Placement::Top;
    if top < edge_margin {
        top = anchor.bottom() + gap;
        placement = Placement::Bottom;
    }
    let top = clamp_low_wins(
        top,
        edge_margin,
        viewport.height - content.height - edge_margin,
    );

    TooltipPosition {
        left,
        top,
        placement,
    }
}
