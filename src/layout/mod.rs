//! Overlay geometry: tooltip placement, input box placement, icon clamping.
//!
//! Everything here is a pure function over caller-measured boxes. Callers
//! render first, measure, then ask for a position; nothing in this module
//! knows how the boxes are drawn.
//!
//! Inputs are assumed finite and non-negative. Negative or NaN sizes are
//! not rejected; they flow through the arithmetic and produce whatever
//! clamp results they produce.

pub mod icon;
pub mod input_box;
pub mod tooltip;

pub use icon::clamp_icon_position;
pub use input_box::{place_input_box, resize_input_box, EdgeAnchor, InputBoxPlacement};
pub use tooltip::{compute_placement, compute_placement_with_gap, Placement, TooltipPosition};

use serde::{Deserialize, Serialize};

/// Axis-aligned box in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Bounding box of the icon a tooltip attaches to.
pub type AnchorRect = Rect;

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Measured size of the rendered tooltip.
pub type ContentBox = Size;

/// Visible area of the display.
pub type Viewport = Size;

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clamp into `[lo, hi]`. When the window is inverted (`hi < lo`) the lower
/// bound wins, so an oversized box overflows right/bottom instead of
/// being pushed past the left/top margin.
pub(crate) fn clamp_low_wins(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}
