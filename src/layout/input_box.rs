//! Placement of the free-text input box that opens when the icon is clicked.
//!
//! The box opens beside the icon, to its right when it fits. Otherwise it
//! opens on the left and keeps its right edge fixed, so later growth
//! extends away from the icon. Coordinates are screen coordinates; the
//! `overlay` rect is the overlay window's bounds on screen, and the icon
//! rect is relative to that overlay.

use super::{clamp_low_wins, Rect, Size};
use serde::{Deserialize, Serialize};

pub const INPUT_PAD: f64 = 16.0;
pub const INPUT_GAP: f64 = 12.0;
pub const INPUT_WIDTH: f64 = 180.0;
pub const INPUT_HEIGHT: f64 = 44.0;
pub const INPUT_MIN_WIDTH: f64 = 120.0;
pub const INPUT_MAX_WIDTH: f64 = 600.0;

/// Which edge of the box stays put when it is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeAnchor {
    /// Box is right of the icon; it grows rightwards.
    Left,
    /// Box is left of the icon; it grows leftwards.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBoxPlacement {
    pub bounds: Rect,
    pub anchor: EdgeAnchor,
}

pub fn place_input_box(icon: &Rect, overlay: &Rect) -> InputBoxPlacement {
    let (w, h) = (INPUT_WIDTH, INPUT_HEIGHT);

    let mut x = overlay.left + (icon.right() + INPUT_GAP).round();
    let y = overlay.top + (icon.top + (icon.height - h) / 2.0).round();

    let anchor = if x + w > overlay.right() - INPUT_PAD {
        x = overlay.left + (icon.left - INPUT_GAP - w).round();
        EdgeAnchor::Right
    } else {
        EdgeAnchor::Left
    };

    let x = clamp_low_wins(x, overlay.left + INPUT_PAD, overlay.right() - INPUT_PAD - w);
    let y = clamp_low_wins(y, overlay.top + INPUT_PAD, overlay.bottom() - INPUT_PAD - h);

    InputBoxPlacement {
        bounds: Rect::new(x, y, w, h),
        anchor,
    }
}

/// Resize an open box, keeping its anchored edge fixed.
///
/// Missing or non-positive dimensions keep the current value. Width is
/// limited to `[INPUT_MIN_WIDTH, INPUT_MAX_WIDTH]`.
pub fn resize_input_box(
    current: &Rect,
    anchor: EdgeAnchor,
    requested: Option<Size>,
    overlay: &Rect,
) -> Rect {
    let want_w = requested
        .map(|s| s.width)
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(current.width);
    let want_h = requested
        .map(|s| s.height)
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(current.height);

    let w = want_w.min(INPUT_MAX_WIDTH).max(INPUT_MIN_WIDTH);
    let h = want_h;

    let x = match anchor {
        EdgeAnchor::Right => current.left + (current.width - w),
        EdgeAnchor::Left => current.left,
    };

    let x = clamp_low_wins(x, overlay.left + INPUT_PAD, overlay.right() - INPUT_PAD - w);
    let y = clamp_low_wins(
        current.top,
        overlay.top + INPUT_PAD,
        overlay.bottom() - INPUT_PAD - h,
    );

    Rect::new(x, y, w, h)
}
