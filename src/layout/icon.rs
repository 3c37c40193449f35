//! Icon position clamping.

use super::{clamp_low_wins, Point, Size, Viewport};

/// Margin the icon keeps from every viewport edge.
pub const ICON_MARGIN: f64 = 8.0;

/// Icon size used when the rendered size is unknown.
pub const DEFAULT_ICON_SIZE: f64 = 48.0;

/// Where the icon goes on first launch or after a corrupt position.
pub const DEFAULT_ICON_POS: Point = Point { x: 60.0, y: 60.0 };

/// Keep the icon on screen. Non-finite coordinates reset to
/// [`DEFAULT_ICON_POS`] before clamping.
pub fn clamp_icon_position(pos: Point, icon: &Size, viewport: &Viewport) -> Point {
    let pos = if pos.x.is_finite() && pos.y.is_finite() {
        pos
    } else {
        DEFAULT_ICON_POS
    };
    Point {
        x: clamp_low_wins(pos.x, ICON_MARGIN, viewport.width - icon.width - ICON_MARGIN),
        y: clamp_low_wins(pos.y, ICON_MARGIN, viewport.height - icon.height - ICON_MARGIN),
    }
}

/// Whether a clamped position differs enough from the stored one to be
/// written back.
pub fn needs_resave(stored: Point, clamped: Point) -> bool {
    (stored.x - clamped.x).abs() > 1.0 || (stored.y - clamped.y).abs() > 1.0
}
