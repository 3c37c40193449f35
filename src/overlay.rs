//! Overlay interaction state.
//!
//! The overlay is a transparent always-on-top surface over the whole
//! primary display. It normally lets every click pass through to the apps
//! below and only captures the pointer while the user is over the icon or
//! the tooltip. The types here own that state explicitly; the window shell
//! reads them and applies the result.

use crate::comment;
use crate::layout::{self, AnchorRect, ContentBox, Placement, Point, Rect, TooltipPosition, Viewport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Passthrough left off longer than this is switched back on.
pub const PASSTHROUGH_FAILSAFE: Duration = Duration::from_millis(15_000);

/// How long a comment stays on screen.
pub const COMMENT_TTL: Duration = Duration::from_millis(60_000);

/// Tooltip moves smaller than this are not re-applied.
pub const REPOSITION_EPSILON: f64 = 0.5;

/// Pointer travel that turns a press into a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;

// ── Click-through ────────────────────────────────────────────────────

struct PassthroughInner {
    ignore_mouse: bool,
    failsafe_at: Option<Instant>,
}

/// Whether the overlay ignores mouse events (passes them through).
pub struct PassthroughState {
    inner: Mutex<PassthroughInner>,
}

impl PassthroughState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PassthroughInner {
                ignore_mouse: true,
                failsafe_at: None,
            }),
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.lock().ignore_mouse
    }

    /// Request a passthrough state. Returns true when it actually changed,
    /// so the shell only touches the window on transitions.
    pub fn set(&self, ignore_mouse: bool, now: Instant) -> bool {
        let mut inner = self.lock();
        if inner.ignore_mouse == ignore_mouse {
            return false;
        }
        inner.ignore_mouse = ignore_mouse;
        inner.failsafe_at = if ignore_mouse {
            None
        } else {
            Some(now + PASSTHROUGH_FAILSAFE)
        };
        log::debug!("[OVERLAY] passthrough -> {}", ignore_mouse);
        true
    }

    /// Restore passthrough if the fail-safe deadline has passed.
    /// Returns true when it fired.
    pub fn poll(&self, now: Instant) -> bool {
        let mut inner = self.lock();
        match inner.failsafe_at {
            Some(deadline) if now >= deadline => {
                inner.ignore_mouse = true;
                inner.failsafe_at = None;
                log::warn!("[OVERLAY] passthrough fail-safe fired");
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PassthroughInner> {
        // State is two plain fields; a poisoned lock still holds valid data.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for PassthroughState {
    fn default() -> Self {
        Self::new()
    }
}

/// The overlay must catch the pointer while it is over the tooltip or the
/// icon.
pub fn needs_interaction(pointer: Point, tooltip: Option<&Rect>, icon: &Rect) -> bool {
    icon.contains(pointer) || tooltip.is_some_and(|t| t.contains(pointer))
}

// ── Trigger serialization ────────────────────────────────────────────

/// Admits one capture at a time. Triggers arriving while one is in
/// flight are dropped.
pub struct TriggerGate {
    busy: AtomicBool,
}

/// Held for the duration of one capture; reopens the gate on drop.
pub struct TriggerGuard<'a> {
    gate: &'a TriggerGate,
}

impl TriggerGate {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    pub fn try_begin(&self) -> Option<TriggerGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TriggerGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Default for TriggerGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

// ── Tooltip session ──────────────────────────────────────────────────

/// One visible tooltip: its text, when it hides, and where it was last put.
#[derive(Debug, Default)]
pub struct TooltipSession {
    text: Option<String>,
    hide_at: Option<Instant>,
    last: Option<TooltipPosition>,
}

impl TooltipSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` (display pad applied once) for [`COMMENT_TTL`].
    /// Resets the placement so the next reposition always applies.
    pub fn show(&mut self, text: &str, now: Instant) {
        self.text = Some(comment::pad_for_display(text));
        self.hide_at = Some(now + COMMENT_TTL);
        self.last = None;
    }

    pub fn hide(&mut self) {
        self.text = None;
        self.hide_at = None;
        self.last = None;
    }

    /// Hide once the TTL has run out. Returns true when it hid.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(at) if now >= at => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.last.map(|p| p.placement)
    }

    pub fn position(&self) -> Option<TooltipPosition> {
        self.last
    }

    /// Recompute placement after the icon moved or the display changed.
    ///
    /// Returns the new position only when it differs from the applied one
    /// by at least [`REPOSITION_EPSILON`]; `None` means leave it alone.
    /// Nothing is computed while hidden.
    pub fn reposition(
        &mut self,
        anchor: &AnchorRect,
        content: &ContentBox,
        viewport: &Viewport,
    ) -> Option<TooltipPosition> {
        if !self.is_visible() {
            return None;
        }
        let next = layout::compute_placement(
            anchor,
            content,
            viewport,
            layout::tooltip::DEFAULT_EDGE_MARGIN,
        );
        if let Some(prev) = self.last {
            if prev.approx_eq(&next, REPOSITION_EPSILON) {
                return None;
            }
        }
        self.last = Some(next);
        Some(next)
    }
}

// ── Icon drag ────────────────────────────────────────────────────────

/// Tells a drag of the icon apart from a click on it.
#[derive(Debug, Default)]
pub struct DragTracker {
    start: Option<Point>,
    grab_offset: Point,
    moved: bool,
    skip_next_click: bool,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on the icon whose top-left is `icon_origin`.
    pub fn pointer_down(&mut self, pointer: Point, icon_origin: Point) {
        self.start = Some(pointer);
        self.grab_offset = Point::new(pointer.x - icon_origin.x, pointer.y - icon_origin.y);
        self.moved = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// New icon top-left for the pointer, or `None` when not dragging.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        let start = self.start?;
        if !self.moved
            && ((pointer.x - start.x).abs() > DRAG_THRESHOLD
                || (pointer.y - start.y).abs() > DRAG_THRESHOLD)
        {
            self.moved = true;
        }
        Some(Point::new(
            pointer.x - self.grab_offset.x,
            pointer.y - self.grab_offset.y,
        ))
    }

    /// Pointer released. Returns true if the gesture was a drag, in which
    /// case the click that follows is swallowed.
    pub fn pointer_up(&mut self) -> bool {
        let was_drag = self.start.take().is_some() && self.moved;
        if was_drag {
            self.skip_next_click = true;
        }
        self.moved = false;
        was_drag
    }

    /// Whether a click on the icon should open the input box.
    pub fn accept_click(&mut self) -> bool {
        !std::mem::take(&mut self.skip_next_click)
    }
}
