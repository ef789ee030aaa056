//! Scroll controller
//!
//! Owns the scroll position and the derived maximum. The position is kept in
//! `[0, max_scroll]` after every delta, extent change and resize.

/// Vertical scroll position bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    /// Distance scrolled from the top of the content
    position: f32,
    max_scroll: f32,
    /// Height of the padded content area
    visible_height: f32,
}

impl ScrollController {
    pub fn new(visible_height: f32) -> Self {
        Self {
            position: 0.0,
            max_scroll: 0.0,
            visible_height: visible_height.max(0.0),
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn visible_height(&self) -> f32 {
        self.visible_height
    }

    /// Check if there is anything to scroll
    pub fn can_scroll(&self) -> bool {
        self.max_scroll > 0.0
    }

    pub fn set_visible_height(&mut self, visible_height: f32) {
        self.visible_height = visible_height.max(0.0);
    }

    /// Recompute the maximum from the content extent and re-clamp the
    /// position. Returns true if the position moved.
    pub fn update_max_scroll(&mut self, content_height: f32) -> bool {
        self.max_scroll = (content_height - self.visible_height).max(0.0);
        let clamped = self.position.clamp(0.0, self.max_scroll);
        let moved = clamped != self.position;
        self.position = clamped;
        moved
    }

    /// Apply a scroll delta (positive scrolls toward the bottom). Infinite
    /// deltas jump to an edge. Returns true if the position changed.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        if !self.can_scroll() || delta.is_nan() {
            return false;
        }
        let next = (self.position + delta).clamp(0.0, self.max_scroll);
        let changed = next != self.position;
        self.position = next;
        changed
    }

    /// Jump to the bottom edge
    pub fn scroll_to_end(&mut self) -> bool {
        self.scroll_by(f32::INFINITY)
    }

    /// Zero the position and maximum
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.max_scroll = 0.0;
    }

    /// Content layer y for the current position, given the viewport's top
    /// edge and padding
    pub fn content_offset(&self, viewport_top: f32, padding: f32) -> f32 {
        viewport_top + padding - self.position
    }
}
