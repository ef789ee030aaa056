//! Scrollbar indicator
//!
//! A track and a proportional handle along the right edge of the padded
//! content area. Purely derived from scroll state; it never takes input.

use vista_core::{Host, NodeId, Rect};

/// Gap between the scrollbar and the viewport's right edge
const EDGE_INSET: f32 = 2.0;

/// Scroll values the indicator is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub position: f32,
    pub max_scroll: f32,
    pub visible_height: f32,
    pub content_height: f32,
}

/// Resolved scrollbar rectangles in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    pub track: Rect,
    pub handle: Rect,
}

/// Compute the scrollbar layout, or `None` when there is nothing to scroll
///
/// Handle length is `max(min_handle, track * min(1, visible / content))`,
/// capped at the track length; its offset along the track is
/// `(position / max_scroll) * (track - handle)`.
pub fn compute_geometry(
    track: Rect,
    metrics: ScrollMetrics,
    min_handle_size: f32,
) -> Option<ScrollbarGeometry> {
    if metrics.max_scroll <= 0.0 || metrics.content_height <= 0.0 {
        return None;
    }

    let track_length = track.height();
    let ratio = (metrics.visible_height / metrics.content_height).min(1.0);
    let handle_length = (track_length * ratio)
        .max(min_handle_size)
        .min(track_length);

    let progress = (metrics.position / metrics.max_scroll).clamp(0.0, 1.0);
    let handle_offset = progress * (track_length - handle_length);

    Some(ScrollbarGeometry {
        track,
        handle: Rect::new(
            track.x(),
            track.y() + handle_offset,
            track.width(),
            handle_length,
        ),
    })
}

/// Track rectangle for a viewport with the given bounds and padding
pub fn track_rect(bounds: Rect, padding: f32, width: f32, visible_height: f32) -> Rect {
    Rect::new(
        bounds.right() - width - EDGE_INSET,
        bounds.y() + padding,
        width,
        visible_height,
    )
}

/// The track/handle visuals and their last computed layout
#[derive(Debug, Default)]
pub struct ScrollbarIndicator {
    track: Option<NodeId>,
    handle: Option<NodeId>,
    min_handle_size: f32,
    geometry: Option<ScrollbarGeometry>,
}

impl ScrollbarIndicator {
    /// Indicator over visuals that may have failed to create
    pub fn new(track: Option<NodeId>, handle: Option<NodeId>, min_handle_size: f32) -> Self {
        Self {
            track,
            handle,
            min_handle_size: min_handle_size.max(0.0),
            geometry: None,
        }
    }

    /// Current layout, `None` while hidden
    pub fn geometry(&self) -> Option<ScrollbarGeometry> {
        self.geometry
    }

    pub fn is_visible(&self) -> bool {
        self.geometry.is_some()
    }

    /// Visual handles that exist
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        self.track.into_iter().chain(self.handle)
    }

    /// Recompute the layout and push it to the host. `shown` is false while
    /// the whole viewport is hidden.
    pub fn update(&mut self, host: &mut dyn Host, track: Rect, metrics: ScrollMetrics, shown: bool) {
        self.geometry = compute_geometry(track, metrics, self.min_handle_size);

        match self.geometry {
            Some(geometry) => {
                if let Some(node) = self.track {
                    host.set_position(node, geometry.track.origin);
                    host.set_size(node, geometry.track.size);
                    host.set_visible(node, shown);
                }
                if let Some(node) = self.handle {
                    host.set_position(node, geometry.handle.origin);
                    host.set_size(node, geometry.handle.size);
                    host.set_visible(node, shown);
                }
            }
            None => self.hide(host),
        }
    }

    /// Hide both visuals without touching the stored layout
    pub fn hide(&self, host: &mut dyn Host) {
        for node in self.nodes() {
            host.set_visible(node, false);
        }
    }

    /// Forget the visual handles after they were destroyed
    pub fn detach(&mut self) {
        self.track = None;
        self.handle = None;
        self.geometry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::{Color, SceneGraph, VisualDesc};

    fn metrics(position: f32, content_height: f32) -> ScrollMetrics {
        ScrollMetrics {
            position,
            max_scroll: (content_height - 280.0).max(0.0),
            visible_height: 280.0,
            content_height,
        }
    }

    #[test]
    fn test_hidden_without_overflow() {
        let track = Rect::new(0.0, 10.0, 6.0, 280.0);
        assert!(compute_geometry(track, metrics(0.0, 250.0), 20.0).is_none());
    }

    #[test]
    fn test_handle_proportional_and_travels() {
        let track = Rect::new(0.0, 10.0, 6.0, 280.0);

        let top = compute_geometry(track, metrics(0.0, 500.0), 20.0).unwrap();
        assert!((top.handle.height() - 280.0 * 280.0 / 500.0).abs() < 0.001);
        assert_eq!(top.handle.y(), 10.0);

        let bottom = compute_geometry(track, metrics(220.0, 500.0), 20.0).unwrap();
        assert!((bottom.handle.bottom() - track.bottom()).abs() < 0.001);

        let middle = compute_geometry(track, metrics(110.0, 500.0), 20.0).unwrap();
        assert!(middle.handle.y() > top.handle.y());
        assert!(middle.handle.y() < bottom.handle.y());
    }

    #[test]
    fn test_min_handle_size() {
        let track = Rect::new(0.0, 0.0, 6.0, 280.0);
        let geometry = compute_geometry(track, metrics(0.0, 100_000.0), 20.0).unwrap();
        assert_eq!(geometry.handle.height(), 20.0);

        // Never longer than the track itself
        let tiny = Rect::new(0.0, 0.0, 6.0, 10.0);
        let geometry = compute_geometry(tiny, metrics(0.0, 500.0), 20.0).unwrap();
        assert_eq!(geometry.handle.height(), 10.0);
    }

    #[test]
    fn test_update_toggles_visuals() {
        let mut scene = SceneGraph::new();
        let fill = Color::WHITE;
        let track_node = scene
            .create_visual(VisualDesc::rectangle(Rect::ZERO, fill))
            .unwrap();
        let handle_node = scene
            .create_visual(VisualDesc::rectangle(Rect::ZERO, fill))
            .unwrap();
        let mut indicator = ScrollbarIndicator::new(Some(track_node), Some(handle_node), 20.0);
        let track = Rect::new(292.0, 10.0, 6.0, 280.0);

        indicator.update(&mut scene, track, metrics(0.0, 500.0), true);
        assert!(indicator.is_visible());
        assert!(scene.get(handle_node).unwrap().visible);
        assert_eq!(scene.bounds(track_node), Some(track));

        indicator.update(&mut scene, track, metrics(0.0, 200.0), true);
        assert!(!indicator.is_visible());
        assert!(!scene.get(track_node).unwrap().visible);
        assert!(!scene.get(handle_node).unwrap().visible);
    }

    #[test]
    fn test_track_rect_hugs_right_edge() {
        let bounds = Rect::new(100.0, 0.0, 200.0, 300.0);
        let track = track_rect(bounds, 10.0, 6.0, 280.0);
        assert_eq!(track, Rect::new(292.0, 10.0, 6.0, 280.0));
    }
}
