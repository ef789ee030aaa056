//! Pointer router
//!
//! Gesture state machine that decides whether a press inside the viewport
//! starts a drag-to-scroll or belongs to an interactive child of the content
//! layer, then turns pointer motion into scroll deltas.
//!
//! Pointer events are scene-global, so the router also sees moves and
//! releases that happen outside the viewport; a drag that started inside
//! keeps tracking until the pointer is released anywhere.

use vista_core::events::event_types::{POINTER_DOWN, POINTER_UP, POINTER_UP_OUTSIDE};
use vista_core::{
    is_descendant_of, Ancestry, EventType, Host, NodeId, Point, Rect, StateTransitions,
    MAX_ANCESTRY_DEPTH,
};

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

impl StateTransitions for DragState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (DragState::Idle, POINTER_DOWN) => Some(DragState::Dragging),
            (_, POINTER_UP | POINTER_UP_OUTSIDE) => Some(DragState::Idle),
            _ => None,
        }
    }
}

/// What a pointer-down resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press was outside the viewport
    Outside,
    /// The press landed on an interactive descendant of the content layer
    Child(NodeId),
    /// A drag gesture began
    DragStarted,
}

/// Gesture router for a single viewport
#[derive(Debug, Clone)]
pub struct PointerRouter {
    state: DragState,
    /// Pointer y at the previous drag step; only meaningful while dragging
    last_pointer_y: f32,
    max_depth: usize,
}

impl Default for PointerRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerRouter {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            last_pointer_y: 0.0,
            max_depth: MAX_ANCESTRY_DEPTH,
        }
    }

    /// Override how many parent links the ancestry walk follows
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Handle a press at `point`
    ///
    /// Hits are checked front to back. The first interactive hit that
    /// descends from `content_layer` claims the press. Anything else,
    /// including no hits at all, starts a drag.
    pub fn on_pointer_down(
        &mut self,
        host: &dyn Host,
        bounds: Rect,
        content_layer: NodeId,
        point: Point,
    ) -> PressOutcome {
        if !bounds.contains(point) {
            return PressOutcome::Outside;
        }

        for hit in host.hit_test(point) {
            if !host.is_interactive(hit) {
                continue;
            }
            match is_descendant_of(|id| host.parent(id), hit, content_layer, self.max_depth) {
                Ancestry::Descendant => {
                    self.state = DragState::Idle;
                    tracing::debug!(
                        "Press at ({:.1}, {:.1}) routed to child {:?}",
                        point.x,
                        point.y,
                        hit
                    );
                    return PressOutcome::Child(hit);
                }
                Ancestry::DepthExceeded => {
                    tracing::warn!(
                        "Ancestry walk for {:?} exceeded {} levels; treating as unrelated",
                        hit,
                        self.max_depth
                    );
                }
                Ancestry::Unrelated => {}
            }
        }

        self.state.apply(POINTER_DOWN);
        self.last_pointer_y = point.y;
        tracing::debug!("Drag started at y={:.1}", point.y);
        PressOutcome::DragStarted
    }

    /// Handle pointer motion. Returns the scroll delta to apply, if any.
    ///
    /// A move reporting the button released ends the drag as if a release
    /// had been delivered.
    pub fn on_pointer_move(&mut self, point: Point, pressed: bool) -> Option<f32> {
        if !self.is_dragging() {
            return None;
        }
        if !pressed {
            tracing::debug!("Pointer no longer held; ending drag");
            self.state.apply(POINTER_UP);
            return None;
        }

        let delta = self.last_pointer_y - point.y;
        self.last_pointer_y = point.y;
        tracing::trace!("Drag step y={:.1} delta={:.1}", point.y, delta);
        Some(delta)
    }

    /// Handle a release anywhere. Always returns to idle.
    pub fn on_pointer_up(&mut self) {
        if self.state.apply(POINTER_UP) {
            tracing::debug!("Drag ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::{Color, SceneGraph, VisualDesc};

    struct Fixture {
        scene: SceneGraph,
        bounds: Rect,
        layer: NodeId,
        button: NodeId,
    }

    fn fixture() -> Fixture {
        let mut scene = SceneGraph::new();
        let bounds = Rect::new(0.0, 0.0, 200.0, 300.0);
        scene
            .create_visual(VisualDesc::rectangle(bounds, Color::BLACK))
            .unwrap();
        let layer = scene
            .create_visual(VisualDesc::container(Point::new(10.0, 10.0)))
            .unwrap();
        let row = scene
            .create_visual(VisualDesc::container(Point::ZERO))
            .unwrap();
        let button = scene
            .create_visual(
                VisualDesc::rectangle(Rect::new(0.0, 0.0, 80.0, 30.0), Color::WHITE).interactive(),
            )
            .unwrap();
        scene.set_parent(row, Some(layer)).unwrap();
        scene.set_parent(button, Some(row)).unwrap();

        Fixture {
            scene,
            bounds,
            layer,
            button,
        }
    }

    #[test]
    fn test_drag_state_transitions() {
        let mut state = DragState::Idle;
        assert!(state.apply(POINTER_DOWN));
        assert_eq!(state, DragState::Dragging);
        assert!(!state.apply(POINTER_DOWN));
        assert!(state.apply(POINTER_UP_OUTSIDE));
        assert_eq!(state, DragState::Idle);
        assert!(!state.apply(POINTER_UP));
    }

    #[test]
    fn test_press_on_nested_child_does_not_drag() {
        let f = fixture();
        let mut router = PointerRouter::new();

        let outcome = router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(20.0, 20.0));
        assert_eq!(outcome, PressOutcome::Child(f.button));
        assert_eq!(router.state(), DragState::Idle);
        assert_eq!(router.on_pointer_move(Point::new(20.0, 0.0), true), None);
    }

    #[test]
    fn test_press_on_background_drags() {
        let f = fixture();
        let mut router = PointerRouter::new();

        let outcome = router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(150.0, 200.0));
        assert_eq!(outcome, PressOutcome::DragStarted);
        assert!(router.is_dragging());

        assert_eq!(router.on_pointer_move(Point::new(150.0, 170.0), true), Some(30.0));
        assert_eq!(router.on_pointer_move(Point::new(150.0, 180.0), true), Some(-10.0));

        router.on_pointer_up();
        assert_eq!(router.state(), DragState::Idle);
    }

    #[test]
    fn test_disabled_child_does_not_claim_press() {
        let mut f = fixture();
        f.scene.set_enabled(f.button, false);
        let mut router = PointerRouter::new();

        let outcome = router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(20.0, 20.0));
        assert_eq!(outcome, PressOutcome::DragStarted);
    }

    #[test]
    fn test_interactive_outside_content_layer_does_not_claim_press() {
        let mut f = fixture();
        let overlay = f
            .scene
            .create_visual(
                VisualDesc::rectangle(Rect::new(100.0, 100.0, 50.0, 50.0), Color::WHITE)
                    .interactive(),
            )
            .unwrap();
        let mut router = PointerRouter::new();

        let outcome = router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(120.0, 120.0));
        assert_eq!(outcome, PressOutcome::DragStarted);
        assert!(f.scene.is_alive(overlay));
    }

    #[test]
    fn test_depth_limit_defaults_to_drag() {
        let f = fixture();
        let mut router = PointerRouter::new().with_max_depth(1);

        let outcome = router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(20.0, 20.0));
        assert_eq!(outcome, PressOutcome::DragStarted);
    }

    #[test]
    fn test_press_outside_bounds_ignored() {
        let f = fixture();
        let mut router = PointerRouter::new();

        let outcome = router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(250.0, 20.0));
        assert_eq!(outcome, PressOutcome::Outside);
        assert_eq!(router.state(), DragState::Idle);
    }

    #[test]
    fn test_move_without_button_ends_drag() {
        let f = fixture();
        let mut router = PointerRouter::new();
        router.on_pointer_down(&f.scene, f.bounds, f.layer, Point::new(150.0, 200.0));

        assert_eq!(router.on_pointer_move(Point::new(150.0, 100.0), false), None);
        assert_eq!(router.state(), DragState::Idle);
        assert_eq!(router.on_pointer_move(Point::new(150.0, 50.0), true), None);
    }

    #[test]
    fn test_release_without_press_is_harmless() {
        let mut router = PointerRouter::new();
        router.on_pointer_up();
        assert_eq!(router.state(), DragState::Idle);
    }
}
