//! Vista Core
//!
//! Foundational primitives shared by Vista widgets:
//!
//! - **Geometry**: points, sizes, rects and the bounds-containment probe
//! - **Scene Graph**: a retained node tree that doubles as the reference host
//! - **Event Dispatch**: scene-global pointer subscriptions with explicit handles
//! - **State Transitions**: event-driven interaction states
//!
//! # Example
//!
//! ```rust
//! use vista_core::{Color, Host, Point, Rect, SceneGraph, VisualDesc};
//!
//! let mut scene = SceneGraph::new();
//! let panel = scene
//!     .create_visual(VisualDesc::rectangle(Rect::new(0.0, 0.0, 100.0, 40.0), Color::WHITE))
//!     .unwrap();
//!
//! assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), vec![panel]);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod host;
pub mod scene;

pub use error::HostError;
pub use events::{
    Event, EventData, EventDispatcher, EventType, SharedDispatcher, SubscriptionId,
};
pub use fsm::StateTransitions;
pub use geometry::{Color, Point, Rect, Size};
pub use host::{Host, SharedHost};
pub use scene::{
    is_descendant_of, Ancestry, NodeId, SceneGraph, SceneNode, TextStyle, VisualDesc, VisualKind,
    MAX_ANCESTRY_DEPTH,
};

/// Lock a mutex, recovering the data if a previous holder panicked
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
