//! Host abstraction
//!
//! Widgets never draw on their own: they ask a host to create, move and
//! destroy primitive visuals, and to answer hit-test and ancestry queries.
//! [`SceneGraph`](crate::scene::SceneGraph) is the in-memory implementation.

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::scene::{NodeId, TextStyle, VisualDesc};

/// Visual factory and scene queries supplied by the embedding application
pub trait Host: Send {
    /// Whether visuals can be created right now
    fn is_ready(&self) -> bool;

    /// Create a rectangle, outline, container or mask
    fn create_visual(&mut self, desc: VisualDesc) -> Result<NodeId>;

    /// Create a text visual sized to its content
    fn create_text(&mut self, text: &str, style: &TextStyle) -> Result<NodeId>;

    /// Destroy a visual and its children. Returns false if it was already gone.
    fn destroy(&mut self, id: NodeId) -> bool;

    fn is_alive(&self, id: NodeId) -> bool;

    /// Re-parent a visual; `None` makes it a root
    fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()>;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Set the position relative to the parent
    fn set_position(&mut self, id: NodeId, position: Point);

    fn position(&self, id: NodeId) -> Option<Point>;

    fn set_size(&mut self, id: NodeId, size: Size);

    /// Bounds relative to the parent. A container reports the extent of its
    /// children, measured from its own origin.
    fn bounds(&self, id: NodeId) -> Option<Rect>;

    fn set_visible(&mut self, id: NodeId, visible: bool);

    /// Clip a visual's subtree to a mask visual
    fn set_mask(&mut self, id: NodeId, mask: Option<NodeId>);

    /// Whether the visual is interactive and currently enabled
    fn is_interactive(&self, id: NodeId) -> bool;

    /// Visuals under `point`, front-most first
    fn hit_test(&self, point: Point) -> Vec<NodeId>;
}

/// Host shared between a widget and its input handlers
pub type SharedHost = Arc<Mutex<dyn Host>>;
