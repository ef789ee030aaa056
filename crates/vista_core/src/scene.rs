//! Retained scene graph
//!
//! `SceneGraph` is the in-memory reference [`Host`]: nodes live in a slotmap,
//! carry a parent link and a position local to that parent. Paint order is
//! depth-first insertion order, so later siblings draw (and hit) on top.

use slotmap::{new_key_type, SlotMap};

use crate::error::{HostError, Result};
use crate::geometry::{Color, Point, Rect, Size};
use crate::host::Host;

new_key_type! {
    /// Handle to a visual owned by a host
    pub struct NodeId;
}

/// Maximum number of parent links followed when checking ancestry
pub const MAX_ANCESTRY_DEPTH: usize = 10;

/// Kind of primitive a host can create
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// Filled rectangle
    Rectangle,
    /// Stroked outline
    Graphics,
    /// Text block
    Text,
    /// Grouping node with no area of its own
    Container,
    /// Clip region applied to another node's subtree
    Mask,
}

/// Description of a visual to create
#[derive(Clone, Debug, PartialEq)]
pub struct VisualDesc {
    pub kind: VisualKind,
    /// Local bounds relative to the parent (top-left origin)
    pub bounds: Rect,
    pub fill: Option<Color>,
    /// Stroke thickness and color
    pub stroke: Option<(f32, Color)>,
    pub interactive: bool,
}

impl VisualDesc {
    pub fn rectangle(bounds: Rect, fill: Color) -> Self {
        Self {
            kind: VisualKind::Rectangle,
            bounds,
            fill: Some(fill),
            stroke: None,
            interactive: false,
        }
    }

    pub fn outline(bounds: Rect, thickness: f32, color: Color) -> Self {
        Self {
            kind: VisualKind::Graphics,
            bounds,
            fill: None,
            stroke: Some((thickness, color)),
            interactive: false,
        }
    }

    pub fn container(origin: Point) -> Self {
        Self {
            kind: VisualKind::Container,
            bounds: Rect::from_origin_size(origin, Size::ZERO),
            fill: None,
            stroke: None,
            interactive: false,
        }
    }

    pub fn mask(bounds: Rect) -> Self {
        Self {
            kind: VisualKind::Mask,
            bounds,
            fill: None,
            stroke: None,
            interactive: false,
        }
    }

    /// Mark the visual as receiving pointer input
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

/// Text appearance
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    pub color: Color,
    /// Wrap width in pixels; `None` keeps each line on one row
    pub wrap_width: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 1.2,
            color: Color::WHITE,
            wrap_width: None,
        }
    }
}

impl TextStyle {
    /// Average glyph advance relative to the font size
    const GLYPH_ADVANCE: f32 = 0.55;

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_wrap_width(mut self, width: f32) -> Self {
        self.wrap_width = Some(width);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Estimate the laid-out size of `text` without shaping it
    pub fn measure(&self, text: &str) -> Size {
        let advance = self.font_size * Self::GLYPH_ADVANCE;
        let mut rows = 0usize;
        let mut widest = 0.0f32;

        for line in text.split('\n') {
            let line_width = line.chars().count() as f32 * advance;
            match self.wrap_width {
                Some(wrap) if wrap > 0.0 && line_width > wrap => {
                    rows += (line_width / wrap).ceil() as usize;
                    widest = widest.max(wrap);
                }
                _ => {
                    rows += 1;
                    widest = widest.max(line_width);
                }
            }
        }

        Size::new(widest, rows as f32 * self.font_size * self.line_height)
    }
}

/// A node in the scene graph
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub kind: VisualKind,
    /// Position relative to the parent node
    pub position: Point,
    pub size: Size,
    pub fill: Option<Color>,
    pub stroke: Option<(f32, Color)>,
    pub text: Option<String>,
    pub visible: bool,
    pub interactive: bool,
    pub enabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    mask: Option<NodeId>,
}

impl SceneNode {
    fn from_desc(desc: VisualDesc) -> Self {
        Self {
            kind: desc.kind,
            position: desc.bounds.origin,
            size: desc.bounds.size,
            fill: desc.fill,
            stroke: desc.stroke,
            text: None,
            visible: true,
            interactive: desc.interactive,
            enabled: true,
            parent: None,
            children: Vec::new(),
            mask: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn mask(&self) -> Option<NodeId> {
        self.mask
    }
}

/// Result of walking a node's parent chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ancestry {
    /// The ancestor was found within the depth limit
    Descendant,
    /// The chain ended without reaching the ancestor
    Unrelated,
    /// The depth limit was reached before the chain ended
    DepthExceeded,
}

impl Ancestry {
    pub fn is_descendant(&self) -> bool {
        matches!(self, Ancestry::Descendant)
    }
}

/// Check whether `node` sits strictly below `ancestor`
///
/// Only the supplied get-parent capability is used, so this works against any
/// host. At most `max_depth` parent links are followed; cyclic or very deep
/// graphs report [`Ancestry::DepthExceeded`].
pub fn is_descendant_of<F>(parent_of: F, node: NodeId, ancestor: NodeId, max_depth: usize) -> Ancestry
where
    F: Fn(NodeId) -> Option<NodeId>,
{
    let mut current = parent_of(node);
    for _ in 0..max_depth {
        match current {
            None => return Ancestry::Unrelated,
            Some(id) if id == ancestor => return Ancestry::Descendant,
            Some(id) => current = parent_of(id),
        }
    }

    if current.is_some() {
        Ancestry::DepthExceeded
    } else {
        Ancestry::Unrelated
    }
}

/// In-memory scene graph
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
    ready: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            ready: true,
        }
    }

    /// Toggle whether the graph accepts new visuals
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Enable or disable pointer interaction on a node
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.enabled = enabled;
        }
    }

    fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = self.nodes.insert(node);
        self.roots.push(id);
        id
    }

    /// Position of a node in scene coordinates
    pub fn world_position(&self, id: NodeId) -> Option<Point> {
        let node = self.nodes.get(id)?;
        let mut position = node.position;
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.nodes.get(parent_id)?;
            position = position.offset(parent.position.x, parent.position.y);
            current = parent.parent;
        }
        Some(position)
    }

    /// Extent of a node's children measured from its own origin
    fn children_extent(&self, node: &SceneNode) -> Size {
        node.children
            .iter()
            .filter_map(|&child| Host::bounds(self, child))
            .fold(Size::ZERO, |extent, b| {
                Size::new(extent.width.max(b.right()), extent.height.max(b.bottom()))
            })
    }

        /// Bounds of a node in scene coordinates
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let size = self.nodes.get(id)?.size;
        self.world_position(id)
            .map(|origin| Rect::from_origin_size(origin, size))
    }

    /// Node ids in paint order (back to front), skipping hidden subtrees
    fn paint_order(&self, point: Option<Point>) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.collect_painted(root, point, &mut order);
        }
        order
    }

    fn collect_painted(&self, id: NodeId, point: Option<Point>, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        if let (Some(mask), Some(point)) = (node.mask, point) {
            let clipped_out = self
                .world_bounds(mask)
                .map_or(false, |bounds| !bounds.contains(point));
            if clipped_out {
                return;
            }
        }
        out.push(id);
        for &child in &node.children {
            self.collect_painted(child, point, out);
        }
    }

    fn would_cycle(&self, child: NodeId, parent: NodeId) -> bool {
        if child == parent {
            return true;
        }
        let mut current = self.nodes.get(parent).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == child {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get(id).and_then(|n| n.parent);
        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(parent_id) {
                    parent.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SceneGraph {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn create_visual(&mut self, desc: VisualDesc) -> Result<NodeId> {
        if !self.ready {
            return Err(HostError::NotReady);
        }
        Ok(self.insert(SceneNode::from_desc(desc)))
    }

    fn create_text(&mut self, text: &str, style: &TextStyle) -> Result<NodeId> {
        if !self.ready {
            return Err(HostError::NotReady);
        }
        let size = style.measure(text);
        let mut node = SceneNode::from_desc(VisualDesc {
            kind: VisualKind::Text,
            bounds: Rect::from_origin_size(Point::ZERO, size),
            fill: Some(style.color),
            stroke: None,
            interactive: false,
        });
        node.text = Some(text.to_owned());
        Ok(self.insert(node))
    }

    fn destroy(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.detach(id);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
            }
        }
        true
    }

    fn is_alive(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(HostError::UnknownNode);
        }
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(HostError::UnknownNode);
            }
            if self.would_cycle(child, parent_id) {
                tracing::debug!("Rejected re-parent of {:?} under {:?}: cycle", child, parent_id);
                return Err(HostError::UnknownNode);
            }
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = parent;
        }
        match parent {
            Some(parent_id) => {
                if let Some(p) = self.nodes.get_mut(parent_id) {
                    p.children.push(child);
                }
            }
            None => self.roots.push(child),
        }
        Ok(())
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.position = position;
        }
    }

    fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id).map(|n| n.position)
    }

    fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.size = size;
        }
    }

    fn bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let size = match node.kind {
            VisualKind::Container => self.children_extent(node),
            _ => node.size,
        };
        Some(Rect::from_origin_size(node.position, size))
    }

    fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    fn set_mask(&mut self, id: NodeId, mask: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.mask = mask;
        }
    }

    fn is_interactive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .map_or(false, |n| n.interactive && n.enabled)
    }

    fn hit_test(&self, point: Point) -> Vec<NodeId> {
        let mut hits: Vec<NodeId> = self
            .paint_order(Some(point))
            .into_iter()
            .filter(|&id| {
                let Some(node) = self.nodes.get(id) else {
                    return false;
                };
                !matches!(node.kind, VisualKind::Container | VisualKind::Mask)
                    && self
                        .world_bounds(id)
                        .map_or(false, |bounds| bounds.contains(point))
            })
            .collect();
        hits.reverse();
        hits
    }
}
