//! Content track
//!
//! Ordered list of items placed inside the content layer, with their vertical
//! offsets and the resulting content extent. Pure bookkeeping: the viewport
//! performs the matching host mutations.

use vista_core::NodeId;

/// An item placed in the content layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentItem {
    pub node: NodeId,
    /// Offset from the top of the content layer
    pub y: f32,
    pub estimated_height: f32,
}

impl ContentItem {
    /// Offset of the item's bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.estimated_height
    }
}

/// Items owned by the content layer, in insertion order
#[derive(Debug)]
pub struct ContentTrack {
    layer: NodeId,
    items: Vec<ContentItem>,
    content_height: f32,
}

impl ContentTrack {
    pub fn new(layer: NodeId) -> Self {
        Self {
            layer,
            items: Vec::new(),
            content_height: 0.0,
        }
    }

    /// The container node every item is parented to
    pub fn layer(&self) -> NodeId {
        self.layer
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Tracked item handles in insertion order
    pub fn nodes(&self) -> Vec<NodeId> {
        self.items.iter().map(|item| item.node).collect()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.items.iter().any(|item| item.node == node)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offset the next auto-stacked item would receive
    pub fn next_offset(&self) -> f32 {
        self.content_height
    }

    /// Append an item, auto-stacking it below the current extent when `y` is
    /// `None` or not finite. A height that is not finite counts as zero.
    /// Returns the offset the item was placed at.
    pub fn push(&mut self, node: NodeId, y: Option<f32>, estimated_height: f32) -> f32 {
        let y = y.filter(|y| y.is_finite()).unwrap_or(self.content_height);
        let estimated_height = if estimated_height.is_finite() {
            estimated_height.max(0.0)
        } else {
            0.0
        };
        let item = ContentItem {
            node,
            y,
            estimated_height,
        };
        self.content_height = self.content_height.max(item.bottom());
        self.items.push(item);
        y
    }

    /// Remove every item and reset the extent
    pub fn take_items(&mut self) -> Vec<ContentItem> {
        self.content_height = 0.0;
        std::mem::take(&mut self.items)
    }

    /// Drop items whose nodes no longer exist and recompute the extent
    pub fn retain_alive(&mut self, is_alive: impl Fn(NodeId) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| is_alive(item.node));
        self.content_height = self
            .items
            .iter()
            .map(ContentItem::bottom)
            .fold(0.0, f32::max);
        before - self.items.len()
    }
}
