//! Event dispatch system
//!
//! Pointer input is scene-global: every subscriber registered for an event
//! type receives it, whether or not the pointer is over the subscriber.
//! Each subscription is identified by a [`SubscriptionId`] so its owner can
//! release exactly the handles it created.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::Point;
use crate::lock;

/// Event type identifier
pub type EventType = u32;

/// Pointer event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer released while outside the surface that received the down
    pub const POINTER_UP_OUTSIDE: EventType = 4;
    pub const WHEEL: EventType = 30;
}

new_key_type! {
    /// Handle to a registered event subscription
    pub struct SubscriptionId;
}

/// An input event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
        /// Whether the primary button is held at the time of the event
        pressed: bool,
    },
    Wheel {
        x: f32,
        y: f32,
        delta_y: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
        }
    }

    fn pointer(event_type: EventType, x: f32, y: f32, pressed: bool) -> Self {
        Self::new(
            event_type,
            EventData::Pointer {
                x,
                y,
                button: 0,
                pressed,
            },
        )
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_DOWN, x, y, true)
    }

    pub fn pointer_move(x: f32, y: f32, pressed: bool) -> Self {
        Self::pointer(event_types::POINTER_MOVE, x, y, pressed)
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_UP, x, y, false)
    }

    pub fn pointer_up_outside(x: f32, y: f32) -> Self {
        Self::pointer(event_types::POINTER_UP_OUTSIDE, x, y, false)
    }

    pub fn wheel(x: f32, y: f32, delta_y: f32) -> Self {
        Self::new(event_types::WHEEL, EventData::Wheel { x, y, delta_y })
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Pointer position carried by the event, if any
    pub fn position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { x, y, .. } | EventData::Wheel { x, y, .. } => {
                Some(Point::new(x, y))
            }
            EventData::None => None,
        }
    }

    /// Whether the primary button is reported held
    pub fn is_pressed(&self) -> bool {
        matches!(self.data, EventData::Pointer { pressed: true, .. })
    }
}

/// Event handler function type
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

struct Subscription {
    event_type: EventType,
    handler: EventHandler,
}

/// Dispatches events to every subscriber of an event type
pub struct EventDispatcher {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    by_type: FxHashMap<EventType, SmallVec<[SubscriptionId; 4]>>,
    open: bool,
}

/// Dispatcher shared between the input source and widgets
pub type SharedDispatcher = Arc<Mutex<EventDispatcher>>;

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
            by_type: FxHashMap::default(),
            open: true,
        }
    }

    /// Create a dispatcher wrapped for sharing
    pub fn shared() -> SharedDispatcher {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Whether the input source is still delivering events
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Stop delivering events. Existing subscriptions are kept until released.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Register a handler for an event type
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.subscriptions.insert(Subscription {
            event_type,
            handler: Arc::new(handler),
        });
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Release a subscription. Returns false if the handle was already released.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(subscription) = self.subscriptions.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&subscription.event_type) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.by_type.remove(&subscription.event_type);
            }
        }
        true
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(id)
    }

    /// Number of live subscriptions across all event types
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Handlers registered for an event type, in subscription order
    pub fn handlers_for(&self, event_type: EventType) -> Vec<EventHandler> {
        if !self.open {
            return Vec::new();
        }
        self.by_type
            .get(&event_type)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.subscriptions.get(*id))
                    .map(|s| Arc::clone(&s.handler))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dispatch an event to all registered handlers. Returns the delivery count.
    pub fn dispatch(&self, event: &Event) -> usize {
        let handlers = self.handlers_for(event.event_type);
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Dispatch through a shared dispatcher without holding its lock while
    /// handlers run, so a handler may release subscriptions.
    pub fn dispatch_shared(dispatcher: &SharedDispatcher, event: &Event) -> usize {
        let handlers = lock(dispatcher).handlers_for(event.event_type);
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
