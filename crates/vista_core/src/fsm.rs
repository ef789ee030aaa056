//! Event-driven interaction states
//!
//! Widgets model their interaction state as a plain enum and map incoming
//! event types to transitions:
//!
//! ```ignore
//! impl StateTransitions for PressState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         use vista_core::events::event_types::*;
//!         match (self, event) {
//!             (PressState::Idle, POINTER_DOWN) => Some(PressState::Pressed),
//!             (PressState::Pressed, POINTER_UP) => Some(PressState::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Trait for state types that transition on event types
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Apply an event in place. Returns true if the state changed.
    fn apply(&mut self, event: EventType) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
