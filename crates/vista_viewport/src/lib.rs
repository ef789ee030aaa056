//! Vista Viewport
//!
//! A scrollable content viewport: a fixed-size framed region that clips a
//! taller stack of items and lets the user pan it by dragging empty space.
//!
//! # Features
//!
//! - **Content Track**: items stack top to bottom, or sit at explicit offsets
//! - **Drag to Scroll**: presses on interactive children are left to them
//! - **Scrollbar**: proportional handle with a minimum length
//! - **Smoothing**: programmatic scrolls ease in when a scheduler is present
//! - **Graceful Degradation**: an invalid host yields a disabled viewport
//!   rather than a panic
//!
//! # Modules
//!
//! - [`content`]: item bookkeeping and content extent
//! - [`scroll`]: clamped scroll position
//! - [`scrollbar`]: handle geometry and visuals
//! - [`pointer`]: drag gesture routing
//! - [`viewport`]: the widget tying them together

pub mod config;
pub mod content;
pub mod error;
pub mod pointer;
pub mod scroll;
pub mod scrollbar;
pub mod viewport;

pub use config::ViewportConfig;
pub use content::{ContentItem, ContentTrack};
pub use error::{Result, ViewportError};
pub use pointer::{DragState, PointerRouter, PressOutcome};
pub use scroll::ScrollController;
pub use scrollbar::{ScrollMetrics, ScrollbarGeometry, ScrollbarIndicator};
pub use viewport::{HostContext, Viewport};
