//! Scrollable viewport widget
//!
//! A fixed-size region that clips a taller content layer, pans it when the
//! pointer drags empty space, and shows a proportional scrollbar.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use vista_core::{Event, EventDispatcher, Point, SceneGraph, SharedHost, Size};
//! use vista_viewport::{HostContext, Viewport, ViewportConfig};
//!
//! let scene = Arc::new(Mutex::new(SceneGraph::new()));
//! let host: SharedHost = scene.clone();
//! let input = EventDispatcher::shared();
//!
//! let log = Viewport::create(
//!     &HostContext::new(host, input.clone()),
//!     Point::new(200.0, 150.0),
//!     Size::new(300.0, 300.0),
//!     ViewportConfig::plain(),
//! );
//!
//! for turn in 1..=40 {
//!     log.add_text(&format!("Turn {turn}: the goblin swings"), None).unwrap();
//! }
//! log.scroll_to_bottom();
//! assert_eq!(log.position(), log.max_scroll());
//!
//! // Drag the content down by 50px from an empty spot
//! EventDispatcher::dispatch_shared(&input, &Event::pointer_down(340.0, 100.0));
//! EventDispatcher::dispatch_shared(&input, &Event::pointer_move(340.0, 150.0, true));
//! EventDispatcher::dispatch_shared(&input, &Event::pointer_up(340.0, 150.0));
//! assert_eq!(log.position(), log.max_scroll() - 50.0);
//! ```
//!
//! # Lifecycle
//!
//! Construction validates the host context. A viewport built against a host
//! that cannot create visuals, or an input source that is closed, is never
//! live: every call on it is a no-op and item calls return
//! [`ViewportError::NotLive`]. [`Viewport::destroy`] releases the pointer
//! subscriptions before any state is torn down, and may be called any number
//! of times. Dropping a viewport destroys it.

use std::sync::{Arc, Mutex, Weak};

use smallvec::SmallVec;
use vista_animation::{SharedScheduler, Tween, TweenId};
use vista_core::events::event_types::{
    POINTER_DOWN, POINTER_MOVE, POINTER_UP, POINTER_UP_OUTSIDE, WHEEL,
};
use vista_core::{
    lock, Event, EventData, EventType, Host, HostError, NodeId, Point, Rect, SharedDispatcher,
    SharedHost, Size, SubscriptionId, TextStyle, VisualDesc,
};

use crate::config::ViewportConfig;
use crate::content::ContentTrack;
use crate::error::{Result, ViewportError};
use crate::pointer::{DragState, PointerRouter, PressOutcome};
use crate::scroll::ScrollController;
use crate::scrollbar::{self, ScrollMetrics, ScrollbarGeometry, ScrollbarIndicator};

/// Pointer event types a viewport listens to
const ROUTED_EVENTS: [EventType; 5] = [
    POINTER_DOWN,
    POINTER_MOVE,
    POINTER_UP,
    POINTER_UP_OUTSIDE,
    WHEEL,
];

/// Space kept between wrapped text and the scrollbar
const TEXT_GUTTER: f32 = 4.0;

/// Everything a viewport needs from its embedder
#[derive(Clone)]
pub struct HostContext {
    pub host: SharedHost,
    pub input: SharedDispatcher,
    /// Drives smoothing when present; scrolls jump instantly without it
    pub scheduler: Option<SharedScheduler>,
}

impl HostContext {
    pub fn new(host: SharedHost, input: SharedDispatcher) -> Self {
        Self {
            host,
            input,
            scheduler: None,
        }
    }

    pub fn with_scheduler(mut self, scheduler: SharedScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Check the host can create visuals and the input source is open
    pub fn validate(&self) -> Result<()> {
        if !lock(&self.host).is_ready() {
            return Err(HostError::NotReady.into());
        }
        if !lock(&self.input).is_open() {
            return Err(ViewportError::InputUnavailable);
        }
        Ok(())
    }
}

/// How a new content offset reaches the content layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    /// Tween toward the offset when smoothing is available
    Smooth,
    Immediate,
}

fn optional_visual(result: std::result::Result<NodeId, HostError>, what: &str) -> Option<NodeId> {
    match result {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!("Viewport {} unavailable: {}", what, err);
            None
        }
    }
}

/// State of a viewport that was built successfully and not yet destroyed
struct LiveViewport {
    host: SharedHost,
    input: SharedDispatcher,
    scheduler: Option<SharedScheduler>,
    config: ViewportConfig,
    /// Center of the viewport; fixed for its whole life
    origin: Point,
    size: Size,
    visible: bool,
    background: NodeId,
    border: Option<NodeId>,
    mask: Option<NodeId>,
    track: ContentTrack,
    scroll: ScrollController,
    scrollbar: ScrollbarIndicator,
    router: PointerRouter,
    subscriptions: SmallVec<[SubscriptionId; 5]>,
    tween: Option<TweenId>,
}

type SharedState = Arc<Mutex<Option<LiveViewport>>>;

impl LiveViewport {
    fn build(ctx: &HostContext, origin: Point, size: Size, config: ViewportConfig) -> Result<Self> {
        ctx.validate()?;

        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        let padding = config.effective_padding();
        let bounds = Rect::centered_at(origin, size);
        let scroll = ScrollController::new(size.height - 2.0 * padding);
        let content_rect = Rect::new(
            bounds.x() + padding,
            bounds.y() + padding,
            (size.width - 2.0 * padding).max(0.0),
            scroll.visible_height(),
        );

        let mut host = lock(&ctx.host);
        let background = host.create_visual(VisualDesc::rectangle(bounds, config.background()))?;
        let layer = match host.create_visual(VisualDesc::container(content_rect.origin)) {
            Ok(id) => id,
            Err(err) => {
                host.destroy(background);
                return Err(err.into());
            }
        };

        let border = config.border().and_then(|(thickness, color)| {
            optional_visual(
                host.create_visual(VisualDesc::outline(bounds, thickness, color)),
                "border",
            )
        });

        let mask = if config.mask_enabled {
            optional_visual(host.create_visual(VisualDesc::mask(content_rect)), "clip mask")
        } else {
            None
        };
        if let Some(mask) = mask {
            host.set_mask(layer, Some(mask));
        }

        let scrollbar = if config.scrollbar_width > 0.0 {
            let track_rect = scrollbar::track_rect(
                bounds,
                padding,
                config.scrollbar_width,
                scroll.visible_height(),
            );
            let track = optional_visual(
                host.create_visual(VisualDesc::rectangle(track_rect, config.scrollbar_track_fill())),
                "scrollbar track",
            );
            let handle = optional_visual(
                host.create_visual(VisualDesc::rectangle(track_rect, config.scrollbar_fill())),
                "scrollbar handle",
            );
            ScrollbarIndicator::new(track, handle, config.min_handle_size)
        } else {
            ScrollbarIndicator::new(None, None, config.min_handle_size)
        };
        scrollbar.hide(&mut *host);
        drop(host);

        Ok(Self {
            host: Arc::clone(&ctx.host),
            input: Arc::clone(&ctx.input),
            scheduler: ctx.scheduler.clone(),
            config,
            origin,
            size,
            visible: true,
            background,
            border,
            mask,
            track: ContentTrack::new(layer),
            scroll,
            scrollbar,
            router: PointerRouter::new(),
            subscriptions: SmallVec::new(),
            tween: None,
        })
    }

    fn padding(&self) -> f32 {
        self.config.effective_padding()
    }

    fn bounds(&self) -> Rect {
        Rect::centered_at(self.origin, self.size)
    }

    /// Padded area the content is visible through
    fn content_rect(&self) -> Rect {
        let bounds = self.bounds();
        let padding = self.padding();
        Rect::new(
            bounds.x() + padding,
            bounds.y() + padding,
            (bounds.width() - 2.0 * padding).max(0.0),
            self.scroll.visible_height(),
        )
    }

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            position: self.scroll.position(),
            max_scroll: self.scroll.max_scroll(),
            visible_height: self.scroll.visible_height(),
            content_height: self.track.content_height(),
        }
    }

    fn owns_visual(&self, node: NodeId) -> bool {
        node == self.background
            || node == self.track.layer()
            || self.border == Some(node)
            || self.mask == Some(node)
            || self.scrollbar.nodes().any(|n| n == node)
    }

    fn default_text_style(&self) -> TextStyle {
        let wrap = self.content_rect().width() - self.config.scrollbar_width.max(0.0) - TEXT_GUTTER;
        TextStyle::default().with_wrap_width(wrap.max(0.0))
    }

    // =========================================================================
    // Content
    // =========================================================================

    fn add_item(&mut self, node: NodeId, y: Option<f32>) -> Result<NodeId> {
        if self.track.contains(node) || self.owns_visual(node) {
            return Err(ViewportError::InvalidItem {
                node,
                reason: "already owned by this viewport",
            });
        }
        if y.is_some_and(|y| !y.is_finite()) {
            return Err(ViewportError::InvalidItem {
                node,
                reason: "offset is not finite",
            });
        }

        {
            let mut host = lock(&self.host);
            if !host.is_alive(node) {
                return Err(ViewportError::InvalidItem {
                    node,
                    reason: "not a live visual",
                });
            }
            let estimated_height = host
                .bounds(node)
                .map(|b| b.height())
                .filter(|h| h.is_finite())
                .unwrap_or(0.0);
            let x = host.position(node).map_or(0.0, |p| p.x);
            host.set_parent(node, Some(self.track.layer()))?;
            let y = self.track.push(node, y, estimated_height);
            host.set_position(node, Point::new(x, y));
            tracing::trace!(
                "Item {:?} placed at y={:.1} (height {:.1})",
                node,
                y,
                estimated_height
            );
        }

        self.refresh_extent();
        Ok(node)
    }

    fn add_text(&mut self, text: &str, style: Option<&TextStyle>) -> Result<NodeId> {
        let style = style.cloned().unwrap_or_else(|| self.default_text_style());
        let node = lock(&self.host).create_text(text, &style)?;
        self.add_item(node, None).map_err(|err| {
            lock(&self.host).destroy(node);
            err
        })
    }

    fn clear(&mut self) {
        let items = self.track.take_items();
        {
            let mut host = lock(&self.host);
            for item in &items {
                host.destroy(item.node);
            }
        }
        self.scroll.reset();
        self.apply_offset(Motion::Immediate);
        self.update_scrollbar();
        tracing::debug!("Viewport cleared {} items", items.len());
    }

    /// Forget items destroyed behind the viewport's back. Returns true if
    /// any were dropped.
    fn prune_destroyed(&mut self) -> bool {
        let pruned = {
            let host = lock(&self.host);
            self.track.retain_alive(|node| host.is_alive(node))
        };
        if pruned > 0 {
            tracing::debug!("Dropped {} destroyed items from the content track", pruned);
        }
        pruned > 0
    }

    /// Bring the extent up to date before it is observed
    fn sync_items(&mut self) {
        if self.prune_destroyed() {
            self.refresh_extent();
        }
    }

    /// Re-derive scroll limits after the content extent changed
    fn refresh_extent(&mut self) {
        self.prune_destroyed();
        if self.scroll.update_max_scroll(self.track.content_height()) {
            self.apply_offset(Motion::Immediate);
        }
        self.update_scrollbar();
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    fn scroll(&mut self, delta: f32, motion: Motion) {
        if !self.scroll.scroll_by(delta) {
            return;
        }
        self.apply_offset(motion);
        self.update_scrollbar();
    }

    fn cancel_tween(&mut self) {
        if let (Some(id), Some(scheduler)) = (self.tween.take(), &self.scheduler) {
            lock(scheduler).cancel(id);
        }
    }

    /// Move the content layer to match the scroll position. Any running
    /// smoothing tween is superseded.
    fn apply_offset(&mut self, motion: Motion) {
        self.cancel_tween();

        let layer = self.track.layer();
        let x = self.bounds().x() + self.padding();
        let target = self.scroll.content_offset(self.bounds().y(), self.padding());
        let smooth = motion == Motion::Smooth
            && self.config.smooth_scroll
            && self.config.smooth_duration_ms > 0;

        let mut host = lock(&self.host);
        let current_y = host.position(layer).map_or(target, |p| p.y);
        match &self.scheduler {
            Some(scheduler) if smooth && (current_y - target).abs() > 0.5 => {
                drop(host);
                let tween = Tween::new(current_y, target, self.config.smooth_duration());
                self.tween = Some(lock(scheduler).add_tween(layer, tween));
            }
            _ => host.set_position(layer, Point::new(x, target)),
        }
    }

    fn update_scrollbar(&mut self) {
        let track = scrollbar::track_rect(
            self.bounds(),
            self.padding(),
            self.config.scrollbar_width,
            self.scroll.visible_height(),
        );
        let metrics = self.metrics();
        let mut host = lock(&self.host);
        self.scrollbar.update(&mut *host, track, metrics, self.visible);
    }

    // =========================================================================
    // Geometry & visibility
    // =========================================================================

    fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width.max(0.0), height.max(0.0));
        self.scroll
            .set_visible_height(self.size.height - 2.0 * self.padding());

        let bounds = self.bounds();
        let content_rect = self.content_rect();
        {
            let mut host = lock(&self.host);
            for node in std::iter::once(self.background).chain(self.border) {
                host.set_position(node, bounds.origin);
                host.set_size(node, bounds.size);
            }
            if let Some(mask) = self.mask {
                host.set_position(mask, content_rect.origin);
                host.set_size(mask, content_rect.size);
            }
        }

        self.scroll.update_max_scroll(self.track.content_height());
        self.apply_offset(Motion::Immediate);
        self.update_scrollbar();
        tracing::debug!(
            "Viewport resized to {:.0}x{:.0}; max scroll {:.1}",
            self.size.width,
            self.size.height,
            self.scroll.max_scroll()
        );
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        {
            let mut host = lock(&self.host);
            for node in [self.background, self.track.layer()]
                .into_iter()
                .chain(self.border)
            {
                host.set_visible(node, visible);
            }
        }
        self.update_scrollbar();
    }

    // =========================================================================
    // Pointer routing
    // =========================================================================

    fn handle_event(&mut self, event: &Event) {
        match event.event_type {
            POINTER_DOWN => self.on_pointer_down(event),
            POINTER_MOVE => self.on_pointer_move(event),
            POINTER_UP | POINTER_UP_OUTSIDE => self.router.on_pointer_up(),
            WHEEL => self.on_wheel(event),
            _ => {}
        }
    }

    fn on_pointer_down(&mut self, event: &Event) {
        if !self.visible {
            return;
        }
        let Some(point) = event.position() else {
            return;
        };
        let bounds = self.bounds();
        let layer = self.track.layer();
        let host = lock(&self.host);
        if let PressOutcome::Child(node) = self.router.on_pointer_down(&*host, bounds, layer, point) {
            tracing::trace!("Press left to child {:?}", node);
        }
    }

    fn on_pointer_move(&mut self, event: &Event) {
        let Some(point) = event.position() else {
            return;
        };
        if let Some(delta) = self.router.on_pointer_move(point, event.is_pressed()) {
            self.scroll(delta, Motion::Immediate);
        }
    }

    fn on_wheel(&mut self, event: &Event) {
        let EventData::Wheel { x, y, delta_y } = event.data else {
            return;
        };
        if self.visible && self.bounds().contains(Point::new(x, y)) {
            self.scroll(delta_y, Motion::Smooth);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Release exactly the subscriptions this viewport created
    fn release_subscriptions(&mut self) -> usize {
        let mut input = lock(&self.input);
        self.subscriptions
            .drain(..)
            .filter(|id| input.unsubscribe(*id))
            .count()
    }

    fn destroy_visuals(&mut self) {
        self.cancel_tween();
        let items = self.track.take_items();
        let owned: Vec<NodeId> = [Some(self.background), self.border, Some(self.track.layer()), self.mask]
            .into_iter()
            .flatten()
            .chain(self.scrollbar.nodes())
            .collect();
        self.scrollbar.detach();

        let mut host = lock(&self.host);
        for node in items.iter().map(|item| item.node).chain(owned) {
            if host.is_alive(node) {
                host.destroy(node);
            }
        }
    }
}

fn route_event(state: &Weak<Mutex<Option<LiveViewport>>>, event: &Event) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut guard = lock(&state);
    if let Some(live) = guard.as_mut() {
        live.handle_event(event);
    }
}

fn subscribe(state: &SharedState, input: &SharedDispatcher) -> SmallVec<[SubscriptionId; 5]> {
    let weak = Arc::downgrade(state);
    let mut dispatcher = lock(input);
    ROUTED_EVENTS
        .into_iter()
        .map(|event_type| {
            let weak = Weak::clone(&weak);
            dispatcher.subscribe(event_type, move |event| route_event(&weak, event))
        })
        .collect()
}

/// Scrollable content viewport
pub struct Viewport {
    state: SharedState,
}

impl Viewport {
    /// Create a viewport centered on `origin`
    ///
    /// If the host context is invalid the viewport is returned disabled and
    /// a single warning is logged.
    pub fn create(ctx: &HostContext, origin: Point, size: Size, config: ViewportConfig) -> Self {
        let state: SharedState = Arc::new(Mutex::new(None));
        match LiveViewport::build(ctx, origin, size, config) {
            Ok(mut live) => {
                live.subscriptions = subscribe(&state, &ctx.input);
                tracing::debug!(
                    "Viewport created at ({:.0}, {:.0}) size {:.0}x{:.0}",
                    origin.x,
                    origin.y,
                    live.size.width,
                    live.size.height
                );
                *lock(&state) = Some(live);
            }
            Err(err) => tracing::warn!("Viewport disabled: {}", err),
        }
        Self { state }
    }

    /// Run `f` against the live state; `None` once not live
    fn with_live<R>(&self, f: impl FnOnce(&mut LiveViewport) -> R) -> Option<R> {
        lock(&self.state).as_mut().map(f)
    }

    fn read<R>(&self, f: impl FnOnce(&LiveViewport) -> R) -> Option<R> {
        lock(&self.state).as_ref().map(f)
    }

    pub fn is_live(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    /// Place an existing visual in the content layer
    ///
    /// With `y` omitted the item is stacked below the current content.
    pub fn add_item(&self, item: NodeId, y: Option<f32>) -> Result<NodeId> {
        self.with_live(|v| v.add_item(item, y))
            .unwrap_or(Err(ViewportError::NotLive))
    }

    /// Create a text visual and stack it below the current content
    ///
    /// Without a style, text wraps to the content width.
    pub fn add_text(&self, text: &str, style: Option<&TextStyle>) -> Result<NodeId> {
        self.with_live(|v| v.add_text(text, style))
            .unwrap_or(Err(ViewportError::NotLive))
    }

    /// Scroll by `delta_y` pixels; positive moves toward the bottom
    pub fn scroll(&self, delta_y: f32) {
        self.with_live(|v| v.scroll(delta_y, Motion::Smooth));
    }

    pub fn scroll_to_bottom(&self) {
        self.with_live(|v| v.scroll(f32::INFINITY, Motion::Smooth));
    }

    pub fn scroll_to_top(&self) {
        self.with_live(|v| v.scroll(f32::NEG_INFINITY, Motion::Smooth));
    }

    /// Resize around the unchanged center, keeping the scroll position where
    /// the new extent allows
    pub fn resize(&self, width: f32, height: f32) {
        self.with_live(|v| v.resize(width, height));
    }

    pub fn set_visible(&self, visible: bool) {
        self.with_live(|v| v.set_visible(visible));
    }

    /// Destroy every item and return to the top
    pub fn clear(&self) {
        self.with_live(LiveViewport::clear);
    }

    /// Tracked items in insertion order. Items destroyed elsewhere are
    /// dropped first.
    pub fn get_items(&self) -> Vec<NodeId> {
        self.with_live(|v| {
            v.sync_items();
            v.track.nodes()
        })
        .unwrap_or_default()
    }

    /// Release input subscriptions, destroy owned visuals and disable the
    /// viewport. Later calls do nothing.
    pub fn destroy(&self) {
        let mut guard = lock(&self.state);
        let Some(live) = guard.as_mut() else {
            return;
        };
        let released = live.release_subscriptions();
        live.destroy_visuals();
        *guard = None;
        tracing::debug!("Viewport destroyed; released {} subscriptions", released);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn position(&self) -> f32 {
        self.with_live(|v| {
            v.sync_items();
            v.scroll.position()
        })
        .unwrap_or(0.0)
    }

    pub fn max_scroll(&self) -> f32 {
        self.with_live(|v| {
            v.sync_items();
            v.scroll.max_scroll()
        })
        .unwrap_or(0.0)
    }

    pub fn content_height(&self) -> f32 {
        self.with_live(|v| {
            v.sync_items();
            v.track.content_height()
        })
        .unwrap_or(0.0)
    }

    pub fn visible_height(&self) -> f32 {
        self.read(|v| v.scroll.visible_height()).unwrap_or(0.0)
    }

    /// Outer bounds in scene coordinates
    pub fn bounds(&self) -> Option<Rect> {
        self.read(LiveViewport::bounds)
    }

    pub fn drag_state(&self) -> DragState {
        self.read(|v| v.router.state()).unwrap_or_default()
    }

    /// Current scrollbar layout, `None` while hidden
    pub fn scrollbar(&self) -> Option<ScrollbarGeometry> {
        self.read(|v| v.scrollbar.geometry()).flatten()
    }

    /// The container all items are parented to
    pub fn content_layer(&self) -> Option<NodeId> {
        self.read(|v| v.track.layer())
    }
}

impl Drop for Viewport {
    fn drop(&mut self) {
        self.destroy();
    }
}
