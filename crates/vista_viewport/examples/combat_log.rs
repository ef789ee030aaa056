//! Combat Log Demo
//!
//! Drives a viewport headlessly through a scene graph host:
//! - Appends wrapped combat messages and follows the newest one
//! - Shows that pressing a button inside the log does not start a drag
//! - Drags the log back up and lets a wheel scroll ease in over frames
//!
//! Run with: cargo run -p vista_viewport --example combat_log

use std::sync::{Arc, Mutex};

use vista_animation::{AnimationScheduler, SharedScheduler};
use vista_core::{
    lock, Color, Event, EventDispatcher, Host, Point, Rect, SceneGraph, SharedDispatcher, SharedHost, Size,
    VisualDesc,
};
use vista_viewport::{HostContext, Result, Viewport, ViewportConfig};

const FRAME: f32 = 1.0 / 60.0;

const ATTACKS: [&str; 4] = [
    "The goblin slashes you for 3 damage.",
    "You strike the goblin with your sword for 7 damage.",
    "The goblin dodges your clumsy swing and cackles at your misfortune.",
    "You raise your shield and brace for the next blow.",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    let scene = Arc::new(Mutex::new(SceneGraph::new()));
    let host: SharedHost = scene.clone();
    let input = EventDispatcher::shared();
    let scheduler = AnimationScheduler::shared();

    let config = ViewportConfig::default()
        .with_border(0xc0a060, 2.0)
        .with_scrollbar(6.0, 0xc0a060, 0.9);
    let log = Viewport::create(
        &HostContext::new(host, input.clone()).with_scheduler(scheduler.clone()),
        Point::new(400.0, 300.0),
        Size::new(360.0, 240.0),
        config,
    );

    let flee = lock(&scene)
        .create_visual(
            VisualDesc::rectangle(Rect::new(0.0, 0.0, 120.0, 32.0), Color::from_hex(0x884422))
                .interactive(),
        )?;
    log.add_item(flee, None)?;

    for turn in 1..=12 {
        let line = ATTACKS[turn % ATTACKS.len()];
        log.add_text(&format!("Turn {turn}: {line}"), None)?;
        log.scroll_to_bottom();
        settle(&scheduler, &scene);
    }
    report(&log, "after twelve turns");

    // Press on the flee button at the top of the log
    log.scroll_to_top();
    settle(&scheduler, &scene);
    send(&input, Event::pointer_down(240.0, 200.0));
    send(&input, Event::pointer_move(240.0, 150.0, true));
    send(&input, Event::pointer_up(240.0, 150.0));
    report(&log, "after pressing the flee button");

    // Drag empty space upward to reveal later turns
    send(&input, Event::pointer_down(520.0, 380.0));
    send(&input, Event::pointer_move(520.0, 300.0, true));
    send(&input, Event::pointer_move(520.0, 250.0, true));
    send(&input, Event::pointer_up_outside(520.0, 250.0));
    report(&log, "after dragging");

    send(&input, Event::wheel(400.0, 300.0, 60.0));
    settle(&scheduler, &scene);
    report(&log, "after a wheel step");

    log.resize(360.0, 400.0);
    report(&log, "after growing");

    log.destroy();
    println!(
        "destroyed: {} subscriptions, {} scene nodes left",
        lock(&input).subscription_count(),
        lock(&scene).node_count()
    );
    Ok(())
}

fn send(input: &SharedDispatcher, event: Event) {
    EventDispatcher::dispatch_shared(input, &event);
}

/// Run frames until smoothing finishes
fn settle(scheduler: &SharedScheduler, scene: &Arc<Mutex<SceneGraph>>) {
    while lock(scheduler).step(FRAME, &mut *lock(scene)) > 0 {}
}

fn report(log: &Viewport, label: &str) {
    let handle = log.scrollbar().map(|geometry| geometry.handle);
    println!(
        "{label}: position {:.1} / {:.1}, {} items, drag {:?}, handle {:?}",
        log.position(),
        log.max_scroll(),
        log.get_items().len(),
        log.drag_state(),
        handle
    );
}
