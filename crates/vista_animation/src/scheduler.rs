//! Animation scheduler
//!
//! Owns active tweens, each bound to a host node whose vertical offset it
//! drives. The embedder ticks the scheduler once per frame.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use vista_core::{Host, NodeId, Point};

use crate::tween::Tween;

new_key_type! {
    pub struct TweenId;
}

struct NodeTween {
    node: NodeId,
    tween: Tween,
}

/// The animation scheduler that ticks all active tweens
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, NodeTween>,
    last_frame: Instant,
}

/// Scheduler shared between widgets and the frame loop
pub type SharedScheduler = Arc<Mutex<AnimationScheduler>>;

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn shared() -> SharedScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Start driving `node`'s y offset with `tween`
    pub fn add_tween(&mut self, node: NodeId, tween: Tween) -> TweenId {
        self.tweens.insert(NodeTween { node, tween })
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id).map(|t| &t.tween)
    }

    /// Cancel a tween, leaving its node where it is. Returns false if it had
    /// already finished or been cancelled.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(id).is_some()
    }

    /// Tick all tweens using wall-clock time since the previous tick
    pub fn tick(&mut self, host: &mut dyn Host) -> usize {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step(dt, host)
    }

    /// Advance all tweens by `dt` seconds and write their values to the host.
    /// Finished tweens and tweens whose node is gone are dropped. Returns the
    /// number still running.
    pub fn step(&mut self, dt: f32, host: &mut dyn Host) -> usize {
        self.tweens.retain(|_, entry| {
            if !host.is_alive(entry.node) {
                return false;
            }
            entry.tween.step(dt);
            let x = host.position(entry.node).map_or(0.0, |p| p.x);
            host.set_position(entry.node, Point::new(x, entry.tween.value()));
            !entry.tween.is_finished()
        });
        self.tweens.len()
    }

    /// Check if any tweens are still running
    pub fn has_active_animations(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use vista_core::{SceneGraph, VisualDesc};

    #[test]
    fn test_step_moves_node_and_drops_finished() {
        let mut scene = SceneGraph::new();
        let node = scene
            .create_visual(VisualDesc::container(Point::new(5.0, 0.0)))
            .unwrap();

        let mut scheduler = AnimationScheduler::new();
        scheduler.add_tween(node, Tween::new(0.0, -100.0, 0.2).with_easing(Easing::Linear));

        assert_eq!(scheduler.step(0.1, &mut scene), 1);
        let mid = scene.position(node).unwrap();
        assert_eq!(mid.x, 5.0);
        assert!((mid.y + 50.0).abs() < 0.01);

        assert_eq!(scheduler.step(0.1, &mut scene), 0);
        assert_eq!(scene.position(node), Some(Point::new(5.0, -100.0)));
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_cancel_and_dead_nodes() {
        let mut scene = SceneGraph::new();
        let node = scene.create_visual(VisualDesc::container(Point::ZERO)).unwrap();

        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add_tween(node, Tween::new(0.0, 10.0, 1.0));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.add_tween(node, Tween::new(0.0, 10.0, 1.0));
        scene.destroy(node);
        assert_eq!(scheduler.step(0.1, &mut scene), 0);
    }
}
