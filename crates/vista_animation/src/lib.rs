//! Vista Animation System
//!
//! Short fire-and-forget tweens used to smooth widget offsets.
//!
//! # Features
//!
//! - **Tweens**: fixed-duration interpolation with easing
//! - **Scheduler**: binds tweens to host nodes and applies them each frame
//! - **Supersedable**: cancelling a tween leaves the node where it is, so a
//!   new tween can start from the current offset

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SharedScheduler, TweenId};
pub use tween::Tween;
