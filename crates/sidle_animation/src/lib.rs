//! Sidle Animation Engine
//!
//! Timed tweens driving shared scalar cells.
//!
//! # Features
//!
//! - **Tweens**: two-endpoint timed interpolation with easing functions
//! - **Value Cells**: shared numeric state a rendered transform observes,
//!   decoupled from how the value converges
//! - **Scheduler**: ticks every registered tween once per frame, writes the
//!   cells, and fires completion callbacks
//! - **Last Writer Wins**: scheduling a tween on a cell cancels the prior
//!   in-flight tween on that cell; superseded completions never fire
//! - **Externally Driven**: no internal timer; the hosting render loop calls
//!   [`AnimationScheduler::tick`]

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SchedulerHandle, TweenId, ValueCell};
pub use tween::Tween;
