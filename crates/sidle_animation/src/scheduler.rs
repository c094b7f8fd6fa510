//! Animation scheduler
//!
//! Owns every in-flight tween and advances them once per external tick.
//! Widgets hold a [`SchedulerHandle`] (a weak reference) and schedule tweens
//! against shared [`ValueCell`]s; the rendering layer observes the cells.
//!
//! There is no internal timer thread. The hosting render loop decides the
//! cadence and calls [`AnimationScheduler::tick`] with the frame delta;
//! completion callbacks fire after the scheduler's lock is released, so a
//! completion may schedule follow-up animations.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::tween::Tween;

new_key_type! {
    /// Handle to a scheduled tween.
    pub struct TweenId;
}

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// Shared scalar state cell.
///
/// A plain numeric value the rendering layer reads each frame. Cells are
/// written either by a scheduled tween or directly (gesture tracking); the
/// scheduler guarantees at most one tween drives a cell at a time.
///
/// Cloning is cheap; clones share the same storage.
#[derive(Clone, Debug)]
pub struct ValueCell {
    id: u64,
    bits: Arc<AtomicU32>,
}

impl ValueCell {
    pub fn new(initial: f32) -> Self {
        Self {
            id: NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed),
            bits: Arc::new(AtomicU32::new(initial.to_bits())),
        }
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Identity of the cell's storage, stable across clones.
    pub fn id(&self) -> u64 {
        self.id
    }
}

type CompletionCallback = Box<dyn FnOnce() + Send>;

struct ScheduledTween {
    tween: Tween,
    cell: ValueCell,
    on_complete: Option<CompletionCallback>,
}

struct SchedulerInner {
    tweens: SlotMap<TweenId, ScheduledTween>,
    /// Cell id -> the tween currently driving it.
    by_cell: FxHashMap<u64, TweenId>,
}

impl SchedulerInner {
    /// Remove whichever tween currently drives `cell_id`, dropping its
    /// completion callback unexecuted.
    fn evict_cell(&mut self, cell_id: u64) {
        if let Some(prev) = self.by_cell.remove(&cell_id) {
            self.tweens.remove(prev);
            tracing::trace!("AnimationScheduler: superseded tween on cell {}", cell_id);
        }
    }
}

/// The scheduler that advances all active tweens.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                by_cell: FxHashMap::default(),
            })),
        }
    }

    /// Get a weak handle for passing to widgets.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance every tween by a frame delta and write the driven cells.
    ///
    /// Returns `true` while any tween is still playing. Completion callbacks
    /// for tweens that finished this tick run after the internal lock is
    /// released, in no particular order relative to each other.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let mut completions: Vec<CompletionCallback> = Vec::new();

        let still_active = {
            let mut inner = self.inner.lock().unwrap();

            let mut finished = Vec::new();
            for (id, entry) in inner.tweens.iter_mut() {
                entry.tween.tick(dt_ms);
                entry.cell.set(entry.tween.value());
                if !entry.tween.is_playing() {
                    finished.push(id);
                }
            }

            for id in finished {
                if let Some(entry) = inner.tweens.remove(id) {
                    let cell_id = entry.cell.id();
                    if inner.by_cell.get(&cell_id) == Some(&id) {
                        inner.by_cell.remove(&cell_id);
                    }
                    if let Some(cb) = entry.on_complete {
                        completions.push(cb);
                    }
                }
            }

            !inner.tweens.is_empty()
        };

        for cb in completions {
            cb();
        }

        still_active
    }

    /// Number of scheduled tweens.
    pub fn tween_count(&self) -> usize {
        self.inner.lock().unwrap().tweens.len()
    }

    /// Check if any tween is still in flight.
    pub fn has_active_animations(&self) -> bool {
        !self.inner.lock().unwrap().tweens.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler.
///
/// Passed to widgets that schedule animations. Operations no-op (returning
/// `None` where a value is expected) once the scheduler is dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Schedule a tween from the cell's current value to `to`.
    ///
    /// Any tween already driving this cell is cancelled first; its completion
    /// callback never fires. Starting from the current value lets an
    /// animation resume from wherever a gesture left the cell.
    pub fn animate(
        &self,
        cell: &ValueCell,
        to: f32,
        duration_ms: u32,
        easing: Easing,
    ) -> Option<TweenId> {
        self.schedule(cell, to, duration_ms, easing, None)
    }

    /// Like [`animate`](Self::animate), with a callback invoked when the
    /// tween runs to completion (not when superseded or cancelled).
    pub fn animate_with_completion<F>(
        &self,
        cell: &ValueCell,
        to: f32,
        duration_ms: u32,
        easing: Easing,
        on_complete: F,
    ) -> Option<TweenId>
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule(cell, to, duration_ms, easing, Some(Box::new(on_complete)))
    }

    fn schedule(
        &self,
        cell: &ValueCell,
        to: f32,
        duration_ms: u32,
        easing: Easing,
        on_complete: Option<CompletionCallback>,
    ) -> Option<TweenId> {
        let inner = self.inner.upgrade()?;
        let mut inner = inner.lock().unwrap();

        inner.evict_cell(cell.id());

        let mut tween = Tween::new(cell.get(), to, duration_ms, easing);
        tween.start();

        tracing::debug!(
            "AnimationScheduler: animate cell {} -> {} over {}ms",
            cell.id(),
            to,
            duration_ms
        );

        let id = inner.tweens.insert(ScheduledTween {
            tween,
            cell: cell.clone(),
            on_complete,
        });
        inner.by_cell.insert(cell.id(), id);
        Some(id)
    }

    /// Cancel a tween by id. The cell keeps its last written value and the
    /// completion callback is dropped.
    pub fn cancel(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap();
            if let Some(entry) = inner.tweens.remove(id) {
                let cell_id = entry.cell.id();
                if inner.by_cell.get(&cell_id) == Some(&id) {
                    inner.by_cell.remove(&cell_id);
                }
            }
        }
    }

    /// Cancel whichever tween currently drives `cell`.
    ///
    /// Used when gesture tracking takes over a cell: live touch deltas and a
    /// scheduled animation must never write the same cell concurrently.
    pub fn cancel_cell(&self, cell: &ValueCell) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().evict_cell(cell.id());
        }
    }

    /// Whether a tween is currently driving `cell`.
    pub fn is_animating_cell(&self, cell: &ValueCell) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().by_cell.contains_key(&cell.id()))
            .unwrap_or(false)
    }

    /// Check if the scheduler is still alive.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_tick_writes_cell() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let cell = ValueCell::new(0.0);

        handle.animate(&cell, 100.0, 1000, Easing::Linear);

        scheduler.tick(500.0);
        assert!((cell.get() - 50.0).abs() < 1e-4);

        scheduler.tick(500.0);
        assert_eq!(cell.get(), 100.0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_completion_fires_once() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let cell = ValueCell::new(0.0);
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = Arc::clone(&fired);
        handle.animate_with_completion(&cell, 1.0, 300, Easing::Linear, move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.tick(300.0);
        scheduler.tick(300.0);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_last_writer_wins() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let cell = ValueCell::new(0.0);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_clone = Arc::clone(&first);
        handle.animate_with_completion(&cell, 100.0, 300, Easing::Linear, move || {
            first_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Supersede before the first tween ever ticks.
        let second_clone = Arc::clone(&second);
        handle.animate_with_completion(&cell, -50.0, 300, Easing::Linear, move || {
            second_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(scheduler.tween_count(), 1);
        scheduler.tick(300.0);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(cell.get(), -50.0);
    }

    #[test]
    fn test_cancel_cell_stops_writes() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let cell = ValueCell::new(0.0);

        handle.animate(&cell, 100.0, 1000, Easing::Linear);
        scheduler.tick(100.0);
        let mid = cell.get();
        assert!(mid > 0.0);

        handle.cancel_cell(&cell);
        assert!(!handle.is_animating_cell(&cell));

        // Gesture takeover: direct writes stick.
        cell.set(-42.0);
        scheduler.tick(100.0);
        assert_eq!(cell.get(), -42.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let cell = ValueCell::new(5.0);
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = Arc::clone(&fired);
        handle.animate_with_completion(&cell, 9.0, 0, Easing::Linear, move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.tick(0.0);
        assert_eq!(cell.get(), 9.0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());

        let cell = ValueCell::new(0.0);
        assert!(handle.animate(&cell, 1.0, 100, Easing::Linear).is_none());
    }

    #[test]
    fn test_completion_may_schedule_follow_up() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let cell = ValueCell::new(0.0);

        let follow_up = handle.clone();
        let follow_cell = cell.clone();
        handle.animate_with_completion(&cell, 1.0, 100, Easing::Linear, move || {
            follow_up.animate(&follow_cell, 2.0, 100, Easing::Linear);
        });

        scheduler.tick(100.0);
        assert!(scheduler.has_active_animations());

        scheduler.tick(100.0);
        assert_eq!(cell.get(), 2.0);
    }
}
