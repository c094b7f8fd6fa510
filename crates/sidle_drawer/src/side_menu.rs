//! Swipeable container that opens a drawer from a screen edge.
//!
//! Owns two thin hit regions at the left/right screen edges. Raw touch
//! deltas from the platform gesture recognizer are converted into bus events
//! (`SwipeStart`, `SwipeMove`, `SwipeEnd`) for any interested drawer, and a
//! host-supplied callback fires once the gesture's horizontal velocity
//! crosses the sensitivity threshold away from the edge.
//!
//! The view never calls into a drawer directly. Its "opened" latch resets
//! only when a `DrawerClosed` event arrives on the bus.

use std::sync::{Arc, Mutex};

use sidle_core::{BusEvent, Direction, EventBus, Rect, Subscription, Topic, TouchPoint, Viewport};

/// Callback invoked when an edge swipe commits.
pub type EdgeCallback = Arc<dyn Fn() + Send + Sync>;

/// Edge-region and commit-threshold configuration.
#[derive(Clone, Copy, Debug)]
pub struct SideMenuConfig {
    /// Width in pixels reserved at each screen edge for gesture capture.
    pub side_margin: f32,
    /// Per-side override for the left region.
    pub side_margin_left: Option<f32>,
    /// Per-side override for the right region.
    pub side_margin_right: Option<f32>,
    /// Minimum horizontal velocity, away from the edge, for a swipe to
    /// commit and fire the callback.
    pub swipe_sensitivity: f32,
}

impl Default for SideMenuConfig {
    fn default() -> Self {
        Self {
            side_margin: 15.0,
            side_margin_left: None,
            side_margin_right: None,
            swipe_sensitivity: 0.2,
        }
    }
}

struct SideMenuState {
    /// Latched once a swipe has opened a drawer; cleared on `DrawerClosed`.
    opened: bool,
    /// Edge that owns the in-progress gesture. Only one side may own the
    /// move stream at a time.
    active_edge: Option<Direction>,
}

/// Container view detecting drawer-opening edge swipes.
pub struct SideMenuView {
    bus: EventBus,
    config: SideMenuConfig,
    viewport: Viewport,
    left: Option<EdgeCallback>,
    right: Option<EdgeCallback>,
    state: Arc<Mutex<SideMenuState>>,
    /// Held for its teardown-on-drop side effect.
    _drawer_closed: Subscription,
}

impl SideMenuView {
    pub fn new(bus: EventBus, viewport: Viewport, config: SideMenuConfig) -> Self {
        let state = Arc::new(Mutex::new(SideMenuState {
            opened: false,
            active_edge: None,
        }));

        let state_clone = Arc::clone(&state);
        let drawer_closed = bus.subscribe(Topic::DrawerClosed, move |_| {
            state_clone.lock().unwrap().opened = false;
        });

        Self {
            bus,
            config,
            viewport,
            left: None,
            right: None,
            state,
            _drawer_closed: drawer_closed,
        }
    }

    /// Activate the left edge region with an open callback.
    pub fn on_left_edge<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.left = Some(Arc::new(callback));
        self
    }

    /// Activate the right edge region with an open callback.
    pub fn on_right_edge<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.right = Some(Arc::new(callback));
        self
    }

    fn left_margin(&self) -> f32 {
        self.config.side_margin_left.unwrap_or(self.config.side_margin)
    }

    fn right_margin(&self) -> f32 {
        self.config
            .side_margin_right
            .unwrap_or(self.config.side_margin)
    }

    /// Hit region at the left edge; `None` while no callback is registered.
    pub fn left_region(&self) -> Option<Rect> {
        self.left.as_ref()?;
        Some(Rect::new(0.0, 0.0, self.left_margin(), self.viewport.height))
    }

    /// Hit region at the right edge; `None` while no callback is registered.
    pub fn right_region(&self) -> Option<Rect> {
        self.right.as_ref()?;
        let margin = self.right_margin();
        Some(Rect::new(
            self.viewport.width - margin,
            0.0,
            margin,
            self.viewport.height,
        ))
    }

    /// Whether a committed swipe is still holding the latch.
    pub fn is_opened(&self) -> bool {
        self.state.lock().unwrap().opened
    }

    /// Feed a touch-down from the platform recognizer.
    ///
    /// Publishes `SwipeStart` when the touch lands in an active edge region;
    /// that edge then owns the gesture until release.
    pub fn on_touch_start(&self, x: f32, y: f32) {
        let edge = if self.left_region().is_some_and(|r| r.contains(x, y)) {
            Direction::Left
        } else if self.right_region().is_some_and(|r| r.contains(x, y)) {
            Direction::Right
        } else {
            return;
        };

        tracing::trace!("SideMenuView: gesture start at {:?} edge", edge);
        self.state.lock().unwrap().active_edge = Some(edge);
        self.bus.publish(BusEvent::SwipeStart(TouchPoint::new(x, y)));
    }

    /// Feed a touch move with the recognizer's current horizontal velocity.
    ///
    /// Publishes a `SwipeMove` for the owning edge and, when the velocity
    /// exceeds the sensitivity threshold away from that edge, commits the
    /// swipe: the latch is set and the callback fires exactly once per open
    /// cycle.
    pub fn on_touch_move(&self, x: f32, y: f32, velocity_x: f32) {
        let edge = { self.state.lock().unwrap().active_edge };
        let Some(edge) = edge else { return };

        self.bus.publish(BusEvent::SwipeMove {
            position: TouchPoint::new(x, y),
            edge,
        });

        let sensitivity = self.config.swipe_sensitivity;
        let committing = match edge {
            Direction::Left => velocity_x > sensitivity,
            Direction::Right => velocity_x < -sensitivity,
            _ => false,
        };
        if !committing {
            return;
        }

        // Latch under the lock, invoke outside it.
        let callback = {
            let mut state = self.state.lock().unwrap();
            if state.opened {
                None
            } else {
                state.opened = true;
                match edge {
                    Direction::Left => self.left.clone(),
                    Direction::Right => self.right.clone(),
                    _ => None,
                }
            }
        };

        if let Some(callback) = callback {
            tracing::debug!("SideMenuView: {:?} edge swipe committed", edge);
            callback();
        }
    }

    /// Feed the touch release.
    ///
    /// Publishes `SwipeEnd` with the direction resolved from the sign of the
    /// final horizontal velocity, then releases edge ownership.
    pub fn on_touch_release(&self, velocity_x: f32) {
        let owned = { self.state.lock().unwrap().active_edge.take() };
        if owned.is_none() {
            return;
        }

        let direction = if velocity_x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        self.bus.publish(BusEvent::SwipeEnd { direction });
    }
}
