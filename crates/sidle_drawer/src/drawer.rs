//! Drawer overlay widget.
//!
//! A full-screen overlay holding a dimmed backdrop and a sized panel that
//! slides in from one screen edge. The panel position and backdrop opacity
//! live in shared value cells driven either by scheduled tweens (open/close
//! animations) or directly by gesture tracking, never both at once.
//!
//! # Lifecycle
//!
//! ```text
//! Initializing --Appear--> Opening --AnimationComplete--> Open
//!                  Opening/Open --Dismiss--> Closing
//!                  Closing --AnimationComplete--> Closed (host removal)
//! ```
//!
//! Dismissal can come from a backdrop tap, a `DismissDrawer` bus event, or a
//! gesture that ends moving toward the closed side. All paths funnel through
//! one guarded close routine; the `is_closing` flag absorbs duplicate
//! requests so the host sees exactly one removal.

use std::sync::{Arc, Mutex};

use sidle_animation::{Easing, SchedulerHandle, ValueCell};
use sidle_core::{
    BusEvent, Direction, EventBus, Subscription, Topic, TouchPoint, Viewport,
};

use crate::config::DrawerConfig;
use crate::geometry::DrawerGeometry;
use crate::host::OverlayHost;

/// Displacement along the gesture axis before the drawer claims a drag.
const DRAG_CLAIM_THRESHOLD: f32 = 5.0;

/// Events driving the drawer state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerEvent {
    /// The host finished presenting the overlay layer.
    Appear,
    /// An open or close tween ran to completion.
    AnimationComplete,
    /// Backdrop tap, dismiss request, or a gesture that resolved toward the
    /// closed side.
    Dismiss,
}

/// State machine for the drawer lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DrawerState {
    /// Constructed but not yet presented.
    #[default]
    Initializing,
    /// Open animation is playing (or an edge swipe is driving the panel in).
    Opening,
    /// Fully interactive; gesture listeners stay active.
    Open,
    /// Close animation is playing.
    Closing,
    /// Terminal. The host has been asked to remove the layer.
    Closed,
}

impl DrawerState {
    pub fn on_event(&self, event: DrawerEvent) -> Option<Self> {
        use DrawerEvent::*;
        use DrawerState::*;

        match (self, event) {
            (Initializing, Appear) => Some(Opening),
            (Opening, AnimationComplete) => Some(Open),
            (Opening, Dismiss) | (Open, Dismiss) => Some(Closing),
            (Closing, AnimationComplete) => Some(Closed),
            _ => None,
        }
    }

    /// Check if the drawer should still be rendered.
    pub fn is_visible(&self) -> bool {
        !matches!(self, DrawerState::Closed)
    }

    /// Check if the drawer is fully open and interactive.
    pub fn is_open(&self) -> bool {
        matches!(self, DrawerState::Open)
    }
}

struct DrawerInner {
    component_id: String,
    config: DrawerConfig,
    geometry: DrawerGeometry,
    state: DrawerState,
    /// Panel position along the direction's axis.
    open_offset: ValueCell,
    /// Backdrop dim, 0.0 to the configured opacity.
    backdrop_opacity: ValueCell,
    /// A swipe gesture is in progress somewhere on screen.
    swiping_started: bool,
    /// An edge swipe (not the open animation) is driving the panel position.
    gesture_driven: bool,
    /// Re-entrancy guard for the close path.
    is_closing: bool,
    /// Touch position recorded at swipe start; drag deltas are relative to it.
    pan_start: TouchPoint,
    anim: SchedulerHandle,
    host: Arc<dyn OverlayHost>,
}

impl DrawerInner {
    fn transition(&mut self, event: DrawerEvent) -> bool {
        if let Some(next) = self.state.on_event(event) {
            tracing::debug!(
                "Drawer `{}`: {:?} --{:?}--> {:?}",
                self.component_id,
                self.state,
                event,
                next
            );
            self.state = next;
            true
        } else {
            false
        }
    }
}

/// The drawer overlay, wrapping host content of type `C`.
pub struct Drawer<C> {
    content: C,
    inner: Arc<Mutex<DrawerInner>>,
    bus: EventBus,
    subscriptions: Vec<Subscription>,
}

impl<C> Drawer<C> {
    /// Wrap `content` in a drawer presentable on an overlay layer.
    ///
    /// Geometry is resolved once against `viewport`; the panel starts at its
    /// closed offset with a clear backdrop. When `animate_on_appear` is
    /// disabled the position is expected to be driven by an in-progress edge
    /// swipe instead of the open animation.
    pub fn create(
        content: C,
        component_id: impl Into<String>,
        config: DrawerConfig,
        viewport: Viewport,
        bus: EventBus,
        anim: SchedulerHandle,
        host: Arc<dyn OverlayHost>,
    ) -> Self {
        let geometry = DrawerGeometry::resolve(
            config.direction,
            config.panel_width,
            config.panel_height,
            viewport,
        );

        let gesture_driven = !config.animate_on_appear;

        let inner = DrawerInner {
            component_id: component_id.into(),
            config,
            geometry,
            state: DrawerState::Initializing,
            open_offset: ValueCell::new(geometry.closed_offset()),
            backdrop_opacity: ValueCell::new(0.0),
            swiping_started: false,
            gesture_driven,
            is_closing: false,
            pan_start: TouchPoint::default(),
            anim,
            host,
        };

        Self {
            content,
            inner: Arc::new(Mutex::new(inner)),
            bus,
            subscriptions: Vec::new(),
        }
    }

    /// Host signal: the overlay layer finished presenting.
    ///
    /// Registers the bus listeners and plays the open animation, unless a
    /// gesture already drove (or is expected to drive) the panel open.
    pub fn on_appear(&mut self) {
        self.register_listeners();

        let should_animate = {
            let mut inner = self.inner.lock().unwrap();
            if !inner.transition(DrawerEvent::Appear) {
                return;
            }
            !inner.swiping_started && inner.config.animate_on_appear
        };

        if should_animate {
            play_open_animation(&self.inner);
        } else {
            // Gesture-driven: interactive right away, position tracks touch.
            self.inner
                .lock()
                .unwrap()
                .transition(DrawerEvent::AnimationComplete);
        }
    }

    /// Host signal: the overlay layer was removed.
    ///
    /// Tears down every bus listener and announces the close so any edge
    /// detector can reset its latch.
    pub fn on_disappear(&mut self) {
        self.subscriptions.clear();
        tracing::debug!(
            "Drawer `{}`: disappeared, listeners removed",
            self.inner.lock().unwrap().component_id
        );
        self.bus.publish(BusEvent::DrawerClosed);
    }

    /// Backdrop tap.
    pub fn touched_outside(&self) {
        let dismiss = self.inner.lock().unwrap().config.dismiss_on_outside_tap;
        if dismiss {
            dismiss_with_animation(&self.inner);
        }
    }

    /// Explicit orientation-change recompute.
    ///
    /// Panel sizes re-resolve against the new viewport. Right/bottom drawers
    /// additionally rewrite their position so an open panel stays flush with
    /// its edge; an in-progress gesture is otherwise left alone.
    pub fn on_viewport_change(&self, width: f32, height: f32) {
        let inner = &mut *self.inner.lock().unwrap();
        inner.geometry = DrawerGeometry::resolve(
            inner.config.direction,
            inner.config.panel_width,
            inner.config.panel_height,
            Viewport::new(width, height),
        );

        if matches!(inner.config.direction, Direction::Right | Direction::Bottom) {
            inner.open_offset.set(inner.geometry.open_offset());
        }
    }

    /// Whether the drawer should claim a drag gesture: displacement along
    /// its travel axis must exceed the claim threshold.
    pub fn should_claim_gesture(&self, dx: f32, dy: f32) -> bool {
        let horizontal = self
            .inner
            .lock()
            .unwrap()
            .config
            .direction
            .is_horizontal();
        if horizontal {
            dx.abs() > DRAG_CLAIM_THRESHOLD
        } else {
            dy.abs() > DRAG_CLAIM_THRESHOLD
        }
    }

    /// Drag began on the drawer's own surface. Published through the same
    /// bus path the edge detector uses, so the tracking logic is identical.
    pub fn on_gesture_start(&self, x: f32, y: f32) {
        self.bus.publish(BusEvent::SwipeStart(TouchPoint::new(x, y)));
    }

    /// Drag moved on the drawer's own surface.
    pub fn on_gesture_move(&self, x: f32, y: f32) {
        let edge = self.inner.lock().unwrap().config.direction;
        self.bus.publish(BusEvent::SwipeMove {
            position: TouchPoint::new(x, y),
            edge,
        });
    }

    /// Drag released on the drawer's own surface.
    pub fn on_gesture_release(&self, velocity_x: f32) {
        let direction = if velocity_x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        self.bus.publish(BusEvent::SwipeEnd { direction });
    }

    pub fn state(&self) -> DrawerState {
        self.inner.lock().unwrap().state
    }

    /// Current panel offset along the travel axis.
    pub fn open_offset(&self) -> f32 {
        self.inner.lock().unwrap().open_offset.get()
    }

    /// Current backdrop opacity.
    pub fn backdrop_opacity(&self) -> f32 {
        self.inner.lock().unwrap().backdrop_opacity.get()
    }

    /// Cell the rendering layer observes for the panel transform.
    pub fn open_offset_cell(&self) -> ValueCell {
        self.inner.lock().unwrap().open_offset.clone()
    }

    /// Cell the rendering layer observes for the backdrop dim.
    pub fn backdrop_opacity_cell(&self) -> ValueCell {
        self.inner.lock().unwrap().backdrop_opacity.clone()
    }

    pub fn geometry(&self) -> DrawerGeometry {
        self.inner.lock().unwrap().geometry
    }

    pub fn component_id(&self) -> String {
        self.inner.lock().unwrap().component_id.clone()
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    fn register_listeners(&mut self) {
        if !self.subscriptions.is_empty() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        self.subscriptions
            .push(self.bus.subscribe(Topic::SwipeStart, move |event| {
                if let BusEvent::SwipeStart(point) = event {
                    handle_swipe_start(&inner, *point);
                }
            }));

        let inner = Arc::clone(&self.inner);
        self.subscriptions
            .push(self.bus.subscribe(Topic::SwipeMove, move |event| {
                if let BusEvent::SwipeMove { position, edge } = event {
                    handle_swipe_move(&inner, *position, *edge);
                }
            }));

        let inner = Arc::clone(&self.inner);
        self.subscriptions
            .push(self.bus.subscribe(Topic::SwipeEnd, move |event| {
                if let BusEvent::SwipeEnd { direction } = event {
                    handle_swipe_end(&inner, *direction);
                }
            }));

        let inner = Arc::clone(&self.inner);
        self.subscriptions
            .push(self.bus.subscribe(Topic::DismissDrawer, move |event| {
                if let BusEvent::DismissDrawer = event {
                    dismiss_with_animation(&inner);
                }
            }));
    }
}

fn handle_swipe_start(inner: &Arc<Mutex<DrawerInner>>, point: TouchPoint) {
    let mut inner = inner.lock().unwrap();
    inner.swiping_started = true;
    inner.pan_start = point;
}

fn handle_swipe_move(inner: &Arc<Mutex<DrawerInner>>, position: TouchPoint, edge: Direction) {
    let inner = &mut *inner.lock().unwrap();

    // Gesture tracking only while opening or open; once the close animation
    // owns the cells, a stray move must not cancel it.
    if !matches!(inner.state, DrawerState::Opening | DrawerState::Open) {
        return;
    }

    let geometry = inner.geometry;
    let fade = inner.config.backdrop_opacity;

    if inner.gesture_driven {
        // An edge swipe is opening the drawer: position tracks the touch
        // itself rather than a delta from the drag origin.
        let panel_width = geometry.panel_width();
        let screen_width = geometry.viewport().width;

        let tracked = match inner.config.direction {
            Direction::Left if position.x < panel_width => Some((
                position.x - panel_width,
                position.x / panel_width,
            )),
            Direction::Right if screen_width - position.x < panel_width => Some((
                position.x,
                (screen_width - position.x) / panel_width,
            )),
            _ => None,
        };

        if let Some((offset, fraction)) = tracked {
            inner.anim.cancel_cell(&inner.open_offset);
            inner.anim.cancel_cell(&inner.backdrop_opacity);
            inner.open_offset.set(geometry.clamp_offset(offset));
            inner
                .backdrop_opacity
                .set((fraction.clamp(0.0, 1.0) * fade).min(fade));
        }
        return;
    }

    if inner.config.disable_dragging {
        return;
    }

    // Signed displacement from the drag origin along the gesture axis, the
    // sign flip for far-edge directions, and the panel dimension on that
    // axis.
    let (delta, modifier, dimension) = match edge {
        Direction::Left => (position.x - inner.pan_start.x, 1.0, geometry.panel_width()),
        Direction::Right => (inner.pan_start.x - position.x, -1.0, geometry.panel_width()),
        Direction::Top => (position.y - inner.pan_start.y, 1.0, geometry.panel_height()),
        Direction::Bottom => (inner.pan_start.y - position.y, -1.0, geometry.panel_height()),
    };

    // Fraction of the travel distance still covered; 1.0 at fully open.
    let open_fraction = ((dimension + delta) / dimension).clamp(0.0, 1.0);

    // Only movement toward the closed side repositions the panel.
    if delta < 0.0 {
        let offset = geometry.open_offset() + delta * modifier;

        inner.anim.cancel_cell(&inner.open_offset);
        inner.anim.cancel_cell(&inner.backdrop_opacity);
        inner.open_offset.set(geometry.clamp_offset(offset));
        inner.backdrop_opacity.set((open_fraction * fade).min(fade));
    }
}

fn handle_swipe_end(inner: &Arc<Mutex<DrawerInner>>, direction: Direction) {
    let settle_open = {
        let inner = &mut *inner.lock().unwrap();
        if !matches!(inner.state, DrawerState::Opening | DrawerState::Open) {
            return;
        }
        if inner.config.disable_swiping && !inner.gesture_driven {
            return;
        }
        inner.gesture_driven = false;

        direction == inner.config.direction.reverse()
    };

    if settle_open {
        // The user continued the opening motion; settle fully open.
        play_open_animation(inner);
    } else {
        dismiss_with_animation(inner);
    }
}

/// Schedule the open tweens for panel offset and backdrop opacity.
///
/// Safe to call while partially open: tweens resume from the cells' current
/// values. The offset tween's completion moves the state machine to Open.
fn play_open_animation(inner: &Arc<Mutex<DrawerInner>>) {
    let (anim, open_offset, backdrop_opacity, open_to, fade_to, duration) = {
        let inner = inner.lock().unwrap();
        (
            inner.anim.clone(),
            inner.open_offset.clone(),
            inner.backdrop_opacity.clone(),
            inner.geometry.open_offset(),
            inner.config.backdrop_opacity,
            inner.config.animation_open_time_ms,
        )
    };

    let completion_inner = Arc::clone(inner);
    anim.animate_with_completion(
        &open_offset,
        open_to,
        duration,
        Easing::default(),
        move || {
            completion_inner
                .lock()
                .unwrap()
                .transition(DrawerEvent::AnimationComplete);
        },
    );
    anim.animate(&backdrop_opacity, fade_to, duration, Easing::default());
}

/// Guarded close path shared by backdrop taps, dismiss requests, and
/// close-direction gesture ends.
///
/// Entering while already closing is a no-op. The close tween's completion
/// re-checks the guard before asking the host to remove the layer, so a
/// stale completion can never issue a duplicate removal.
fn dismiss_with_animation(inner: &Arc<Mutex<DrawerInner>>) {
    let (anim, open_offset, backdrop_opacity, closed_to, duration) = {
        let inner = &mut *inner.lock().unwrap();
        if inner.is_closing {
            tracing::debug!(
                "Drawer `{}`: dismiss ignored, already closing",
                inner.component_id
            );
            return;
        }
        if !inner.transition(DrawerEvent::Dismiss) {
            return;
        }
        inner.is_closing = true;

        (
            inner.anim.clone(),
            inner.open_offset.clone(),
            inner.backdrop_opacity.clone(),
            inner.geometry.closed_offset(),
            inner.config.animation_close_time_ms,
        )
    };

    let completion_inner = Arc::clone(inner);
    anim.animate_with_completion(
        &open_offset,
        closed_to,
        duration,
        Easing::default(),
        move || {
            let (host, component_id) = {
                let inner = &mut *completion_inner.lock().unwrap();
                if !inner.is_closing {
                    return;
                }
                if !inner.transition(DrawerEvent::AnimationComplete) {
                    return;
                }
                inner.is_closing = false;
                (Arc::clone(&inner.host), inner.component_id.clone())
            };

            // Host call happens outside the lock; it may synchronously turn
            // around and drive the disappear path.
            host.dismiss_overlay(&component_id);
        },
    );
    anim.animate(&backdrop_opacity, 0.0, duration, Easing::default());
}
