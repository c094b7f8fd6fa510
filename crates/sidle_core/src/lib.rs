//! Sidle Core
//!
//! Foundational primitives shared by the drawer overlay and the edge-swipe
//! detector:
//!
//! - **Event Bus**: named-topic publish/subscribe registry for cross-widget
//!   signaling without direct references
//! - **Events**: swipe lifecycle and drawer lifecycle payloads
//! - **Geometry**: viewport, hit rectangles, and panel sizing
//!
//! # Example
//!
//! ```rust
//! use sidle_core::{BusEvent, EventBus, Topic};
//!
//! let bus = EventBus::new();
//! let sub = bus.subscribe(Topic::DismissDrawer, |event| {
//!     assert!(matches!(event, BusEvent::DismissDrawer));
//! });
//!
//! bus.publish(BusEvent::DismissDrawer);
//! sub.unsubscribe();
//! ```

pub mod bus;
pub mod events;
pub mod geometry;

pub use bus::{BusCallback, EventBus, Subscription};
pub use events::{BusEvent, Direction, Topic, TouchPoint};
pub use geometry::{PanelSize, PanelSizeParseError, Rect, Viewport};
