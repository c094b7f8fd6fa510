//! Sidle Drawer
//!
//! An animated edge-drawer overlay and its companion edge-swipe detector.
//!
//! Two cooperating widgets, connected only through the event bus:
//!
//! - [`Drawer`] owns a full-screen overlay with a dimmed backdrop and a
//!   sized panel, animating it in from one of the four screen edges and
//!   live-tracking in-progress swipe gestures.
//! - [`SideMenuView`] owns thin hit regions at the screen edges, converts
//!   raw touches into swipe events, and fires an open callback once a
//!   gesture's velocity commits.
//!
//! The hosting navigation system presents and removes the overlay layer
//! through the [`OverlayHost`] trait; [`show_drawer`] and [`dismiss_drawer`]
//! are the imperative surface it calls.
//!
//! # Example
//!
//! ```ignore
//! use sidle_drawer::{show_drawer, DrawerConfig, DrawerDescriptor};
//!
//! show_drawer(
//!     &host,
//!     DrawerDescriptor::new("menu-drawer", "root")
//!         .config(DrawerConfig::default().panel_width(320.0)),
//! );
//! ```

pub mod config;
pub mod drawer;
pub mod geometry;
pub mod host;
pub mod side_menu;

pub use config::DrawerConfig;
pub use drawer::{Drawer, DrawerEvent, DrawerState};
pub use geometry::{Axis, DirectionProfile, DrawerGeometry};
pub use host::{
    dismiss_drawer, show_drawer, DrawerDescriptor, LayerBackground, OverlayHost, OverlayLayer,
};
pub use side_menu::{EdgeCallback, SideMenuConfig, SideMenuView};
