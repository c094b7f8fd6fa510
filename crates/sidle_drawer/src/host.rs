//! Integration surface toward the hosting navigation system.
//!
//! The overlay presentation system is an external collaborator: it knows how
//! to show and remove full-screen layers by component id. The drawer only
//! ever talks to it through [`OverlayHost`].

use sidle_core::{BusEvent, EventBus};

use crate::config::DrawerConfig;

/// Background fill of the host layer a drawer is presented on.
///
/// Defaults to transparent: the drawer's own backdrop provides the dimming,
/// and the screen underneath stays visible through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerBackground {
    #[default]
    Transparent,
    Opaque,
}

/// A full-screen layer the overlay presentation system is asked to show.
#[derive(Clone, Debug)]
pub struct OverlayLayer {
    /// Identifier the host uses to remove the layer later.
    pub component_id: String,
    /// Component the drawer is presented over; screens pushed from inside
    /// the drawer target this id.
    pub parent_id: String,
    pub background: LayerBackground,
    pub config: DrawerConfig,
}

/// External overlay presentation system.
pub trait OverlayHost: Send + Sync {
    /// Present a full-screen layer.
    fn show_overlay(&self, layer: OverlayLayer);
    /// Remove a previously presented layer.
    fn dismiss_overlay(&self, component_id: &str);
}

/// Descriptor accepted by [`show_drawer`].
#[derive(Clone, Debug)]
pub struct DrawerDescriptor {
    pub component_id: String,
    pub parent_id: String,
    pub config: DrawerConfig,
    /// Explicit layer background; left unset, the layer is transparent.
    pub background: Option<LayerBackground>,
}

impl DrawerDescriptor {
    pub fn new(component_id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            parent_id: parent_id.into(),
            config: DrawerConfig::default(),
            background: None,
        }
    }

    /// Set the drawer configuration
    pub fn config(mut self, config: DrawerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set an explicit layer background
    pub fn background(mut self, background: LayerBackground) -> Self {
        self.background = Some(background);
        self
    }
}

/// Ask the host to present a drawer layer.
pub fn show_drawer(host: &dyn OverlayHost, descriptor: DrawerDescriptor) {
    let layer = OverlayLayer {
        component_id: descriptor.component_id,
        parent_id: descriptor.parent_id,
        background: descriptor.background.unwrap_or_default(),
        config: descriptor.config,
    };

    tracing::debug!(
        "show_drawer: presenting `{}` over `{}`",
        layer.component_id,
        layer.parent_id
    );

    host.show_overlay(layer);
}

/// Request dismissal of whichever drawer instance is currently listening on
/// `bus`. Fire-and-forget; carries no target id.
pub fn dismiss_drawer(bus: &EventBus) {
    bus.publish(BusEvent::DismissDrawer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidle_core::Topic;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        shown: Mutex<Vec<OverlayLayer>>,
    }

    impl OverlayHost for RecordingHost {
        fn show_overlay(&self, layer: OverlayLayer) {
            self.shown.lock().unwrap().push(layer);
        }

        fn dismiss_overlay(&self, _component_id: &str) {}
    }

    #[test]
    fn test_background_defaults_to_transparent() {
        let host = RecordingHost::default();

        show_drawer(&host, DrawerDescriptor::new("drawer", "root"));

        let shown = host.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].background, LayerBackground::Transparent);
        assert_eq!(shown[0].component_id, "drawer");
        assert_eq!(shown[0].parent_id, "root");
    }

    #[test]
    fn test_explicit_background_preserved() {
        let host = RecordingHost::default();

        show_drawer(
            &host,
            DrawerDescriptor::new("drawer", "root").background(LayerBackground::Opaque),
        );

        let shown = host.shown.lock().unwrap();
        assert_eq!(shown[0].background, LayerBackground::Opaque);
    }

    #[test]
    fn test_dismiss_publishes_request() {
        let bus = EventBus::new();
        let received = std::sync::Arc::new(Mutex::new(0usize));

        let received_clone = std::sync::Arc::clone(&received);
        let _sub = bus.subscribe(Topic::DismissDrawer, move |event| {
            assert!(matches!(event, BusEvent::DismissDrawer));
            *received_clone.lock().unwrap() += 1;
        });

        dismiss_drawer(&bus);
        assert_eq!(*received.lock().unwrap(), 1);
    }
}
