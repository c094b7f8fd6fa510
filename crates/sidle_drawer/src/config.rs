//! Drawer configuration.

use sidle_core::{Direction, PanelSize};

/// Behavior of one drawer instance. Immutable once the drawer is created.
#[derive(Clone, Debug)]
pub struct DrawerConfig {
    /// Screen edge the panel emerges from.
    pub direction: Direction,
    /// Open animation duration in milliseconds.
    pub animation_open_time_ms: u32,
    /// Close animation duration in milliseconds.
    pub animation_close_time_ms: u32,
    /// Whether tapping the backdrop dismisses the drawer.
    pub dismiss_on_outside_tap: bool,
    /// Fully-open opacity of the dimmed backdrop (0.0 to 1.0).
    pub backdrop_opacity: f32,
    /// Panel extent across the screen width.
    pub panel_width: PanelSize,
    /// Panel extent across the screen height.
    pub panel_height: PanelSize,
    /// Ignore drag tracking while the drawer is open.
    pub disable_dragging: bool,
    /// Ignore swipe-release handling (except for edge-swipe opens).
    pub disable_swiping: bool,
    /// Play the open animation when the drawer appears. Disable when an
    /// edge swipe is expected to drive the panel open instead.
    pub animate_on_appear: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Left,
            animation_open_time_ms: 300,
            animation_close_time_ms: 300,
            dismiss_on_outside_tap: true,
            backdrop_opacity: 0.6,
            panel_width: PanelSize::Percent(80.0),
            panel_height: PanelSize::Percent(100.0),
            disable_dragging: false,
            disable_swiping: false,
            animate_on_appear: true,
        }
    }
}

impl DrawerConfig {
    /// Set the opening direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the panel width
    pub fn panel_width(mut self, width: impl Into<PanelSize>) -> Self {
        self.panel_width = width.into();
        self
    }

    /// Set the panel height
    pub fn panel_height(mut self, height: impl Into<PanelSize>) -> Self {
        self.panel_height = height.into();
        self
    }

    /// Set the fully-open backdrop opacity
    pub fn backdrop_opacity(mut self, opacity: f32) -> Self {
        self.backdrop_opacity = opacity;
        self
    }

    /// Set whether a backdrop tap dismisses the drawer
    pub fn dismiss_on_outside_tap(mut self, dismiss: bool) -> Self {
        self.dismiss_on_outside_tap = dismiss;
        self
    }

    /// Set both animation durations at once
    pub fn animation_time_ms(mut self, open: u32, close: u32) -> Self {
        self.animation_open_time_ms = open;
        self.animation_close_time_ms = close;
        self
    }

    /// Disable drag tracking of the open panel
    pub fn disable_dragging(mut self, disable: bool) -> Self {
        self.disable_dragging = disable;
        self
    }

    /// Disable swipe-release handling
    pub fn disable_swiping(mut self, disable: bool) -> Self {
        self.disable_swiping = disable;
        self
    }

    /// Set whether the open animation plays on appear
    pub fn animate_on_appear(mut self, animate: bool) -> Self {
        self.animate_on_appear = animate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DrawerConfig::default();

        assert_eq!(config.direction, Direction::Left);
        assert_eq!(config.animation_open_time_ms, 300);
        assert_eq!(config.animation_close_time_ms, 300);
        assert!(config.dismiss_on_outside_tap);
        assert_eq!(config.backdrop_opacity, 0.6);
        assert_eq!(config.panel_width, PanelSize::Percent(80.0));
        assert_eq!(config.panel_height, PanelSize::Percent(100.0));
        assert!(!config.disable_dragging);
        assert!(!config.disable_swiping);
        assert!(config.animate_on_appear);
    }

    #[test]
    fn test_builder_setters() {
        let config = DrawerConfig::default()
            .direction(Direction::Right)
            .panel_width(320.0)
            .backdrop_opacity(0.4)
            .animate_on_appear(false);

        assert_eq!(config.direction, Direction::Right);
        assert_eq!(config.panel_width, PanelSize::Absolute(320.0));
        assert_eq!(config.backdrop_opacity, 0.4);
        assert!(!config.animate_on_appear);
    }
}
