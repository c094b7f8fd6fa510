//! Per-direction drawer geometry.
//!
//! The four-direction offset and sign logic lives in one lookup table
//! ([`DirectionProfile`]) instead of being repeated at every call site, so
//! each direction's math is testable in isolation.

use sidle_core::{Direction, PanelSize, Viewport};

/// Panel width used when the device is in landscape orientation, regardless
/// of the configured width.
const MAX_WIDTH_ON_LANDSCAPE: f32 = 300.0;

/// Axis a drawer travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Offset formulas and sign conventions for one direction.
#[derive(Clone, Copy, Debug)]
pub struct DirectionProfile {
    /// Offset at which the panel is fully open.
    pub open_offset: f32,
    /// Offset at which the panel sits fully off-screen.
    pub closed_offset: f32,
    /// Axis the offset translates along.
    pub axis: Axis,
    /// Sign applied when converting a drag delta to an offset change.
    pub modifier: f32,
}

/// Resolved geometry for one drawer instance.
///
/// Captured once at construction against the viewport of that moment;
/// orientation changes are handled by an explicit re-resolve, not by
/// continuous observation.
#[derive(Clone, Copy, Debug)]
pub struct DrawerGeometry {
    direction: Direction,
    viewport: Viewport,
    panel_width: f32,
    panel_height: f32,
}

impl DrawerGeometry {
    /// Resolve panel sizes against a viewport.
    pub fn resolve(
        direction: Direction,
        panel_width: PanelSize,
        panel_height: PanelSize,
        viewport: Viewport,
    ) -> Self {
        let panel_width = if viewport.is_landscape() {
            MAX_WIDTH_ON_LANDSCAPE
        } else {
            panel_width.resolve(viewport.width)
        };
        let panel_height = panel_height.resolve(viewport.height);

        Self {
            direction,
            viewport,
            panel_width,
            panel_height,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn panel_width(&self) -> f32 {
        self.panel_width
    }

    pub fn panel_height(&self) -> f32 {
        self.panel_height
    }

    /// Panel extent along the gesture axis. This is also the panel's full
    /// travel distance between its closed and open offsets.
    pub fn panel_dimension(&self) -> f32 {
        if self.direction.is_horizontal() {
            self.panel_width
        } else {
            self.panel_height
        }
    }

    /// The offset table for this drawer's direction.
    ///
    /// Left and top panels sit at negative offsets while closed; right and
    /// bottom panels close to a position past the far screen edge.
    pub fn profile(&self) -> DirectionProfile {
        let Viewport { width: sw, height: sh } = self.viewport;
        let (pw, ph) = (self.panel_width, self.panel_height);

        match self.direction {
            Direction::Left => DirectionProfile {
                open_offset: 0.0,
                closed_offset: -pw,
                axis: Axis::Horizontal,
                modifier: 1.0,
            },
            Direction::Right => DirectionProfile {
                open_offset: sw - pw,
                closed_offset: sw,
                axis: Axis::Horizontal,
                modifier: -1.0,
            },
            Direction::Top => DirectionProfile {
                open_offset: ph - sh,
                closed_offset: -sh,
                axis: Axis::Vertical,
                modifier: 1.0,
            },
            Direction::Bottom => DirectionProfile {
                open_offset: sh - ph,
                closed_offset: sh,
                axis: Axis::Vertical,
                modifier: -1.0,
            },
        }
    }

    pub fn open_offset(&self) -> f32 {
        self.profile().open_offset
    }

    pub fn closed_offset(&self) -> f32 {
        self.profile().closed_offset
    }

    /// Clamp an offset between the open and closed extremes so the panel
    /// never overshoots its configured geometry.
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        let profile = self.profile();
        let lo = profile.open_offset.min(profile.closed_offset);
        let hi = profile.open_offset.max(profile.closed_offset);
        offset.clamp(lo, hi)
    }
}
