//! Geometry primitives shared by the drawer overlay and the swipe detector.

use std::str::FromStr;

use thiserror::Error;

/// Captured screen dimensions in logical pixels.
///
/// Orientation changes are delivered as an explicit new viewport rather than
/// observed continuously; widgets capture a viewport once at construction and
/// recompute on demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Landscape means the screen is at least as wide as it is tall.
    pub fn is_landscape(&self) -> bool {
        self.height <= self.width
    }
}

/// Axis-aligned rectangle in screen coordinates. Used for edge hit regions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Panel extent along one axis: absolute pixels or a percentage of the
/// screen dimension on that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelSize {
    Absolute(f32),
    Percent(f32),
}

impl PanelSize {
    /// The full screen dimension.
    pub const FULL: PanelSize = PanelSize::Percent(100.0);

    /// Resolve against the screen dimension on the same axis.
    pub fn resolve(self, max: f32) -> f32 {
        match self {
            PanelSize::Absolute(px) => px,
            PanelSize::Percent(pct) => max * (pct / 100.0),
        }
    }

    /// Parse a size string, treating malformed input as the full dimension.
    pub fn parse_or_full(s: &str) -> Self {
        s.parse().unwrap_or(PanelSize::FULL)
    }
}

impl From<f32> for PanelSize {
    fn from(px: f32) -> Self {
        PanelSize::Absolute(px)
    }
}

/// Failure to parse a [`PanelSize`] from a string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelSizeParseError {
    #[error("empty size string")]
    Empty,
    #[error("invalid size `{0}`")]
    Invalid(String),
}

impl FromStr for PanelSize {
    type Err = PanelSizeParseError;

    /// Accepts `"80%"` (percentage of the screen) or `"320"` (absolute
    /// pixels).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PanelSizeParseError::Empty);
        }

        if let Some(pct) = trimmed.strip_suffix('%') {
            return pct
                .trim()
                .parse::<f32>()
                .map(PanelSize::Percent)
                .map_err(|_| PanelSizeParseError::Invalid(s.to_string()));
        }

        trimmed
            .parse::<f32>()
            .map(PanelSize::Absolute)
            .map_err(|_| PanelSizeParseError::Invalid(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_percent() {
        assert_eq!(PanelSize::Percent(80.0).resolve(400.0), 320.0);
        assert_eq!(PanelSize::Percent(100.0).resolve(812.0), 812.0);
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(PanelSize::Absolute(320.0).resolve(400.0), 320.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("80%".parse(), Ok(PanelSize::Percent(80.0)));
        assert_eq!("320".parse(), Ok(PanelSize::Absolute(320.0)));
        assert_eq!(" 55.5% ".parse(), Ok(PanelSize::Percent(55.5)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "".parse::<PanelSize>(),
            Err(PanelSizeParseError::Empty)
        );
        assert!(matches!(
            "wide%".parse::<PanelSize>(),
            Err(PanelSizeParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_falls_back_to_full() {
        assert_eq!(PanelSize::parse_or_full("garbage"), PanelSize::FULL);
        assert_eq!(PanelSize::parse_or_full("garbage").resolve(400.0), 400.0);
    }

    #[test]
    fn test_rect_contains() {
        let region = Rect::new(0.0, 0.0, 15.0, 812.0);
        assert!(region.contains(0.0, 100.0));
        assert!(region.contains(14.9, 0.0));
        assert!(!region.contains(15.0, 100.0));
        assert!(!region.contains(-1.0, 100.0));
    }

    #[test]
    fn test_landscape() {
        assert!(Viewport::new(800.0, 400.0).is_landscape());
        assert!(!Viewport::new(400.0, 800.0).is_landscape());
    }
}
