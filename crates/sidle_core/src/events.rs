//! Swipe and drawer lifecycle events carried over the event bus.

/// Screen edge a drawer emerges from; also the resolved direction of a swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    /// The opposite edge.
    ///
    /// A gesture that resolves to the reverse of a drawer's opening direction
    /// means the user continued the opening motion, so the drawer should
    /// settle open rather than close.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Whether this direction moves the panel along the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Left
    }
}

/// Absolute touch position reported by the platform gesture recognizer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bus topics subscribers register for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// A drag began inside an active edge region or on a drawer panel.
    SwipeStart,
    /// Live position update for the in-progress drag.
    SwipeMove,
    /// The drag ended.
    SwipeEnd,
    /// Programmatic request to close whichever drawer is listening.
    DismissDrawer,
    /// A drawer finished closing and was removed from its host.
    DrawerClosed,
}

/// Event payloads published on the bus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusEvent {
    SwipeStart(TouchPoint),
    SwipeMove {
        /// Current absolute touch position.
        position: TouchPoint,
        /// Edge the gesture originated from. Only one edge owns the move
        /// stream for the lifetime of a single gesture.
        edge: Direction,
    },
    SwipeEnd {
        /// Resolved from the sign of the final horizontal velocity.
        direction: Direction,
    },
    DismissDrawer,
    DrawerClosed,
}

impl BusEvent {
    /// The topic this event is delivered on.
    pub fn topic(&self) -> Topic {
        match self {
            BusEvent::SwipeStart(_) => Topic::SwipeStart,
            BusEvent::SwipeMove { .. } => Topic::SwipeMove,
            BusEvent::SwipeEnd { .. } => Topic::SwipeEnd,
            BusEvent::DismissDrawer => Topic::DismissDrawer,
            BusEvent::DrawerClosed => Topic::DrawerClosed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_pairs() {
        assert_eq!(Direction::Left.reverse(), Direction::Right);
        assert_eq!(Direction::Right.reverse(), Direction::Left);
        assert_eq!(Direction::Top.reverse(), Direction::Bottom);
        assert_eq!(Direction::Bottom.reverse(), Direction::Top);
    }

    #[test]
    fn test_event_topics() {
        let start = BusEvent::SwipeStart(TouchPoint::new(3.0, 4.0));
        assert_eq!(start.topic(), Topic::SwipeStart);

        let end = BusEvent::SwipeEnd {
            direction: Direction::Right,
        };
        assert_eq!(end.topic(), Topic::SwipeEnd);

        assert_eq!(BusEvent::DrawerClosed.topic(), Topic::DrawerClosed);
    }
}
