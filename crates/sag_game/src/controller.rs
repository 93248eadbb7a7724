use glam::IVec2;
use sag_core::animation::AnimationKind;
use sag_core::input::Key;

/// Movement intent. At most one axis is ever active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step in screen space (y grows downward).
    pub fn vector(self) -> IVec2 {
        match self {
            Self::None => IVec2::ZERO,
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
        }
    }

    pub fn animation(self) -> AnimationKind {
        match self {
            Self::None => AnimationKind::Idle,
            Self::Left => AnimationKind::RunLeft,
            Self::Right => AnimationKind::RunRight,
            Self::Up => AnimationKind::RunUp,
            Self::Down => AnimationKind::RunDown,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Gameplay direction for an arrow key; other keys have none.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(Self::Left),
            Key::Right => Some(Self::Right),
            Key::Up => Some(Self::Up),
            Key::Down => Some(Self::Down),
            Key::F3 => None,
        }
    }
}

/// Turns arrow key transitions into the current [`Direction`].
///
/// A press always wins and zeroes the other axis. A release only clears the
/// direction when it is on the same axis as the released key, so letting go
/// of Left while moving Up keeps moving Up.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectionTracker {
    current: Direction,
}

impl DirectionTracker {
    /// Returns the new direction when it changed.
    pub fn press(&mut self, key: Key) -> Option<Direction> {
        let direction = Direction::from_key(key)?;
        self.set(direction)
    }

    /// Returns the new direction when it changed.
    pub fn release(&mut self, key: Key) -> Option<Direction> {
        let released = Direction::from_key(key)?;
        let same_axis = (released.is_horizontal() && self.current.is_horizontal())
            || (released.is_vertical() && self.current.is_vertical());
        if !same_axis {
            return None;
        }
        self.set(Direction::None)
    }

    pub fn reset(&mut self) -> Option<Direction> {
        self.set(Direction::None)
    }

    fn set(&mut self, direction: Direction) -> Option<Direction> {
        if self.current == direction {
            return None;
        }
        self.current = direction;
        Some(direction)
    }
}
