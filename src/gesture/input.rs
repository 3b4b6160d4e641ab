//! Raw pointer input as delivered by the shell.
//!
//! Touch and mouse/pointer events arrive through separate handlers in the
//! browser. Both are normalised into `InputEvent` and tagged with their
//! source so the recognizer can keep them apart.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    Touch,
    Pointer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPhase {
    Down,
    Move,
    Up,
    /// The platform aborted the gesture (e.g. `touchcancel`).
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One input sample.
///
/// `points` may be empty: `touchend` carries no active touches, and some
/// platforms deliver malformed events. The recognizer tolerates both.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub source: InputSource,
    pub phase: InputPhase,
    pub points: SmallVec<[Point; 2]>,
}

impl InputEvent {
    #[must_use]
    pub fn new(source: InputSource, phase: InputPhase, points: &[Point]) -> Self {
        Self {
            source,
            phase,
            points: points.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn touch(phase: InputPhase, x: f32, y: f32) -> Self {
        Self::new(InputSource::Touch, phase, &[Point::new(x, y)])
    }

    #[must_use]
    pub fn pointer(phase: InputPhase, x: f32, y: f32) -> Self {
        Self::new(InputSource::Pointer, phase, &[Point::new(x, y)])
    }

    /// `touchend`: no coordinates.
    #[must_use]
    pub fn touch_end() -> Self {
        Self::new(InputSource::Touch, InputPhase::Up, &[])
    }

    /// First contact point; the only one a swipe looks at.
    #[must_use]
    pub fn primary(&self) -> Option<Point> {
        self.points.first().copied()
    }
}
