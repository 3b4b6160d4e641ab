//! Swipe recognizer.
//!
//! Turns a down → move* → up stream into a continuous `GestureState`
//! (for card tilt/opacity) and at most one committed swipe per gesture.
//!
//! ## Thresholds
//!
//! - past `visual_threshold` a provisional direction is reported
//! - on release, a gesture commits only past `commit_threshold`
//! - downward drags never commit

use serde::{Deserialize, Serialize};

use super::input::{InputEvent, InputPhase, InputSource, Point};
use crate::core::config::EngineConfig;
use crate::feedback::{Feedback, HapticStrength};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
    /// Reserved for the statistics view.
    Up,
}

/// Observable gesture state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    pub is_active: bool,
    /// Provisional direction; `None` below the visual threshold.
    pub direction: Option<SwipeDirection>,
    /// Signed offset along the dominant axis. Zero when inactive.
    pub distance: f32,
}

impl GestureState {
    const IDLE: GestureState = GestureState {
        is_active: false,
        direction: None,
        distance: 0.0,
    };
}

impl Default for GestureState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Callbacks fired by the recognizer. All default to no-ops.
pub trait GestureHandler {
    fn on_gesture_start(&mut self) {}
    fn on_swipe_left(&mut self) {}
    fn on_swipe_right(&mut self) {}
    fn on_swipe_up(&mut self) {}
    /// Fires after every `end()`, committed or not.
    fn on_gesture_end(&mut self) {}
}

impl GestureHandler for () {}

#[derive(Clone, Copy, Debug)]
struct Tracking {
    source: InputSource,
    origin: Point,
    current: Point,
}

impl Tracking {
    fn delta(&self) -> (f32, f32) {
        (self.current.x - self.origin.x, self.current.y - self.origin.y)
    }
}

#[derive(Debug)]
pub struct GestureRecognizer {
    visual_threshold: f32,
    commit_threshold: f32,
    tracking: Option<Tracking>,
    state: GestureState,
    feedback: Feedback,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(config: &EngineConfig, feedback: Feedback) -> Self {
        Self {
            visual_threshold: config.visual_threshold,
            commit_threshold: config.commit_threshold,
            tracking: None,
            state: GestureState::IDLE,
            feedback,
        }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tracking.is_some()
    }

    /// Start tracking. Ignored while another gesture is active.
    pub fn begin(&mut self, source: InputSource, x: f32, y: f32, handler: &mut dyn GestureHandler) -> bool {
        if self.tracking.is_some() {
            return false;
        }
        let origin = Point::new(x, y);
        self.tracking = Some(Tracking { source, origin, current: origin });
        self.state = GestureState { is_active: true, direction: None, distance: 0.0 };
        handler.on_gesture_start();
        true
    }

    /// Feed a movement sample from `source`.
    pub fn update(&mut self, source: InputSource, x: f32, y: f32) {
        let Some(tracking) = self.tracking.as_mut() else {
            return;
        };
        if tracking.source != source {
            return;
        }
        tracking.current = Point::new(x, y);

        let (dx, dy) = tracking.delta();
        let horizontal = dx.abs() >= dy.abs();
        let distance = if horizontal { dx } else { dy };

        let direction = if distance.abs() > self.visual_threshold {
            classify(dx, dy, horizontal)
        } else {
            None
        };

        self.state = GestureState { is_active: true, direction, distance };
    }

    /// Finish the gesture from `source` and fire callbacks.
    ///
    /// Returns the committed direction, if any. State is always reset and
    /// `on_gesture_end` always fires for the active gesture.
    pub fn end(&mut self, source: InputSource, handler: &mut dyn GestureHandler) -> Option<SwipeDirection> {
        let tracking = match self.tracking {
            Some(t) if t.source == source => t,
            _ => return None,
        };
        self.tracking = None;
        self.state = GestureState::IDLE;

        let (dx, dy) = tracking.delta();
        let committed = if dx.abs() >= dy.abs() {
            (dx.abs() > self.commit_threshold).then(|| classify(dx, dy, true)).flatten()
        } else if dy < -self.commit_threshold {
            Some(SwipeDirection::Up)
        } else {
            None
        };

        if let Some(direction) = committed {
            self.feedback.pulse(HapticStrength::Medium);
            match direction {
                SwipeDirection::Left => handler.on_swipe_left(),
                SwipeDirection::Right => handler.on_swipe_right(),
                SwipeDirection::Up => handler.on_swipe_up(),
            }
            tracing::debug!(?direction, dx, dy, "swipe committed");
        }
        handler.on_gesture_end();
        committed
    }

    /// Drop the active gesture without committing or firing callbacks.
    pub fn cancel(&mut self) {
        self.tracking = None;
        self.state = GestureState::IDLE;
    }

    /// Dispatch a raw input event.
    ///
    /// Events without coordinates are ignored, except for `Up`, which
    /// uses the last sample (touch end carries no touches).
    pub fn handle(&mut self, event: &InputEvent, handler: &mut dyn GestureHandler) -> Option<SwipeDirection> {
        match event.phase {
            InputPhase::Down => {
                if let Some(p) = event.primary() {
                    self.begin(event.source, p.x, p.y, handler);
                }
                None
            }
            InputPhase::Move => {
                if let Some(p) = event.primary() {
                    self.update(event.source, p.x, p.y);
                }
                None
            }
            InputPhase::Up => {
                if let Some(p) = event.primary() {
                    self.update(event.source, p.x, p.y);
                }
                self.end(event.source, handler)
            }
            InputPhase::Cancel => {
                if self.tracking.map_or(false, |t| t.source == event.source) {
                    self.cancel();
                    handler.on_gesture_end();
                }
                None
            }
        }
    }
}

fn classify(dx: f32, dy: f32, horizontal: bool) -> Option<SwipeDirection> {
    if horizontal {
        Some(if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left })
    } else if dy < 0.0 {
        Some(SwipeDirection::Up)
    } else {
        None
    }
}
