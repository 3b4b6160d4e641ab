//! Gesture recognition for card swipes.
//!
//! - `input`: normalised touch/pointer events
//! - `recognizer`: threshold-based swipe classification

pub mod input;
pub mod recognizer;

pub use input::{InputEvent, InputPhase, InputSource, Point};
pub use recognizer::{GestureHandler, GestureRecognizer, GestureState, SwipeDirection};
