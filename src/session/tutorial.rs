//! Interactive swipe tutorial shown before the first game.

use std::rc::Rc;
use std::time::Duration;

use super::scheduler::Scheduler;
use crate::core::config::EngineConfig;
use crate::feedback::{Feedback, HapticStrength, SoundEffect};
use crate::gesture::{GestureRecognizer, InputEvent, SwipeDirection};
use crate::persistence::{mark_tutorial_shown, tutorial_shown, KeyValueStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TutorialStep {
    /// Any swipe is fine here.
    Intro,
    SwipeRight,
    SwipeLeft,
    SwipeUp,
}

impl TutorialStep {
    pub const ALL: [TutorialStep; 4] = [
        TutorialStep::Intro,
        TutorialStep::SwipeRight,
        TutorialStep::SwipeLeft,
        TutorialStep::SwipeUp,
    ];

    #[must_use]
    pub fn required_swipe(self) -> Option<SwipeDirection> {
        match self {
            TutorialStep::Intro => None,
            TutorialStep::SwipeRight => Some(SwipeDirection::Right),
            TutorialStep::SwipeLeft => Some(SwipeDirection::Left),
            TutorialStep::SwipeUp => Some(SwipeDirection::Up),
        }
    }

    #[must_use]
    pub fn next(self) -> Option<TutorialStep> {
        match self {
            TutorialStep::Intro => Some(TutorialStep::SwipeRight),
            TutorialStep::SwipeRight => Some(TutorialStep::SwipeLeft),
            TutorialStep::SwipeLeft => Some(TutorialStep::SwipeUp),
            TutorialStep::SwipeUp => None,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// How the tutorial judged a swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeVerdict {
    /// Intro swipe; the user may continue.
    Practised,
    Correct,
    Wrong,
    /// Step already passed or tutorial over.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AutoAdvance;

pub struct Tutorial {
    step: TutorialStep,
    can_proceed: bool,
    completed: bool,
    advance_delay: Duration,
    recognizer: GestureRecognizer,
    feedback: Feedback,
    timers: Scheduler<AutoAdvance>,
    store: Option<Rc<dyn KeyValueStore>>,
}

impl Tutorial {
    pub fn new(config: &EngineConfig, feedback: Feedback) -> Self {
        Self {
            step: TutorialStep::Intro,
            can_proceed: false,
            completed: false,
            advance_delay: config.tutorial_advance_delay(),
            recognizer: GestureRecognizer::new(config, feedback.clone()),
            feedback,
            timers: Scheduler::new(),
            store: None,
        }
    }

    /// Record completion in `store`.
    pub fn with_store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Whether the tutorial still needs to be shown.
    #[must_use]
    pub fn should_show(store: &dyn KeyValueStore) -> bool {
        !tutorial_shown(store)
    }

    pub fn on_input(&mut self, event: &InputEvent) -> Option<SwipeVerdict> {
        if self.completed {
            return None;
        }
        let direction = self.recognizer.handle(event, &mut ())?;
        Some(self.on_swipe(direction))
    }

    pub fn on_swipe(&mut self, direction: SwipeDirection) -> SwipeVerdict {
        if self.completed || (self.can_proceed && self.step != TutorialStep::Intro) {
            return SwipeVerdict::Ignored;
        }

        match self.step.required_swipe() {
            None => {
                self.feedback.pulse(HapticStrength::Light);
                self.feedback.play(SoundEffect::Success);
                self.can_proceed = true;
                SwipeVerdict::Practised
            }
            Some(required) if required == direction => {
                self.feedback.pulse(HapticStrength::Medium);
                self.feedback.play(SoundEffect::Success);
                self.can_proceed = true;
                self.timers.schedule(self.advance_delay, AutoAdvance);
                SwipeVerdict::Correct
            }
            Some(_) => {
                self.feedback.pulse(HapticStrength::Light);
                self.feedback.play(SoundEffect::ButtonClick);
                SwipeVerdict::Wrong
            }
        }
    }

    /// The Next button. Always available on the intro, otherwise only
    /// once the step's swipe was done.
    pub fn next(&mut self) -> bool {
        if self.completed || (!self.can_proceed && self.step != TutorialStep::Intro) {
            return false;
        }
        self.timers.cancel(AutoAdvance);
        match self.step.next() {
            Some(step) => {
                tracing::debug!(?step, "tutorial step");
                self.step = step;
                self.can_proceed = false;
            }
            None => self.complete(),
        }
        true
    }

    pub fn skip(&mut self) {
        if !self.completed {
            tracing::debug!(step = ?self.step, "tutorial skipped");
            self.complete();
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        if !self.timers.advance(elapsed).is_empty() {
            self.next();
        }
    }

    fn complete(&mut self) {
        self.completed = true;
        self.timers.cancel_all();
        self.recognizer.cancel();
        if let Some(store) = &self.store {
            if let Err(e) = mark_tutorial_shown(store.as_ref()) {
                tracing::warn!(error = %e, "failed to record tutorial completion");
            }
        }
    }

    #[must_use]
    pub fn step(&self) -> TutorialStep {
        self.step
    }

    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.can_proceed
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}
