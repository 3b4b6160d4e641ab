//! Haptic and audio collaborators.
//!
//! The shell implements `Haptics` and `SoundPlayer` on top of the platform
//! (vibration API, Web Audio, native plugins). The engine only decides
//! *when* feedback fires. `Feedback` bundles both with the user's
//! `Settings` so every caller gates on the same toggles.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::config::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HapticStrength {
    Light,
    Medium,
    Heavy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    SwipeRight,
    SwipeLeft,
    CardDraw,
    ButtonClick,
    Success,
    PlayerChange,
    Drink,
}

/// Short tactile pulse.
pub trait Haptics {
    fn pulse(&self, strength: HapticStrength);
}

/// One-shot sound effects plus the background music loop.
pub trait SoundPlayer {
    fn play(&self, effect: SoundEffect);

    /// Start or stop background music. Players without music ignore it.
    fn set_music(&self, _playing: bool) {}
}

/// Does nothing. Default for headless sessions and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Haptics for Silent {
    fn pulse(&self, _strength: HapticStrength) {}
}

impl SoundPlayer for Silent {
    fn play(&self, _effect: SoundEffect) {}
}

/// Shared, settings-aware handle to the feedback collaborators.
///
/// Cloning is cheap; clones share the same settings cell.
#[derive(Clone)]
pub struct Feedback {
    haptics: Rc<dyn Haptics>,
    sound: Rc<dyn SoundPlayer>,
    settings: Rc<Cell<Settings>>,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feedback")
            .field("settings", &self.settings.get())
            .finish_non_exhaustive()
    }
}

impl Feedback {
    pub fn new(haptics: Rc<dyn Haptics>, sound: Rc<dyn SoundPlayer>, settings: Settings) -> Self {
        sound.set_music(settings.music_enabled);
        Self {
            haptics,
            sound,
            settings: Rc::new(Cell::new(settings)),
        }
    }

    #[must_use]
    pub fn silent() -> Self {
        Self::new(Rc::new(Silent), Rc::new(Silent), Settings::default())
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings.get()
    }

    /// Replace the settings for this handle and all its clones.
    pub fn set_settings(&self, settings: Settings) {
        let previous = self.settings.replace(settings);
        if previous.music_enabled != settings.music_enabled {
            self.sound.set_music(settings.music_enabled);
        }
    }

    pub fn pulse(&self, strength: HapticStrength) {
        if self.settings.get().haptics_enabled {
            self.haptics.pulse(strength);
        }
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.settings.get().sound_enabled {
            self.sound.play(effect);
        }
    }
}
