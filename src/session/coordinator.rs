//! Session coordinator: the game state machine.
//!
//! ## Phases
//!
//! ```text
//! NotStarted --draw--> CardShown --accept (costly)--> AwaitingResolution
//!                        |  ^                              |
//!                        |  +------- complete -------------+
//!                        +-- drink / accept (free) --> CardShown | Finished
//! ```
//!
//! Swipes and button taps go through the same `apply` entry point, so a
//! card is resolved exactly once whichever input arrives first. Every
//! resolution records the score, rotates the turn and moves the deck in
//! one step before any observer is notified.

use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;

use super::events::{SessionEvent, SessionObserver};
use super::scheduler::Scheduler;
use crate::cards::{Card, CardCatalog, CardId, CategorySelection};
use crate::core::config::{EngineConfig, Settings};
use crate::core::error::Result;
use crate::core::player::Player;
use crate::core::rng::GameRng;
use crate::core::state::{SessionPhase, SessionState};
use crate::deck::{Deck, ExitDirection, ExitTag, ExitView};
use crate::feedback::{Feedback, HapticStrength, SoundEffect};
use crate::gesture::{GestureRecognizer, GestureState, InputEvent, SwipeDirection};
use crate::persistence::{KeyValueStore, SessionStore};
use crate::turns::Outcome;

/// A player intent, from a button tap or a recognised swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw the first card.
    Draw,
    /// Take on the shown card. Free cards resolve immediately.
    Accept,
    /// Decline the card and drink its cost.
    Drink,
    /// Confirm an accepted card is done.
    Complete,
    ShowStatistics,
    /// Reshuffle and reset scores. The shell asks for confirmation first.
    Restart,
    /// Tap away the player handoff screen.
    DismissHandoff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    RevealCard,
    Autosave,
}

type Events = SmallVec<[SessionEvent; 4]>;

/// Builder for creating a `Session`.
pub struct SessionBuilder {
    catalog: CardCatalog,
    config: EngineConfig,
    selection: CategorySelection,
    rng: Option<GameRng>,
    deck: Option<Deck>,
    feedback: Feedback,
    store: Option<SessionStore>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionBuilder {
    pub fn new(catalog: CardCatalog) -> Self {
        Self {
            catalog,
            config: EngineConfig::default(),
            selection: CategorySelection::all(),
            rng: None,
            deck: None,
            feedback: Feedback::silent(),
            store: None,
            observers: Vec::new(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn selection(mut self, selection: CategorySelection) -> Self {
        self.selection = selection;
        self
    }

    /// Fix the shuffle seed. Without it the deck is seeded from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(GameRng::new(seed));
        self
    }

    /// Play this deck in its given order instead of dealing from the
    /// catalog. Restart still reshuffles from the catalog.
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    /// Persist snapshots to `store`.
    pub fn store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.store = Some(SessionStore::new(store));
        self
    }

    pub fn observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Start a fresh game with `players` in turn order.
    ///
    /// Fails with `EmptyRoster` when `players` is empty; the shell should
    /// send the user back to setup.
    pub fn start(mut self, players: Vec<Player>) -> Result<Session> {
        let mut rng = self.rng.take().unwrap_or_else(GameRng::from_entropy);
        let deck = match self.deck.take() {
            Some(deck) => deck,
            None => Deck::shuffle(&self.catalog, Some(&self.selection), &mut rng),
        };
        let state = SessionState::new(players, deck)?;
        tracing::info!(
            players = state.players().len(),
            cards = state.deck.len(),
            "session started"
        );
        Ok(Session::assemble(self, rng, state, false))
    }

    /// Resume the saved game, if a usable snapshot exists.
    pub fn resume(mut self) -> Option<Session> {
        let state = self.store.as_ref()?.load()?;
        let rng = self.rng.take().unwrap_or_else(GameRng::from_entropy);
        tracing::info!(
            cursor = ?state.deck.cursor(),
            saved_at = %state.timestamp,
            "session resumed"
        );
        Some(Session::assemble(self, rng, state, true))
    }

    /// Resume when possible, otherwise start fresh with `players`.
    pub fn resume_or_start(mut self, players: Vec<Player>) -> Result<Session> {
        if let Some(state) = self.store.as_ref().and_then(SessionStore::load) {
            let rng = self.rng.take().unwrap_or_else(GameRng::from_entropy);
            tracing::info!(cursor = ?state.deck.cursor(), "session resumed");
            return Ok(Session::assemble(self, rng, state, true));
        }
        self.start(players)
    }
}

/// A running game.
pub struct Session {
    config: EngineConfig,
    state: SessionState,
    catalog: CardCatalog,
    selection: CategorySelection,
    rng: GameRng,
    recognizer: GestureRecognizer,
    exits: ExitView,
    timers: Scheduler<Timer>,
    awaiting_handoff: bool,
    closed: bool,
    store: Option<SessionStore>,
    feedback: Feedback,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    fn assemble(builder: SessionBuilder, rng: GameRng, state: SessionState, resumed: bool) -> Self {
        let mut session = Self {
            recognizer: GestureRecognizer::new(&builder.config, builder.feedback.clone()),
            config: builder.config,
            state,
            catalog: builder.catalog,
            selection: builder.selection,
            rng,
            exits: ExitView::new(),
            timers: Scheduler::new(),
            awaiting_handoff: false,
            closed: false,
            store: builder.store,
            feedback: builder.feedback,
            observers: builder.observers,
        };
        session.schedule_autosave();

        let mut events = Events::new();
        events.push(SessionEvent::Started { resumed });
        if session.state.phase() == SessionPhase::Finished {
            events.push(SessionEvent::Finished);
        }
        session.dispatch(events);
        session
    }

    // === Input ===

    /// Apply a player intent. Returns whether it changed anything.
    ///
    /// Card actions are ignored while a card swap is in flight, while the
    /// handoff screen is up, and when they do not fit the current phase.
    pub fn apply(&mut self, action: Action) -> bool {
        if self.closed {
            return false;
        }

        let mut events = Events::new();
        let applied = match action {
            Action::ShowStatistics => {
                events.push(SessionEvent::ShowStatistics {
                    snapshot: Box::new(self.state.clone()),
                });
                true
            }
            Action::Restart => self.restart(&mut events),
            Action::DismissHandoff => self.dismiss_handoff(),
            _ if self.is_busy() => false,
            Action::Draw => self.draw(&mut events),
            Action::Accept => self.accept(&mut events),
            Action::Drink => self.drink(&mut events),
            Action::Complete => self.complete(&mut events),
        };

        if !applied {
            tracing::debug!(?action, phase = ?self.state.phase(), "action ignored");
        }
        self.dispatch(events);
        applied
    }

    /// Apply `action` only if `card` is still the shown card.
    ///
    /// Use for taps on a rendered card: a stale tap that arrives after the
    /// card was already resolved by a swipe becomes a no-op.
    pub fn apply_for(&mut self, card: CardId, action: Action) -> bool {
        if self.state.deck.current().map(|c| c.id) != Some(card) {
            return false;
        }
        self.apply(action)
    }

    /// Feed a raw touch/pointer event. A committed swipe is translated
    /// into the matching action and applied.
    pub fn on_input(&mut self, event: &InputEvent) -> Option<SwipeDirection> {
        if self.closed {
            return None;
        }
        let direction = self.recognizer.handle(event, &mut ())?;

        match direction {
            SwipeDirection::Left => self.feedback.play(SoundEffect::SwipeLeft),
            SwipeDirection::Right => self.feedback.play(SoundEffect::SwipeRight),
            SwipeDirection::Up => {}
        }
        let mut events = Events::new();
        events.push(SessionEvent::GestureCommitted { direction });
        self.dispatch(events);

        if let Some(action) = self.action_for_swipe(direction) {
            self.apply(action);
        }
        Some(direction)
    }

    /// What a swipe means in the current phase.
    #[must_use]
    pub fn action_for_swipe(&self, direction: SwipeDirection) -> Option<Action> {
        match (direction, self.state.phase()) {
            (SwipeDirection::Up, _) => Some(Action::ShowStatistics),
            (_, SessionPhase::NotStarted) => Some(Action::Draw),
            (SwipeDirection::Right, SessionPhase::CardShown) => Some(Action::Accept),
            (SwipeDirection::Right, SessionPhase::AwaitingResolution) => Some(Action::Complete),
            (SwipeDirection::Left, SessionPhase::CardShown) => Some(Action::Drink),
            _ => None,
        }
    }

    /// Advance the session clock and run due transitions.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.closed {
            return;
        }
        let mut events = Events::new();
        for timer in self.timers.advance(elapsed) {
            match timer {
                Timer::RevealCard => self.reveal(&mut events),
                Timer::Autosave => {
                    if let Err(e) = self.save_now() {
                        tracing::warn!(error = %e, "autosave failed");
                    }
                    self.schedule_autosave();
                }
            }
        }
        self.dispatch(events);
    }

    /// Leave the game screen: save, cancel timers, stop reacting.
    pub fn exit(&mut self) {
        if self.closed {
            return;
        }
        if self.state.phase() != SessionPhase::Finished {
            if let Err(e) = self.save_now() {
                tracing::warn!(error = %e, "save on exit failed");
            }
        }
        self.timers.cancel_all();
        self.recognizer.cancel();
        self.closed = true;
        tracing::info!("session closed");
    }

    /// Write a snapshot now. No-op without a store.
    pub fn save_now(&mut self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        self.state.touch();
        store.save(&self.state)
    }

    pub fn add_observer(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.feedback.set_settings(settings);
    }

    // === Transitions ===

    fn draw(&mut self, events: &mut Events) -> bool {
        if self.state.phase() != SessionPhase::NotStarted {
            return false;
        }
        match self.state.deck.advance(None) {
            Ok(_) => self.card_drawn(events),
            // Only fails when there is nothing to draw
            Err(_) => self.finish(events),
        }
        true
    }

    fn accept(&mut self, events: &mut Events) -> bool {
        if self.state.phase() != SessionPhase::CardShown {
            return false;
        }
        let Some(card) = self.state.deck.current().cloned() else {
            return false;
        };
        if card.is_free() {
            self.resolve(&card, Outcome::Completed, events);
            return true;
        }

        self.state.pending_acceptance = true;
        let player = self.state.turns.current_index();
        tracing::debug!(card = %card.id, player, "card accepted");
        events.push(SessionEvent::CardAccepted { card: card.id, player });
        self.feedback.play(SoundEffect::ButtonClick);
        true
    }

    fn drink(&mut self, events: &mut Events) -> bool {
        if self.state.phase() != SessionPhase::CardShown {
            return false;
        }
        match self.state.deck.current().cloned() {
            Some(card) if !card.is_free() => {
                self.resolve(&card, Outcome::Drank, events);
                true
            }
            _ => false,
        }
    }

    fn complete(&mut self, events: &mut Events) -> bool {
        let Some(card) = self.state.deck.current().cloned() else {
            return false;
        };
        let allowed = match self.state.phase() {
            SessionPhase::AwaitingResolution => true,
            SessionPhase::CardShown => card.is_free(),
            _ => false,
        };
        if allowed {
            self.resolve(&card, Outcome::Completed, events);
        }
        allowed
    }

    /// Score the card, rotate the turn and move the deck as one step.
    fn resolve(&mut self, card: &Card, outcome: Outcome, events: &mut Events) {
        let player = self.state.turns.current_index();
        let direction = match outcome {
            Outcome::Drank => {
                self.state.turns.record_drinks(player, card.drinks);
                events.push(SessionEvent::Drank { card: card.id, player, amount: card.drinks });
                self.feedback.play(SoundEffect::Drink);
                ExitDirection::Left
            }
            Outcome::Completed => {
                events.push(SessionEvent::CardCompleted { card: card.id, player });
                self.feedback.play(SoundEffect::Success);
                ExitDirection::Right
            }
        };
        self.state.turns.record_outcome(player, card, outcome);
        self.state.pending_acceptance = false;
        self.state.deck.mark_resolved();
        self.state.turns.advance_turn();

        let next_player = self.state.turns.current_index();
        let player_changed = next_player != player;
        tracing::debug!(card = %card.id, player, next_player, ?outcome, "card resolved");
        if player_changed {
            events.push(SessionEvent::PlayerChanged { player: next_player });
        }

        // only the card that just left keeps an exit tag
        self.exits.clear();
        match self.state.deck.advance(Some(direction)) {
            Ok(tag) => {
                if let Some(tag) = tag {
                    self.exits.mark(tag);
                }
                if player_changed {
                    self.feedback.play(SoundEffect::PlayerChange);
                    if self.config.player_handoff {
                        self.awaiting_handoff = true;
                        events.push(SessionEvent::HandoffRequested { player: next_player });
                    }
                }
                self.card_drawn(events);
            }
            Err(_) => {
                self.exits.mark(ExitTag { card: card.id, direction });
                self.finish(events);
            }
        }
    }

    fn card_drawn(&mut self, events: &mut Events) {
        let Some(card) = self.state.deck.current().map(|c| c.id) else {
            return;
        };
        events.push(SessionEvent::CardDrawn { card });
        self.feedback.play(SoundEffect::CardDraw);

        let delay = self.config.card_swap_delay();
        if delay.is_zero() {
            self.reveal(events);
        } else {
            self.timers.schedule(delay, Timer::RevealCard);
        }
    }

    fn reveal(&mut self, events: &mut Events) {
        if let Some(card) = self.state.deck.current() {
            events.push(SessionEvent::CardRevealed { card: card.id });
        }
    }

    fn finish(&mut self, events: &mut Events) {
        self.timers.cancel(Timer::Autosave);
        self.clear_snapshot();
        tracing::info!(
            cards = self.state.deck.len(),
            total_drinks = self.state.turns.total_drinks(),
            "session finished"
        );
        self.feedback.pulse(HapticStrength::Heavy);
        events.push(SessionEvent::Finished);
    }

    fn restart(&mut self, events: &mut Events) -> bool {
        if self.state.phase() == SessionPhase::NotStarted {
            return false;
        }
        self.state.deck = Deck::shuffle(&self.catalog, Some(&self.selection), &mut self.rng);
        self.state.turns.reset_turn();
        self.state.turns.reset_scores();
        self.state.pending_acceptance = false;
        self.exits.clear();
        self.timers.cancel(Timer::RevealCard);
        self.awaiting_handoff = false;
        self.clear_snapshot();
        self.schedule_autosave();

        tracing::info!(cards = self.state.deck.len(), "session restarted");
        events.push(SessionEvent::Restarted);
        true
    }

    fn dismiss_handoff(&mut self) -> bool {
        std::mem::replace(&mut self.awaiting_handoff, false)
    }

    fn schedule_autosave(&mut self) {
        if self.store.is_some() && self.state.phase() != SessionPhase::Finished {
            self.timers.schedule(self.config.autosave_interval(), Timer::Autosave);
        }
    }

    fn clear_snapshot(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                tracing::warn!(error = %e, "failed to clear snapshot");
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.awaiting_handoff || self.timers.is_pending(Timer::RevealCard)
    }

    fn dispatch(&mut self, events: Events) {
        for event in &events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.feedback.settings()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.state.deck.current()
    }

    /// Upcoming card, for pre-loading its art.
    #[must_use]
    pub fn next_card(&self) -> Option<&Card> {
        self.state.deck.peek_next()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.state.deck.cards_remaining()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.recognizer.state()
    }

    /// Exit animation for a card that was just resolved.
    #[must_use]
    pub fn exit_direction(&self, card: CardId) -> Option<ExitDirection> {
        self.exits.get(card)
    }

    /// A card swap is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.timers.is_pending(Timer::RevealCard)
    }

    #[must_use]
    pub fn awaiting_handoff(&self) -> bool {
        self.awaiting_handoff
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
