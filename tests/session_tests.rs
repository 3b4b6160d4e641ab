//! Session coordinator tests.
//!
//! These drive full games through `Session::apply`, `on_input` and `tick`
//! and check scoring, turn order and transition timing end to end.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use schluck_engine::feedback::Silent;
use schluck_engine::persistence::SESSION_KEY;
use schluck_engine::{
    Action, Card, CardCatalog, CardId, Category, CategorySelection, Deck, EngineConfig, ExitDirection, Feedback,
    HapticStrength, Haptics, InputEvent, InputPhase, KeyValueStore, MemoryStore, Player, Session, SessionBuilder,
    SessionEvent, SessionPhase, Settings,
};

fn players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("Player {i}"), "🍺")).collect()
}

fn instant() -> EngineConfig {
    EngineConfig::default().with_card_swap_delay(Duration::ZERO)
}

fn costly_catalog(n: u32) -> CardCatalog {
    CardCatalog::new((1..=n).map(|i| Card::new(i, Category::Task, format!("task {i}"), 2)).collect()).unwrap()
}

fn recorder() -> (Rc<RefCell<Vec<SessionEvent>>>, impl FnMut(&SessionEvent)) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |event: &SessionEvent| sink.borrow_mut().push(event.clone()))
}

fn swipe(session: &mut Session, dx: f32, dy: f32) {
    session.on_input(&InputEvent::touch(InputPhase::Down, 200.0, 400.0));
    session.on_input(&InputEvent::touch(InputPhase::Move, 200.0 + dx, 400.0 + dy));
    session.on_input(&InputEvent::touch_end());
}

/// Three players, two costly cards: one drink, one completed task.
#[test]
fn test_three_player_game() {
    let mut session = SessionBuilder::new(costly_catalog(2))
        .config(instant())
        .seed(42)
        .start(players(3))
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::NotStarted);
    assert_eq!(session.cards_remaining(), 2);

    assert!(session.apply(Action::Draw));
    assert_eq!(session.phase(), SessionPhase::CardShown);
    assert_eq!(session.cards_remaining(), 1);

    // Player 0 declines and drinks
    assert!(session.apply(Action::Drink));
    assert_eq!(session.state().current_player_index(), 1);

    // Player 1 accepts and completes
    assert!(session.apply(Action::Accept));
    assert_eq!(session.phase(), SessionPhase::AwaitingResolution);
    assert!(session.apply(Action::Complete));

    assert_eq!(session.phase(), SessionPhase::Finished);
    let drinks: Vec<u32> = session.state().players().iter().map(|p| p.total_drinks).collect();
    assert_eq!(drinks, vec![2, 0, 0]);
    assert_eq!(session.state().current_player_index(), 2);
    assert_eq!(session.state().players()[0].stats.drinks, 1);
    assert_eq!(session.state().players()[1].stats.accepted, 1);

    // Nothing left to act on
    assert!(!session.apply(Action::Drink));
    assert!(!session.apply(Action::Complete));
}

/// Drink on a costly card, then a Wildcard that completes on the first
/// right swipe and ends the game.
#[test]
fn test_wildcard_finishes_game() {
    let cards = vec![
        Card::new(1, Category::Truth, "Peinlichster Moment?", 2),
        Card::new(2, Category::Wildcard, "Neue Regel", 0),
    ];
    let catalog = CardCatalog::new(cards.clone()).unwrap();
    let (log, observer) = recorder();
    let mut session = SessionBuilder::new(catalog)
        .config(instant())
        .deck(Deck::from_sequence(cards))
        .observer(observer)
        .start(players(3))
        .unwrap();

    swipe(&mut session, 150.0, 0.0);
    assert_eq!(session.state().deck.cursor(), Some(0));
    assert_eq!(session.state().current_player_index(), 0);

    swipe(&mut session, -150.0, 0.0);
    assert_eq!(session.state().players()[0].total_drinks, 2);
    assert_eq!(session.state().current_player_index(), 1);
    assert_eq!(session.state().deck.cursor(), Some(1));

    swipe(&mut session, 150.0, 0.0);
    assert_eq!(session.state().current_player_index(), 2);
    assert_eq!(session.state().deck.cursor(), Some(1));
    assert_eq!(session.phase(), SessionPhase::Finished);

    let drinks: Vec<u32> = session.state().players().iter().map(|p| p.total_drinks).collect();
    assert_eq!(drinks, vec![2, 0, 0]);
    assert_eq!(log.borrow().last(), Some(&SessionEvent::Finished));
    assert_eq!(session.exit_direction(CardId::new(2)), Some(ExitDirection::Right));
}

#[derive(Default)]
struct Pulses(RefCell<Vec<HapticStrength>>);

impl Haptics for Pulses {
    fn pulse(&self, strength: HapticStrength) {
        self.0.borrow_mut().push(strength);
    }
}

#[test]
fn test_finish_pulses_heavy() {
    let pulses = Rc::new(Pulses::default());
    let feedback = Feedback::new(pulses.clone(), Rc::new(Silent), Settings::default());
    let mut session = SessionBuilder::new(costly_catalog(1))
        .config(instant())
        .feedback(feedback)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    assert!(pulses.0.borrow().is_empty());

    assert!(session.apply(Action::Drink));
    assert_eq!(session.phase(), SessionPhase::Finished);
    assert_eq!(*pulses.0.borrow(), vec![HapticStrength::Heavy]);
}

#[test]
fn test_turn_wraps_around() {
    let mut session = SessionBuilder::new(costly_catalog(5))
        .config(instant())
        .seed(7)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);

    let mut seen = Vec::new();
    while session.phase() == SessionPhase::CardShown {
        seen.push(session.state().current_player_index());
        session.apply(Action::Drink);
    }
    assert_eq!(seen, vec![0, 1, 0, 1, 0]);
    let drinks: Vec<u32> = session.state().players().iter().map(|p| p.total_drinks).collect();
    assert_eq!(drinks, vec![6, 4]);
}

#[test]
fn test_stale_card_tap_is_ignored() {
    let mut session = SessionBuilder::new(costly_catalog(3))
        .config(instant())
        .seed(1)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    let first = session.current_card().unwrap().id;

    assert!(session.apply_for(first, Action::Drink));
    // a second tap on the same card lands after it was resolved
    assert!(!session.apply_for(first, Action::Drink));
    assert_eq!(session.state().players()[0].total_drinks, 2);
    assert_eq!(session.state().players()[1].total_drinks, 0);
    assert_eq!(session.state().deck.cursor(), Some(1));
}

#[test]
fn test_complete_requires_acceptance() {
    let mut session = SessionBuilder::new(costly_catalog(2))
        .config(instant())
        .seed(3)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    assert!(!session.apply(Action::Complete));

    session.apply(Action::Accept);
    // no drinking once the card was accepted
    assert!(!session.apply(Action::Drink));
    assert!(session.apply(Action::Complete));
    assert_eq!(session.state().turns.total_drinks(), 0);
}

#[test]
fn test_free_cards_resolve_on_accept() {
    let catalog = CardCatalog::new(vec![
        Card::new(1, Category::Wildcard, "everyone drinks", 3),
        Card::new(2, Category::Group, "free round", 0),
    ])
    .unwrap();
    let mut session = SessionBuilder::new(catalog).config(instant()).seed(9).start(players(2)).unwrap();
    session.apply(Action::Draw);

    assert!(!session.apply(Action::Drink));
    assert!(session.apply(Action::Accept));
    assert_eq!(session.phase(), SessionPhase::CardShown);
    assert!(session.apply(Action::Complete));
    assert_eq!(session.phase(), SessionPhase::Finished);
    assert_eq!(session.state().turns.total_drinks(), 0);

    let wildcards: u32 = session.state().players().iter().map(|p| p.stats.wildcards).sum();
    assert_eq!(wildcards, 1);
}

#[test]
fn test_card_swap_delay() {
    let (log, observer) = recorder();
    let mut session = SessionBuilder::new(costly_catalog(3))
        .seed(5)
        .observer(observer)
        .start(players(2))
        .unwrap();

    session.apply(Action::Draw);
    session.tick(Duration::from_millis(200));
    let first = session.current_card().unwrap().id;

    assert!(session.apply(Action::Drink));
    assert!(session.is_transitioning());
    assert_eq!(session.exit_direction(first), Some(ExitDirection::Left));
    assert!(!session.apply(Action::Drink));
    assert!(!session.apply(Action::Accept));

    session.tick(Duration::from_millis(199));
    assert!(session.is_transitioning());
    session.tick(Duration::from_millis(1));
    assert!(!session.is_transitioning());
    // the tag outlives the reveal and is replaced by the next resolution
    assert_eq!(session.exit_direction(first), Some(ExitDirection::Left));

    let second = session.current_card().unwrap().id;
    assert!(log.borrow().contains(&SessionEvent::CardRevealed { card: second }));
    assert!(session.apply(Action::Drink));
    assert_eq!(session.exit_direction(first), None);
    assert_eq!(session.exit_direction(second), Some(ExitDirection::Left));
}

#[test]
fn test_exit_tag_survives_instant_swap() {
    let mut session = SessionBuilder::new(costly_catalog(3))
        .config(instant())
        .seed(5)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    let first = session.current_card().unwrap().id;

    assert!(session.apply(Action::Drink));
    assert!(!session.is_transitioning());
    assert_eq!(session.exit_direction(first), Some(ExitDirection::Left));

    let second = session.current_card().unwrap().id;
    session.apply(Action::Accept);
    assert!(session.apply(Action::Complete));
    assert_eq!(session.exit_direction(first), None);
    assert_eq!(session.exit_direction(second), Some(ExitDirection::Right));
}

#[test]
fn test_events_follow_state() {
    let (log, observer) = recorder();
    let mut session = SessionBuilder::new(costly_catalog(2))
        .config(instant())
        .seed(11)
        .observer(observer)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    let first = session.current_card().unwrap().id;
    session.apply(Action::Drink);

    let events = log.borrow();
    assert_eq!(events[0], SessionEvent::Started { resumed: false });
    assert!(events.contains(&SessionEvent::Drank { card: first, player: 0, amount: 2 }));
    assert!(events.contains(&SessionEvent::PlayerChanged { player: 1 }));
    let drank = events.iter().position(|e| matches!(e, SessionEvent::Drank { .. })).unwrap();
    let changed = events.iter().position(|e| matches!(e, SessionEvent::PlayerChanged { .. })).unwrap();
    assert!(drank < changed);
}

#[test]
fn test_swipes_drive_the_game() {
    let (log, observer) = recorder();
    let mut session = SessionBuilder::new(costly_catalog(3))
        .config(instant())
        .seed(2)
        .observer(observer)
        .start(players(3))
        .unwrap();

    swipe(&mut session, 150.0, 0.0);
    assert_eq!(session.phase(), SessionPhase::CardShown);

    swipe(&mut session, -150.0, 5.0);
    assert_eq!(session.state().players()[0].total_drinks, 2);

    // below the commit threshold nothing happens
    swipe(&mut session, 99.0, 0.0);
    assert_eq!(session.phase(), SessionPhase::CardShown);

    swipe(&mut session, 101.0, 0.0);
    assert_eq!(session.phase(), SessionPhase::AwaitingResolution);
    swipe(&mut session, 150.0, 0.0);
    assert_eq!(session.state().players()[1].stats.accepted, 1);

    swipe(&mut session, 0.0, -150.0);
    let snapshot = log
        .borrow()
        .iter()
        .find_map(|e| match e {
            SessionEvent::ShowStatistics { snapshot } => Some(snapshot.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(&*snapshot, session.state());
}

#[test]
fn test_statistics_always_available() {
    let mut session = SessionBuilder::new(costly_catalog(1))
        .config(instant())
        .seed(4)
        .start(players(1))
        .unwrap();
    assert!(session.apply(Action::ShowStatistics));
    session.apply(Action::Draw);
    session.apply(Action::Drink);
    assert_eq!(session.phase(), SessionPhase::Finished);
    assert!(session.apply(Action::ShowStatistics));
}

#[test]
fn test_single_player_keeps_the_turn() {
    let (log, observer) = recorder();
    let mut session = SessionBuilder::new(costly_catalog(3))
        .config(instant().with_player_handoff(true))
        .seed(4)
        .observer(observer)
        .start(players(1))
        .unwrap();
    session.apply(Action::Draw);
    assert!(session.apply(Action::Drink));
    assert!(session.apply(Action::Drink));

    assert_eq!(session.state().current_player_index(), 0);
    assert_eq!(session.state().players()[0].total_drinks, 4);
    assert!(!session.awaiting_handoff());
    let events = log.borrow();
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::PlayerChanged { .. })));
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::HandoffRequested { .. })));
}

#[test]
fn test_player_handoff() {
    let (log, observer) = recorder();
    let mut session = SessionBuilder::new(costly_catalog(3))
        .config(instant().with_player_handoff(true))
        .seed(8)
        .observer(observer)
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    session.apply(Action::Drink);

    assert!(session.awaiting_handoff());
    assert!(log.borrow().contains(&SessionEvent::HandoffRequested { player: 1 }));
    assert!(!session.apply(Action::Accept));

    assert!(session.apply(Action::DismissHandoff));
    assert!(!session.apply(Action::DismissHandoff));
    assert!(session.apply(Action::Accept));
}

#[test]
fn test_restart_resets_scores() {
    let mut session = SessionBuilder::new(costly_catalog(2))
        .config(instant())
        .seed(6)
        .start(players(3))
        .unwrap();
    assert!(!session.apply(Action::Restart));

    session.apply(Action::Draw);
    session.apply(Action::Drink);
    session.apply(Action::Drink);
    assert_eq!(session.phase(), SessionPhase::Finished);

    assert!(session.apply(Action::Restart));
    assert_eq!(session.phase(), SessionPhase::NotStarted);
    assert_eq!(session.state().current_player_index(), 0);
    assert_eq!(session.state().turns.total_drinks(), 0);
    assert_eq!(session.state().players().len(), 3);
    assert_eq!(session.cards_remaining(), 2);
    assert!(session.apply(Action::Draw));
}

#[test]
fn test_empty_selection_finishes_immediately() {
    let (log, observer) = recorder();
    let selection = CategorySelection::from_categories(&[Category::Duel]).unwrap();
    let session = SessionBuilder::new(costly_catalog(3))
        .selection(selection)
        .seed(1)
        .observer(observer)
        .start(players(2))
        .unwrap();

    assert_eq!(session.phase(), SessionPhase::Finished);
    assert_eq!(
        *log.borrow(),
        vec![SessionEvent::Started { resumed: false }, SessionEvent::Finished]
    );
}

#[test]
fn test_autosave_and_resume() {
    let store = MemoryStore::new();
    let mut session = SessionBuilder::new(costly_catalog(4))
        .config(instant())
        .seed(12)
        .store(Rc::new(store.clone()))
        .start(players(3))
        .unwrap();
    session.apply(Action::Draw);
    session.apply(Action::Drink);
    session.apply(Action::Accept);

    session.tick(Duration::from_secs(9));
    assert!(!store.contains(SESSION_KEY));
    session.tick(Duration::from_secs(1));
    assert!(store.contains(SESSION_KEY));

    let (log, observer) = recorder();
    let resumed = SessionBuilder::new(costly_catalog(4))
        .config(instant())
        .store(Rc::new(store.clone()))
        .observer(observer)
        .resume()
        .unwrap();
    assert_eq!(resumed.phase(), SessionPhase::AwaitingResolution);
    assert_eq!(resumed.state().deck, session.state().deck);
    assert_eq!(resumed.state().turns, session.state().turns);
    assert_eq!(log.borrow()[0], SessionEvent::Started { resumed: true });
}

#[test]
fn test_exit_saves_and_finish_clears() {
    let store = MemoryStore::new();
    let mut session = SessionBuilder::new(costly_catalog(2))
        .config(instant())
        .seed(13)
        .store(Rc::new(store.clone()))
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    session.exit();
    assert!(store.contains(SESSION_KEY));
    assert!(!session.apply(Action::Drink));

    let mut resumed = SessionBuilder::new(costly_catalog(2))
        .config(instant())
        .store(Rc::new(store.clone()))
        .resume_or_start(players(2))
        .unwrap();
    assert_eq!(resumed.phase(), SessionPhase::CardShown);
    resumed.apply(Action::Drink);
    resumed.apply(Action::Drink);
    assert_eq!(resumed.phase(), SessionPhase::Finished);
    assert!(!store.contains(SESSION_KEY));

    // nothing to resume after a finished game
    assert!(SessionBuilder::new(costly_catalog(2)).store(Rc::new(store)).resume().is_none());
}

#[test]
fn test_exit_cancels_timers() {
    let store = MemoryStore::new();
    let mut session = SessionBuilder::new(costly_catalog(2))
        .seed(14)
        .store(Rc::new(store.clone()))
        .start(players(2))
        .unwrap();
    session.apply(Action::Draw);
    assert!(session.is_transitioning());
    session.exit();
    store.remove(SESSION_KEY).unwrap();

    session.tick(Duration::from_secs(60));
    assert!(!store.contains(SESSION_KEY));
    assert!(session.is_closed());
}
