//! Session notifications.
//!
//! The coordinator batches the events of one transition and delivers them
//! only after the state change is complete, so observers never see a
//! half-applied resolution.

use crate::cards::CardId;
use crate::core::state::SessionState;
use crate::gesture::SwipeDirection;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A session began, fresh or from a snapshot.
    Started { resumed: bool },
    /// The cursor moved to a new card; it is revealed after the swap delay.
    CardDrawn { card: CardId },
    /// The swap delay elapsed and the card is interactive.
    CardRevealed { card: CardId },
    /// A costly card was accepted and awaits confirmation.
    CardAccepted { card: CardId, player: usize },
    CardCompleted { card: CardId, player: usize },
    Drank { card: CardId, player: usize, amount: u32 },
    PlayerChanged { player: usize },
    /// Waiting for a tap before the next player acts.
    HandoffRequested { player: usize },
    GestureCommitted { direction: SwipeDirection },
    /// Navigate to the statistics view with this snapshot.
    ShowStatistics { snapshot: Box<SessionState> },
    Finished,
    Restarted,
}

/// Receives session events. Closures implement it directly.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F: FnMut(&SessionEvent)> SessionObserver for F {
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
