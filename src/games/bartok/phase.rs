//! Match phases.

use serde::{Deserialize, Serialize};

/// Where the match is in its lifecycle.
///
/// `Idle → Dealing → AwaitingPlay ⇄ Resolving → GameOver`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No match running; every card is in the draw pile.
    #[default]
    Idle,
    /// Dealt cards are still flying to the hands.
    Dealing,
    /// The current player may play or draw.
    AwaitingPlay,
    /// A played or drawn card is in flight; the turn ends when it settles.
    Resolving,
    /// Somebody emptied their hand.
    GameOver,
}

impl TurnPhase {
    /// A match has started and not finished.
    #[must_use]
    pub const fn in_progress(self) -> bool {
        matches!(self, TurnPhase::Dealing | TurnPhase::AwaitingPlay | TurnPhase::Resolving)
    }
}
