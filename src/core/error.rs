//! Error type shared by every fallible operation in the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;
use crate::games::bartok::TurnPhase;

/// Which pile an operation addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Draw,
    Discard,
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileKind::Draw => f.write_str("draw"),
            PileKind::Discard => f.write_str("discard"),
        }
    }
}

/// Why a play or draw request was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayRejection {
    /// Another seat holds the turn.
    NotYourTurn,
    /// The game is not waiting for a play (dealing, resolving, over).
    WrongPhase,
    /// The card is not in the requesting player's hand.
    NotInHand,
    /// The card does not match the target under the active rules.
    NoMatch,
}

impl std::fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            PlayRejection::NotYourTurn => "not this player's turn",
            PlayRejection::WrongPhase => "game is not awaiting a play",
            PlayRejection::NotInHand => "card is not in hand",
            PlayRejection::NoMatch => "card does not match the target",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    /// Draw attempted on an empty pile (after any permitted reshuffle).
    #[error("cannot draw from an empty {0} pile")]
    EmptyPile(PileKind),

    /// Rejected play or draw. Nothing was mutated.
    #[error("{player} cannot act{}: {reason}", with_card(.card))]
    InvalidPlay {
        player: PlayerId,
        card: Option<CardId>,
        reason: PlayRejection,
    },

    /// Non-positive duration or non-finite endpoints. The request was ignored.
    #[error("invalid motion request for {card}: {reason}")]
    InvalidMotionRequest { card: CardId, reason: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("operation requires phase {expected:?}, game is in {actual:?}")]
    WrongPhase { expected: TurnPhase, actual: TurnPhase },

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("snapshot codec failure: {0}")]
    Codec(String),
}

fn with_card(card: &Option<CardId>) -> String {
    card.map(|c| format!(" with {c}")).unwrap_or_default()
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::EmptyPile(PileKind::Draw);
        assert_eq!(err.to_string(), "cannot draw from an empty draw pile");

        let err = GameError::InvalidPlay {
            player: PlayerId::new(2),
            card: Some(CardId(7)),
            reason: PlayRejection::NoMatch,
        };
        assert_eq!(
            err.to_string(),
            "Player 2 cannot act with Card(7): card does not match the target"
        );

        let err = GameError::InvalidPlay {
            player: PlayerId::new(1),
            card: None,
            reason: PlayRejection::NotYourTurn,
        };
        assert_eq!(err.to_string(), "Player 1 cannot act: not this player's turn");
    }
}
