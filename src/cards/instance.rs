//! Card instances - runtime card state.
//!
//! A `Card` is one physical card on the table. It records which container
//! holds it (`CardLocation`), what it is doing (`CardState`), and what the
//! display layer needs to draw it: pose, face-up flag and stacking order.
//!
//! Location and state are only changed by the pile manager and the motion
//! engine; everything else reads them.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, Rank, Suit};
use crate::core::PlayerId;
use crate::motion::Pose;

/// Which container currently holds a card. A card is in exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardLocation {
    DrawPile,
    Hand(PlayerId),
    Target,
    Discard,
}

/// What a card is doing. `To*` states are in transit and settle into the
/// matching resting state when their motion completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    DrawPile,
    ToDrawPile,
    ToHand,
    Hand,
    ToTarget,
    Target,
    ToDiscard,
    Discard,
    /// Generic move with no destination-specific resting state.
    To,
    Idle,
}

impl CardState {
    #[must_use]
    pub const fn is_in_transit(self) -> bool {
        matches!(
            self,
            CardState::ToDrawPile
                | CardState::ToHand
                | CardState::ToTarget
                | CardState::ToDiscard
                | CardState::To
        )
    }

    /// The state a card rests in once its motion completes.
    ///
    /// ```
    /// use bartok::cards::CardState;
    ///
    /// assert_eq!(CardState::ToTarget.settled(), CardState::Target);
    /// assert_eq!(CardState::To.settled(), CardState::Idle);
    /// assert_eq!(CardState::Hand.settled(), CardState::Hand);
    /// ```
    #[must_use]
    pub const fn settled(self) -> Self {
        match self {
            CardState::ToDrawPile => CardState::DrawPile,
            CardState::ToHand => CardState::Hand,
            CardState::ToTarget => CardState::Target,
            CardState::ToDiscard => CardState::Discard,
            CardState::To => CardState::Idle,
            resting => resting,
        }
    }
}

/// A card in play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    definition: CardDefinition,
    pub(crate) location: CardLocation,
    pub(crate) state: CardState,
    pub(crate) face_up: bool,
    pub(crate) sort_order: i32,
    pub(crate) layer: i32,
    pub(crate) pose: Pose,
}

impl Card {
    /// A face-down card resting in the draw pile at the origin.
    #[must_use]
    pub fn new(id: CardId, definition: CardDefinition) -> Self {
        Self {
            id,
            definition,
            location: CardLocation::DrawPile,
            state: CardState::DrawPile,
            face_up: false,
            sort_order: 0,
            layer: 0,
            pose: Pose::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.definition.rank
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.definition.suit
    }

    #[must_use]
    pub fn location(&self) -> CardLocation {
        self.location
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    #[must_use]
    pub fn face_up(&self) -> bool {
        self.face_up
    }

    /// Paint priority within the card's layer; higher draws in front.
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Sorting layer id taken from the slot the card was last placed in.
    #[must_use]
    pub fn layer(&self) -> i32 {
        self.layer
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }
}
