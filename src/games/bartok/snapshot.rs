//! Read-only render frames of the table.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::TurnPhase;
use crate::cards::{Card, CardId, CardLocation, CardState, Rank, Suit};
use crate::core::{GameError, PlayerId, PlayerMap};
use crate::motion::{Quat, Vec3};

/// What the display layer needs to draw one card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
    pub position: Vec3,
    pub rotation: Quat,
    pub face_up: bool,
    /// Paint priority within the layer; higher draws in front.
    pub sort_order: i32,
    pub layer: i32,
    pub location: CardLocation,
    pub state: CardState,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        let pose = card.pose();
        Self {
            id: card.id(),
            rank: card.rank(),
            suit: card.suit(),
            position: pose.position,
            rotation: pose.rotation,
            face_up: card.face_up(),
            sort_order: card.sort_order(),
            layer: card.layer(),
            location: card.location(),
            state: card.state(),
        }
    }
}

/// Whole-table frame: phase, turn, containers and every card view.
///
/// Piles are persistent vectors, so taking a snapshot every frame is cheap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: TurnPhase,
    pub current_player: PlayerId,
    pub winner: Option<PlayerId>,
    pub clock: f32,
    pub draw_pile: Vector<CardId>,
    pub discard_pile: Vector<CardId>,
    pub target: Option<CardId>,
    pub hands: PlayerMap<Vec<CardId>>,
    pub cards: Vec<CardView>,
}

impl TableSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Cards in paint order: by layer, then stacking order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<CardView> {
        let mut views = self.cards.clone();
        views.sort_by_key(|v| (v.layer, v.sort_order));
        views
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardView> {
        self.cards.get(id.index())
    }
}
