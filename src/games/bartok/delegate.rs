//! Computer-seat decision hook.

use std::fmt;

use crate::cards::{Card, CardId};
use crate::core::{GameRng, PlayerId};

/// What a seat does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnChoice {
    Play(CardId),
    Draw,
}

/// Everything a delegate may look at when choosing.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    pub player: PlayerId,
    pub hand: &'a [CardId],
    /// Cards of `hand` the rules accept right now, in hand order.
    pub legal: &'a [CardId],
    pub target: Option<CardId>,
    /// Card arena, indexed by `CardId`.
    pub cards: &'a [Card],
}

/// Chooses moves for computer-controlled seats.
///
/// Called from `tick` once the seat's think time has elapsed. A choice the
/// rules reject is logged and replaced with a draw.
pub trait TurnDelegate: fmt::Debug {
    fn choose(&mut self, view: &TurnView<'_>, rng: &mut GameRng) -> TurnChoice;
}

/// Play the leftmost legal card, otherwise draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalPlay;

impl TurnDelegate for FirstLegalPlay {
    fn choose(&mut self, view: &TurnView<'_>, _rng: &mut GameRng) -> TurnChoice {
        view.legal.first().map_or(TurnChoice::Draw, |&card| TurnChoice::Play(card))
    }
}

/// Play a uniformly random legal card, otherwise draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomLegalPlay;

impl TurnDelegate for RandomLegalPlay {
    fn choose(&mut self, view: &TurnView<'_>, rng: &mut GameRng) -> TurnChoice {
        rng.choose(view.legal).map_or(TurnChoice::Draw, |&card| TurnChoice::Play(card))
    }
}
