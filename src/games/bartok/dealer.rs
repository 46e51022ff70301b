//! Shuffling and dealing.

use tracing::{debug, info};

use crate::cards::CardId;
use crate::core::{GameError, GameRng, PileKind, PlayerId};
use crate::motion::MotionEngine;
use crate::zones::PileManager;

/// Uniform in-place permutation (Fisher–Yates), deterministic for a seed.
pub fn shuffle(cards: &mut [CardId], rng: &mut GameRng) {
    rng.shuffle(cards);
}

/// Recipient and stagger slot of every dealt card, in deal order.
///
/// Round `i`, seat `j` deals to `(j + 1) % player_count`, so the seat after
/// the human is dealt first and the human last in each round. The slot is
/// `i * player_count + j`.
pub fn deal_order(cards_per_player: usize, player_count: usize) -> impl Iterator<Item = (PlayerId, usize)> {
    (0..cards_per_player).flat_map(move |round| {
        (0..player_count).map(move |seat| {
            let player = PlayerId::new(((seat + 1) % player_count) as u8);
            (player, round * player_count + seat)
        })
    })
}

/// Deal `cards_per_player` cards to every seat from the draw pile head.
///
/// Each card's move starts `stagger` seconds after the previous one,
/// measured from the engine clock. Returns the last card dealt, or `None`
/// when nothing was dealt. Fails with [`GameError::EmptyPile`] before
/// touching anything if the draw pile cannot cover the whole deal.
pub fn deal(
    piles: &mut PileManager,
    motion: &mut MotionEngine,
    cards_per_player: usize,
    stagger: f32,
) -> Result<Option<CardId>, GameError> {
    let players = piles.player_count();
    let needed = cards_per_player * players;
    if piles.draw_pile().len() < needed {
        return Err(GameError::EmptyPile(PileKind::Draw));
    }

    let now = motion.clock();
    let mut last = None;
    for (player, slot) in deal_order(cards_per_player, players) {
        let card = piles.draw(PileKind::Draw)?;
        motion.set_start_time(card, now + stagger * slot as f32);
        piles.add_to_hand(motion, player, card)?;
        debug!(card = %card, player = %player, slot, "dealt");
        last = Some(card);
    }

    info!(players, cards_per_player, draw_pile = piles.draw_pile().len(), "deal scheduled");
    Ok(last)
}
