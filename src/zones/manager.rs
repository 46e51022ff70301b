//! Pile and hand manager.
//!
//! The `PileManager` owns the card arena and every container a card can be
//! in: the draw pile, the discard pile, the target slot and each seat's
//! hand. All card movement goes through it, so the location tag on a card
//! and the container holding it never disagree:
//!
//! 1. the card is detached from the container its tag names,
//! 2. its tag is rewritten,
//! 3. it is inserted into the new container and given a motion toward the
//!    new container's slot.
//!
//! Piles are persistent `im::Vector`s so snapshots of the table are O(1).

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::cards::{Card, CardId, CardLocation, CardState, Deck};
use crate::core::config::{LayoutConfig, CARD_HEIGHT};
use crate::core::{GameError, GameRng, PileKind, Player, PlayerId, PlayerMap, PlayerRole};
use crate::motion::{MotionCompleted, MotionEngine, MovePurpose, Pose, Quat, Vec3, TOWARD_VIEWER};

/// Stacking order step between consecutive discards.
pub const DISCARD_SORT_STRIDE: i32 = 4;
/// Stacking order step between adjacent cards in a hand.
pub const HAND_SORT_STRIDE: i32 = 4;
/// Stacking order step between draw pile cards (head in front).
pub const DRAW_SORT_STRIDE: i32 = 4;
/// Stacking order of the target card; above any discard of a 52-card deck.
pub const TARGET_SORT_ORDER: i32 = 1000;

type HandBuf = SmallVec<[CardId; 16]>;

/// Card locations and movement between piles, target and hands.
///
/// ## Usage
///
/// ```
/// use bartok::cards::{CardLocation, Deck};
/// use bartok::core::{LayoutConfig, PileKind, PlayerId, PlayerRole};
/// use bartok::motion::MotionEngine;
/// use bartok::zones::PileManager;
///
/// let deck = Deck::standard();
/// let roles = [PlayerRole::Human, PlayerRole::Computer];
/// let mut piles = PileManager::new(&deck, &roles, LayoutConfig::standard(2), 10.0).unwrap();
/// let mut motion = MotionEngine::new(deck.len());
///
/// let card = piles.draw(PileKind::Draw).unwrap();
/// piles.add_to_hand(&mut motion, PlayerId::new(1), card).unwrap();
///
/// assert_eq!(piles.card(card).unwrap().location(), CardLocation::Hand(PlayerId::new(1)));
/// assert_eq!(piles.draw_pile().len(), 51);
/// assert!(piles.is_consistent());
/// ```
#[derive(Clone, Debug)]
pub struct PileManager {
    cards: Vec<Card>,
    draw_pile: Vector<CardId>,
    discard_pile: Vector<CardId>,
    target: Option<CardId>,
    players: PlayerMap<Player>,
    layout: LayoutConfig,
    hand_fan_degrees: f32,
}

impl PileManager {
    /// Every card of `deck` face down in the draw pile, in deck order.
    pub fn new(
        deck: &Deck,
        roles: &[PlayerRole],
        layout: LayoutConfig,
        hand_fan_degrees: f32,
    ) -> Result<Self, GameError> {
        layout.validate(roles.len())?;
        if roles.is_empty() {
            return Err(GameError::InvalidConfig("table has no seats".into()));
        }

        let cards: Vec<Card> = deck.iter().map(|(id, def)| Card::new(id, def.clone())).collect();
        let draw_pile = cards.iter().map(Card::id).collect();
        let players = PlayerMap::new(roles.len(), |id| Player::new(id, roles[id.index()]));

        let mut manager = Self {
            cards,
            draw_pile,
            discard_pile: Vector::new(),
            target: None,
            players,
            layout,
            hand_fan_degrees,
        };
        manager.snap_draw_pile();
        Ok(manager)
    }

    // === Queries ===

    /// The card arena, indexed by `CardId`.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Advance every card's motion to `now`; see [`MotionEngine::tick`].
    pub fn advance(&mut self, motion: &mut MotionEngine, now: f32) -> Vec<MotionCompleted> {
        motion.tick(now, &mut self.cards)
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Draw pile, head (next to draw) first.
    #[must_use]
    pub fn draw_pile(&self) -> &Vector<CardId> {
        &self.draw_pile
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardId> {
        &self.discard_pile
    }

    #[must_use]
    pub fn target(&self) -> Option<CardId> {
        self.target
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// A seat's hand in fan order; empty for unknown seats.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[CardId] {
        self.players.get(player).map_or(&[], Player::hand)
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Size of the card arena (the full deck).
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Cards currently held by some container.
    #[must_use]
    pub fn counted_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + usize::from(self.target.is_some())
            + self.players.values().map(Player::hand_size).sum::<usize>()
    }

    /// Every card sits in exactly the container its location tag names, and
    /// the containers hold the whole deck.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![0u8; self.cards.len()];
        let mut tally = |id: CardId, expected: CardLocation| -> bool {
            match (self.cards.get(id.index()), seen.get_mut(id.index())) {
                (Some(card), Some(count)) => {
                    *count += 1;
                    card.location == expected
                }
                _ => false,
            }
        };

        let draw_ok = self.draw_pile.iter().all(|&id| tally(id, CardLocation::DrawPile));
        let discard_ok = self.discard_pile.iter().all(|&id| tally(id, CardLocation::Discard));
        let target_ok = self.target.map_or(true, |id| tally(id, CardLocation::Target));
        let hands_ok = self
            .players
            .iter()
            .all(|(pid, p)| p.hand().iter().all(|&id| tally(id, CardLocation::Hand(pid))));

        draw_ok && discard_ok && target_ok && hands_ok && seen.iter().all(|&n| n == 1)
    }

    // === Movement ===

    /// Remove and return the head card of a pile.
    ///
    /// The card is out of every container until the caller places it with
    /// [`add_to_hand`](Self::add_to_hand), [`move_to_target`](Self::move_to_target)
    /// or [`move_to_discard`](Self::move_to_discard).
    pub fn draw(&mut self, pile: PileKind) -> Result<CardId, GameError> {
        let source = match pile {
            PileKind::Draw => &mut self.draw_pile,
            PileKind::Discard => &mut self.discard_pile,
        };
        source.pop_front().ok_or(GameError::EmptyPile(pile))
    }

    /// Append a card to a seat's hand and re-fan that hand.
    pub fn add_to_hand(
        &mut self,
        motion: &mut MotionEngine,
        player: PlayerId,
        card: CardId,
    ) -> Result<(), GameError> {
        self.check_card(card)?;
        if self.players.get(player).is_none() {
            return Err(GameError::InvalidConfig(format!("no seat for {player}")));
        }

        let previous = self.detach(card);
        self.cards[card.index()].location = CardLocation::Hand(player);
        self.players[player].push_card(card);
        debug!(card = %card, player = %player, "card to hand");

        self.refan_after(motion, previous, Some(player))?;
        self.fan_hand(motion, player)
    }

    /// Put a card face up on top of the discard pile.
    pub fn move_to_discard(&mut self, motion: &mut MotionEngine, card: CardId) -> Result<(), GameError> {
        self.check_card(card)?;

        let previous = self.detach(card);
        self.discard_pile.push_back(card);
        let order = self.discard_pile.len() as i32 * DISCARD_SORT_STRIDE;
        let end = self.layout.anchor(&self.layout.discard_pile) + TOWARD_VIEWER * 0.5;
        let layer = self.layout.discard_pile.layer_id;

        let c = &mut self.cards[card.index()];
        c.location = CardLocation::Discard;
        c.face_up = true;
        c.sort_order = order;
        c.layer = layer;
        motion.begin_move(c, Pose::at(end), MovePurpose::Discard)?;
        debug!(card = %card, order, "card to discard");

        self.refan_after(motion, previous, None)
    }

    /// Make a card the target. A previous target goes to the discard pile
    /// first; making the current target the target again does nothing.
    pub fn move_to_target(&mut self, motion: &mut MotionEngine, card: CardId) -> Result<(), GameError> {
        self.check_card(card)?;
        if self.target == Some(card) {
            return Ok(());
        }
        if let Some(previous_target) = self.target {
            self.move_to_discard(motion, previous_target)?;
        }

        let previous = self.detach(card);
        self.target = Some(card);
        let end = self.layout.anchor(&self.layout.target) + TOWARD_VIEWER;
        let layer = self.layout.target.layer_id;

        let c = &mut self.cards[card.index()];
        c.location = CardLocation::Target;
        c.face_up = true;
        c.sort_order = TARGET_SORT_ORDER;
        c.layer = layer;
        motion.begin_move(c, Pose::at(end), MovePurpose::Target)?;
        debug!(card = %card, "new target");

        self.refan_after(motion, previous, None)
    }

    /// Shuffle the draw pile in place and lay it out again.
    pub fn shuffle_draw_pile(&mut self, motion: &mut MotionEngine, rng: &mut GameRng) {
        let mut order: Vec<CardId> = self.draw_pile.iter().copied().collect();
        rng.shuffle(&mut order);
        self.draw_pile = order.into_iter().collect();
        self.halt_draw_pile(motion);
        self.snap_draw_pile();
    }

    /// Move the whole discard pile under the draw pile and shuffle. The
    /// target stays where it is. Returns how many cards were recovered.
    pub fn reshuffle_discard(&mut self, motion: &mut MotionEngine, rng: &mut GameRng) -> usize {
        let recovered = std::mem::take(&mut self.discard_pile);
        let count = recovered.len();
        for &id in &recovered {
            self.cards[id.index()].location = CardLocation::DrawPile;
        }
        self.draw_pile.append(recovered);
        self.shuffle_draw_pile(motion, rng);
        info!(count, draw_pile = self.draw_pile.len(), "discard pile reshuffled into draw pile");
        count
    }

    /// Return every card to the draw pile in deck order and forget all
    /// motion.
    pub fn gather(&mut self, motion: &mut MotionEngine) {
        motion.clear();
        for (_, player) in self.players.iter_mut() {
            player.clear_hand();
        }
        self.discard_pile = Vector::new();
        self.target = None;
        self.draw_pile = self.cards.iter().map(Card::id).collect();
        self.snap_draw_pile();
    }

    // === Internals ===

    fn check_card(&self, card: CardId) -> Result<(), GameError> {
        if card.index() < self.cards.len() {
            Ok(())
        } else {
            Err(GameError::UnknownCard(card))
        }
    }

    /// Take the card out of the container its tag names. Returns that tag.
    fn detach(&mut self, card: CardId) -> CardLocation {
        let location = self.cards[card.index()].location;
        match location {
            CardLocation::DrawPile => remove_from(&mut self.draw_pile, card),
            CardLocation::Discard => remove_from(&mut self.discard_pile, card),
            CardLocation::Target => {
                if self.target == Some(card) {
                    self.target = None;
                }
            }
            CardLocation::Hand(player) => {
                if let Some(p) = self.players.get_mut(player) {
                    p.remove_card(card);
                }
            }
        }
        location
    }

    /// Close the gap in a hand the card just left.
    fn refan_after(
        &mut self,
        motion: &mut MotionEngine,
        previous: CardLocation,
        now_in: Option<PlayerId>,
    ) -> Result<(), GameError> {
        match previous {
            CardLocation::Hand(player) if Some(player) != now_in => self.fan_hand(motion, player),
            _ => Ok(()),
        }
    }

    /// Lay a hand out as a fan around its slot.
    ///
    /// Card `i` of `n` is rotated `slot.rot + fan·(n-1)/2 - fan·i` degrees and
    /// sits half a card height out from the slot along that rotation, each
    /// card slightly in front of the previous one.
    fn fan_hand(&mut self, motion: &mut MotionEngine, player: PlayerId) -> Result<(), GameError> {
        let Some(slot) = self.layout.hand_slot(player) else {
            return Err(GameError::InvalidConfig(format!("no hand slot for {player}")));
        };
        let anchor = self.layout.anchor(slot);
        let layer = slot.layer_id;
        let hand: HandBuf = self.players[player].hand().iter().copied().collect();
        let face_up = self.players[player].is_human();

        let fan = self.hand_fan_degrees;
        let mut start_rot = slot.rot;
        if hand.len() > 1 {
            start_rot += fan * (hand.len() - 1) as f32 / 2.0;
        }

        for (i, &id) in hand.iter().enumerate() {
            let rotation = Quat::from_rotation_z((start_rot - fan * i as f32).to_radians());
            let mut position = rotation * (Vec3::Y * (CARD_HEIGHT / 2.0)) + anchor;
            position.z = anchor.z - 0.5 * i as f32;

            let card = &mut self.cards[id.index()];
            card.face_up = face_up;
            card.sort_order = i as i32 * HAND_SORT_STRIDE;
            card.layer = layer;
            motion.begin_move(card, Pose::new(position, rotation), MovePurpose::Hand)?;
        }
        Ok(())
    }

    fn halt_draw_pile(&self, motion: &mut MotionEngine) {
        for &id in &self.draw_pile {
            motion.halt(id);
        }
    }

    /// Place draw pile cards directly (no animation): head in front, each
    /// later card offset by the slot stagger and pushed back.
    fn snap_draw_pile(&mut self) {
        let slot = &self.layout.draw_pile;
        let anchor = self.layout.anchor(slot);
        let (stagger, layer) = (slot.stagger, slot.layer_id);

        for (i, &id) in self.draw_pile.iter().enumerate() {
            let offset = Vec3::new(stagger.x * i as f32, stagger.y * i as f32, 0.1 * i as f32);
            let card = &mut self.cards[id.index()];
            card.location = CardLocation::DrawPile;
            card.state = CardState::DrawPile;
            card.face_up = false;
            card.sort_order = -(i as i32) * DRAW_SORT_STRIDE;
            card.layer = layer;
            card.pose = Pose::at(anchor + offset);
        }
    }
}

fn remove_from(pile: &mut Vector<CardId>, card: CardId) {
    if let Some(idx) = pile.index_of(&card) {
        pile.remove(idx);
    }
}
