//! Play-validation rules.
//!
//! Rules decide whether a card may be laid on the current target. They are
//! pure: validation never mutates anything, so a rejected play leaves the
//! table exactly as it was.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Rank};

/// Rules engine trait.
///
/// Games implement this trait to define which plays are legal.
pub trait PlayRules {
    /// May `card` be played onto `target`? With no target every card is legal.
    fn can_play(&self, card: &Card, target: Option<&Card>) -> bool;

    /// Cards of `hand` that are legal right now, in hand order.
    ///
    /// `cards` is the card arena indexed by `CardId`.
    fn legal_plays(&self, hand: &[CardId], cards: &[Card], target: Option<CardId>) -> Vec<CardId> {
        let target = target.and_then(|t| cards.get(t.index()));
        hand.iter()
            .copied()
            .filter(|id| cards.get(id.index()).is_some_and(|card| self.can_play(card, target)))
            .collect()
    }
}

/// Built-in rule sets, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleSet {
    /// Classic Bartok: same rank or same suit as the target.
    #[default]
    MatchRankOrSuit,
    /// Same rank or suit, and any eight is wild.
    CrazyEights,
}

impl PlayRules for RuleSet {
    fn can_play(&self, card: &Card, target: Option<&Card>) -> bool {
        let Some(target) = target else {
            return true;
        };
        let matches = card.rank() == target.rank() || card.suit() == target.suit();
        match self {
            RuleSet::MatchRankOrSuit => matches,
            RuleSet::CrazyEights => matches || card.rank() == Rank::EIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Suit};

    fn card(id: u16, rank: u8, suit: Suit) -> Card {
        Card::new(CardId(id), CardDefinition::new(Rank::new(rank).unwrap(), suit))
    }

    #[test]
    fn test_rank_or_suit() {
        let target = card(0, 7, Suit::Hearts);
        let rules = RuleSet::MatchRankOrSuit;

        assert!(rules.can_play(&card(1, 7, Suit::Spades), Some(&target)));
        assert!(rules.can_play(&card(2, 2, Suit::Hearts), Some(&target)));
        assert!(!rules.can_play(&card(3, 8, Suit::Clubs), Some(&target)));
        assert!(rules.can_play(&card(3, 8, Suit::Clubs), None));
    }

    #[test]
    fn test_crazy_eights_wild() {
        let target = card(0, 7, Suit::Hearts);
        let rules = RuleSet::CrazyEights;

        assert!(rules.can_play(&card(1, 8, Suit::Clubs), Some(&target)));
        assert!(!rules.can_play(&card(2, 9, Suit::Clubs), Some(&target)));
    }

    #[test]
    fn test_legal_plays_keeps_hand_order() {
        let cards = vec![
            card(0, 5, Suit::Diamonds),
            card(1, 5, Suit::Clubs),
            card(2, 12, Suit::Spades),
            card(3, 1, Suit::Diamonds),
        ];
        let hand = [CardId(3), CardId(2), CardId(1)];

        let legal = RuleSet::MatchRankOrSuit.legal_plays(&hand, &cards, Some(CardId(0)));
        assert_eq!(legal, vec![CardId(3), CardId(1)]);

        let legal = RuleSet::MatchRankOrSuit.legal_plays(&hand, &cards, None);
        assert_eq!(legal, hand.to_vec());
    }
}
