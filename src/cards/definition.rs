//! Card definitions - static card identity.
//!
//! `CardDefinition` holds what never changes about a card: rank, suit and
//! the face sprite name the display layer draws. Where the card is and how
//! it is moving lives in `Card`.

use serde::{Deserialize, Serialize};

/// Identifier of a physical card in the match. Doubles as the card's index
/// into the card arena and the motion arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rank, 1 (ace) through 13 (king).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const EIGHT: Rank = Rank(8);
    pub const KING: Rank = Rank(13);

    /// `None` outside 1..=13.
    #[must_use]
    pub const fn new(rank: u8) -> Option<Self> {
        if rank >= 1 && rank <= 13 {
            Some(Self(rank))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Single-letter code used in face names ("C", "D", "H", "S").
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Suit::ALL.into_iter().find(|s| s.letter() == letter.to_ascii_uppercase())
    }
}

/// Static card definition supplied by the deck loader.
///
/// ```
/// use bartok::cards::{CardDefinition, Rank, Suit};
///
/// let seven = CardDefinition::new(Rank::new(7).unwrap(), Suit::Clubs);
/// assert_eq!(seven.name(), "C7");
/// assert_eq!(seven.face, "C7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefinition {
    pub rank: Rank,
    pub suit: Suit,
    /// Face sprite id for the display layer.
    pub face: String,
}

impl CardDefinition {
    /// A definition whose face sprite id is the card's name.
    #[must_use]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        let mut def = Self {
            rank,
            suit,
            face: String::new(),
        };
        def.face = def.name();
        def
    }

    #[must_use]
    pub fn with_face(mut self, face: impl Into<String>) -> Self {
        self.face = face.into();
        self
    }

    /// Suit letter followed by rank, e.g. `"H13"` for the king of hearts.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.suit.letter(), self.rank)
    }

    /// Parse a name produced by [`CardDefinition::name`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let suit = Suit::from_letter(chars.next()?)?;
        let rank = Rank::new(chars.as_str().parse().ok()?)?;
        Some(Self::new(rank, suit))
    }

    /// The 52-card standard deck, suit by suit, ace to king.
    #[must_use]
    pub fn standard_deck() -> Vec<CardDefinition> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::all().map(move |rank| CardDefinition::new(rank, suit)))
            .collect()
    }
}
