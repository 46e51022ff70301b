//! Deck registry: the full card list for a match.
//!
//! The `Deck` is built once from the loader's card definition list and never
//! changes during a match. It assigns each definition a `CardId` (its index)
//! and supports lookup by face name for the input layer.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::core::GameError;

/// Immutable, indexed card list.
///
/// ## Example
///
/// ```
/// use bartok::cards::{CardDefinition, Deck};
///
/// let deck = Deck::new(CardDefinition::standard_deck()).unwrap();
/// let id = deck.find("H13").unwrap();
/// assert_eq!(deck.get(id).unwrap().name(), "H13");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Deck {
    definitions: Vec<CardDefinition>,
    by_name: FxHashMap<String, CardId>,
}

impl Deck {
    /// Index a definition list. Rejects empty lists and duplicate names.
    pub fn new(definitions: Vec<CardDefinition>) -> Result<Self, GameError> {
        if definitions.is_empty() {
            return Err(GameError::InvalidConfig("deck has no cards".into()));
        }
        if definitions.len() > u16::MAX as usize {
            return Err(GameError::InvalidConfig(format!(
                "deck has {} cards, at most {} supported",
                definitions.len(),
                u16::MAX
            )));
        }

        let mut by_name = FxHashMap::default();
        for (idx, def) in definitions.iter().enumerate() {
            if by_name.insert(def.name(), CardId(idx as u16)).is_some() {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate card {} in deck",
                    def.name()
                )));
            }
        }

        Ok(Self {
            definitions,
            by_name,
        })
    }

    /// The standard 52-card deck.
    #[must_use]
    pub fn standard() -> Self {
        let definitions = CardDefinition::standard_deck();
        let by_name = definitions
            .iter()
            .enumerate()
            .map(|(idx, def)| (def.name(), CardId(idx as u16)))
            .collect();
        Self {
            definitions,
            by_name,
        }
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.definitions.get(id.index())
    }

    /// Look up a card by face name (`"C7"`).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over (CardId, definition) in deck order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(idx, def)| (CardId(idx as u16), def))
    }
}
