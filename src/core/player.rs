//! Player identification, seats, and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index around the table, 0-based. Seat 0 is conventionally the
//! human player; the others follow clockwise.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Player
//!
//! A seat's role and its hand. The hand is ordered: insertion order is the
//! fan-out position.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::CardId;

/// Seat identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat `steps` places away, wrapping around the table.
    ///
    /// Negative steps walk counter-clockwise.
    ///
    /// ```
    /// use bartok::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(3).offset(1, 4), PlayerId::new(0));
    /// assert_eq!(PlayerId::new(0).offset(-1, 4), PlayerId::new(3));
    /// ```
    #[must_use]
    pub fn offset(self, steps: i32, player_count: usize) -> Self {
        let n = player_count as i32;
        Self((self.0 as i32 + steps).rem_euclid(n) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use bartok::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who is sitting in a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    /// Plays through `request_play` / `request_draw` from the host input layer.
    Human,
    /// Plays through the game's turn delegate.
    Computer,
}

/// A seat at the table: role plus ordered hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub role: PlayerRole,
    hand: Vec<CardId>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, role: PlayerRole) -> Self {
        Self {
            id,
            role,
            hand: Vec::new(),
        }
    }

    /// Cards in fan-out order.
    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.role == PlayerRole::Human
    }

    pub(crate) fn push_card(&mut self, card: CardId) {
        self.hand.push(card);
    }

    /// Remove a card, keeping the order of the rest. Returns `false` if absent.
    pub(crate) fn remove_card(&mut self, card: CardId) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(idx) => {
                self.hand.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_hand(&mut self) {
        self.hand.clear();
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ## Example
///
/// ```
/// use bartok::core::{PlayerId, PlayerMap};
///
/// let mut passes: PlayerMap<u32> = PlayerMap::with_value(4, 0);
/// passes[PlayerId::new(1)] += 1;
/// assert_eq!(passes[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
