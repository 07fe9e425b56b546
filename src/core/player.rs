//! Player identification, per-player data storage, and seat state.
//!
//! ## PlayerId
//!
//! Seat index, 0-based. Seat 0 is the human seat by convention.
//!
//! ## PlayerMap
//!
//! Per-seat data backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! Hand, captured pile, mulle registry and tabbe counter for one seat.
//! Everything except the identity is reset at round boundaries.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::Card;

/// Seat identifier.
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

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use mulle_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The next seat clockwise.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use mulle_engine::core::{PlayerId, PlayerMap};
///
/// let mut totals: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// totals[PlayerId::new(1)] += 7;
/// assert_eq!(totals[PlayerId::new(1)], 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

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

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cards in hand (a multiset; order is deal order).
    pub hand: Vec<Card>,
    /// Every card captured this round, in capture order.
    pub captured: Vec<Card>,
    /// One representative card per mulle pair captured this round.
    pub mulles: Vec<Card>,
    /// Captures this round that left the board empty.
    pub tabbe: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            captured: Vec::new(),
            mulles: Vec::new(),
            tabbe: 0,
        }
    }

    pub fn add_to_hand(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Remove a card by identity. Returns `false` if it was not in hand.
    pub fn remove_from_hand(&mut self, card: &Card) -> bool {
        match self.hand.iter().position(|c| c.same_identity(card)) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Is this exact card (including deck copy) in hand?
    #[must_use]
    pub fn holds(&self, card: &Card) -> bool {
        self.hand.iter().any(|c| c.same_identity(card))
    }

    pub fn record_capture(&mut self, cards: &[Card]) {
        self.captured.extend_from_slice(cards);
    }

    pub fn record_mulle(&mut self, card: Card) {
        self.mulles.push(card);
    }

    /// Sum of mulle points (Ace = 14, others = board value).
    #[must_use]
    pub fn total_mulle_points(&self) -> u32 {
        self.mulles.iter().map(|c| c.rank.mulle_points()).sum()
    }

    /// Clear hand, captured, mulles and tabbe. Identity is kept.
    pub fn reset_round(&mut self) {
        self.hand.clear();
        self.captured.clear();
        self.mulles.clear();
        self.tabbe = 0;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
