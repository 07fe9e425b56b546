//! The two-deck draw pile.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::error::InternalError;
use crate::core::rng::GameRng;

/// Number of cards in a fresh deck (two standard 52-card sets).
pub const DECK_SIZE: usize = 104;

/// Shuffled draw pile. The top of the deck is the end of the vec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Both card sets in deck order, unshuffled.
    #[must_use]
    pub fn ordered() -> Self {
        let cards = (0..2u8)
            .flat_map(|copy| {
                Suit::ALL.into_iter().flat_map(move |suit| {
                    Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank, copy))
                })
            })
            .collect();
        Self { cards }
    }

    /// A fresh deck shuffled with the given RNG.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::ordered();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Result<Card, InternalError> {
        self.cards.pop().ok_or(InternalError::DeckExhausted)
    }

    /// Draw up to `count` cards, stopping early if the deck runs out.
    pub fn draw_many(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let mut drawn = self.cards.split_off(self.cards.len() - take);
        // Keep draw order: top card first
        drawn.reverse();
        drawn
    }

    /// Cards left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
