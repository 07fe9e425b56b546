//! Game configuration.
//!
//! ```
//! use mulle_engine::core::GameConfig;
//!
//! let config = GameConfig::new(["Anna", "Bo"]).with_seed(7).with_cards_per_deal(6);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.rounds_to_win, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::error::MulleError;
use crate::cards::DECK_SIZE;

/// Fewest seats a game can have.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a game can have.
pub const MAX_PLAYERS: usize = 8;

/// Engine construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seat names in seating order. Seat 0 is the human seat.
    pub player_names: Vec<String>,

    /// Cards dealt to each player per deal (default: 8).
    pub cards_per_deal: usize,

    /// Round total that ends the game (default: 3).
    pub rounds_to_win: u32,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Loose cards laid on the board on a round's first deal (default: 8).
    pub initial_board_size: usize,
}

impl GameConfig {
    /// Default configuration for the given seat names.
    pub fn new<S: Into<String>>(player_names: impl IntoIterator<Item = S>) -> Self {
        Self {
            player_names: player_names.into_iter().map(Into::into).collect(),
            cards_per_deal: 8,
            rounds_to_win: 3,
            seed: None,
            initial_board_size: 8,
        }
    }

    #[must_use]
    pub fn with_cards_per_deal(mut self, count: usize) -> Self {
        self.cards_per_deal = count;
        self
    }

    #[must_use]
    pub fn with_rounds_to_win(mut self, threshold: u32) -> Self {
        self.rounds_to_win = threshold;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_initial_board_size(mut self, size: usize) -> Self {
        self.initial_board_size = size;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Cards consumed by a round's first deal.
    #[must_use]
    pub fn first_deal_size(&self) -> usize {
        self.player_count() * self.cards_per_deal + self.initial_board_size
    }

    /// Check that a round can be dealt with these parameters.
    pub fn validate(&self) -> Result<(), MulleError> {
        let players = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(MulleError::InvalidConfig(format!(
                "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {players}"
            )));
        }
        if self.cards_per_deal == 0 {
            return Err(MulleError::InvalidConfig(
                "cards per deal must be at least 1".to_string(),
            ));
        }
        if self.first_deal_size() > DECK_SIZE {
            return Err(MulleError::InvalidConfig(format!(
                "first deal needs {} cards, deck has {DECK_SIZE}",
                self.first_deal_size()
            )));
        }
        Ok(())
    }
}
