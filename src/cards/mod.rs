//! Card identity, valuation, and the two-deck draw pile.
//!
//! - `Card`: suit + rank + deck copy, with board and hand valuations
//! - `Deck`: 104 cards, shuffled with a seeded `GameRng`

pub mod card;
pub mod deck;

pub use card::{board_sum, Card, Rank, Suit, SPECIAL_HAND_VALUES};
pub use deck::{Deck, DECK_SIZE};
