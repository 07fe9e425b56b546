//! Card identity and valuation.
//!
//! A card is identified by suit, rank and the copy index of the physical deck
//! it came from. Two cards with the same suit and rank but different copies
//! look the same on the table (see [`Card::same_appearance`]) but are distinct
//! cards (see [`Card::same_identity`]).
//!
//! ## Valuation
//!
//! | Card        | Board value | Hand value |
//! |-------------|-------------|------------|
//! | Ace         | 1           | 14         |
//! | Spader 2    | 2           | 15         |
//! | Ruter 10    | 10          | 16         |
//! | Knight (J)  | 11          | 11         |
//! | Queen       | 12          | 12         |
//! | King        | 13          | 13         |
//! | other 2..10 | face value  | face value |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ParseCardError;

/// Hand values that can only be captured through a Build of the same value.
pub const SPECIAL_HAND_VALUES: [u32; 3] = [14, 15, 16];

/// Card suits, using the Swedish suit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    /// Klöver (clubs).
    Klover,
    /// Spader (spades).
    Spader,
    /// Hjärter (hearts).
    Hjarter,
    /// Ruter (diamonds).
    Ruter,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Klover, Suit::Spader, Suit::Hjarter, Suit::Ruter];

    /// Two-letter suit code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Suit::Klover => "KL",
            Suit::Spader => "SP",
            Suit::Hjarter => "HJ",
            Suit::Ruter => "RU",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Card ranks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in deck order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank on the board (Ace = 1).
    #[must_use]
    pub const fn board_value(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    /// Points for a mulle of this rank (Ace = 14, others = board value).
    #[must_use]
    pub const fn mulle_points(self) -> u32 {
        match self {
            Rank::Ace => 14,
            other => other.board_value(),
        }
    }

    /// Short label used in card codes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn from_label(label: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A physical card. Values are pure functions of identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    /// Which of the two decks this card came from (0 or 1).
    pub copy: u8,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank, copy: u8) -> Self {
        Self { suit, rank, copy }
    }

    /// Same card from another deck copy.
    #[must_use]
    pub const fn with_copy(self, copy: u8) -> Self {
        Self { copy, ..self }
    }

    /// Value when lying on the board.
    #[must_use]
    pub const fn board_value(&self) -> u32 {
        self.rank.board_value()
    }

    /// Value when played from hand as a capture target.
    #[must_use]
    pub const fn hand_value(&self) -> u32 {
        match (self.suit, self.rank) {
            (_, Rank::Ace) => 14,
            (Suit::Spader, Rank::Two) => 15,
            (Suit::Ruter, Rank::Ten) => 16,
            (_, rank) => rank.board_value(),
        }
    }

    /// True if the hand value can only capture a Build.
    #[must_use]
    pub fn has_special_hand_value(&self) -> bool {
        SPECIAL_HAND_VALUES.contains(&self.hand_value())
    }

    /// Suit + rank label, e.g. `"SP A"`. Ignores the deck copy.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{} {}", self.suit, self.rank)
    }

    /// Full identity match, including deck copy.
    #[must_use]
    pub fn same_identity(&self, other: &Card) -> bool {
        self == other
    }

    /// Suit and rank match, regardless of deck copy.
    #[must_use]
    pub fn same_appearance(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.suit, self.rank)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parse `"SP5"`, `"SP 5"`, `"RU10"` or `"KLA"`. The copy index is 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() < 3 || !trimmed.is_char_boundary(2) {
            return Err(ParseCardError(s.to_string()));
        }
        let (suit_code, rank_label) = trimmed.split_at(2);
        let suit = Suit::ALL
            .into_iter()
            .find(|suit| suit.code().eq_ignore_ascii_case(suit_code))
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank = Rank::from_label(&rank_label.trim().to_ascii_uppercase())
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(Card::new(suit, rank, 0))
    }
}

/// Sum of board values.
#[must_use]
pub fn board_sum(cards: &[Card]) -> u32 {
    cards.iter().map(Card::board_value).sum()
}
