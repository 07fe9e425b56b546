//! Board slots: loose card stacks or Builds.

use serde::{Deserialize, Serialize};

use super::build::Build;
use crate::cards::{board_sum, Card};

/// One slot on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pile {
    /// Loose cards, in the order they were laid.
    Cards(Vec<Card>),
    /// An owned meld.
    Build(Build),
}

impl Pile {
    /// A pile of one loose card.
    #[must_use]
    pub fn single(card: Card) -> Self {
        Pile::Cards(vec![card])
    }

    /// The cards in this pile.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Pile::Cards(cards) => cards,
            Pile::Build(build) => &build.cards,
        }
    }

    /// Unwrap into the cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        match self {
            Pile::Cards(cards) => cards,
            Pile::Build(build) => build.cards,
        }
    }

    /// Capture value: a Build's declared value, or the sum of loose board values.
    #[must_use]
    pub fn value(&self) -> u32 {
        match self {
            Pile::Cards(cards) => board_sum(cards),
            Pile::Build(build) => build.value(),
        }
    }

    /// Sum of the cards' board values, ignoring any declared value.
    #[must_use]
    pub fn card_sum(&self) -> u32 {
        board_sum(self.cards())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    #[must_use]
    pub fn as_build(&self) -> Option<&Build> {
        match self {
            Pile::Build(build) => Some(build),
            Pile::Cards(_) => None,
        }
    }

    pub fn as_build_mut(&mut self) -> Option<&mut Build> {
        match self {
            Pile::Build(build) => Some(build),
            Pile::Cards(_) => None,
        }
    }

    #[must_use]
    pub fn is_build(&self) -> bool {
        matches!(self, Pile::Build(_))
    }

    /// The card of a loose one-card pile.
    #[must_use]
    pub fn loose_single(&self) -> Option<&Card> {
        match self {
            Pile::Cards(cards) if cards.len() == 1 => cards.first(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pile::Build(build) => write!(f, "{build}"),
            Pile::Cards(cards) => {
                let codes: Vec<String> = cards.iter().map(Card::code).collect();
                let prefix = if cards.len() > 1 { "+" } else { "" };
                write!(f, "{prefix}[{}]", codes.join(","))
            }
        }
    }
}
