//! Owned, value-declared melds.

use serde::{Deserialize, Serialize};

use crate::cards::{board_sum, Card};
use crate::core::PlayerId;

/// A meld on the board with a declared target value.
///
/// An open Build can be extended by its owner. Once locked, cards can only be
/// appended through trotta (or a feeding discard); cards are never removed and
/// the owner never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub cards: Vec<Card>,
    pub owner: PlayerId,
    pub target_value: u32,
    pub locked: bool,
    pub created_round: u32,
}

impl Build {
    #[must_use]
    pub fn new(cards: Vec<Card>, owner: PlayerId, target_value: u32, created_round: u32) -> Self {
        Self {
            cards,
            owner,
            target_value,
            locked: false,
            created_round,
        }
    }

    /// Same as [`Build::new`] but already locked.
    #[must_use]
    pub fn new_locked(cards: Vec<Card>, owner: PlayerId, target_value: u32, created_round: u32) -> Self {
        Self {
            locked: true,
            ..Self::new(cards, owner, target_value, created_round)
        }
    }

    /// The capture value. Always the declared target.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.target_value
    }

    /// Sum of the cards' board values (may differ from `value` for up/down builds).
    #[must_use]
    pub fn card_sum(&self) -> u32 {
        board_sum(&self.cards)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a card through trotta. Allowed on locked builds; always locks.
    pub fn add_trotta_card(&mut self, card: Card) {
        self.cards.push(card);
        self.locked = true;
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }
}

impl std::fmt::Display for Build {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.locked { "LOCK" } else { "OPEN" };
        let codes: Vec<String> = self.cards.iter().map(Card::code).collect();
        write!(
            f,
            "Build({state}, owner={}, v={}, cards=[{}])",
            self.owner,
            self.target_value,
            codes.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_new_build_is_open() {
        let cards = vec![
            Card::new(Suit::Spader, Rank::Three, 0),
            Card::new(Suit::Hjarter, Rank::Four, 0),
        ];
        let build = Build::new(cards, PlayerId::new(0), 7, 1);

        assert!(!build.locked);
        assert_eq!(build.value(), 7);
        assert_eq!(build.card_sum(), 7);
        assert_eq!(build.len(), 2);
    }

    #[test]
    fn test_declared_value_differs_from_card_sum() {
        let cards = vec![Card::new(Suit::Spader, Rank::Ace, 0), Card::new(Suit::Klover, Rank::Ace, 0)];
        let build = Build::new(cards, PlayerId::new(1), 14, 2);

        assert_eq!(build.value(), 14);
        assert_eq!(build.card_sum(), 2);
    }

    #[test]
    fn test_trotta_card_locks() {
        let mut build = Build::new(vec![Card::new(Suit::Ruter, Rank::Six, 0)], PlayerId::new(0), 6, 1);
        build.add_trotta_card(Card::new(Suit::Klover, Rank::Six, 1));

        assert!(build.locked);
        assert_eq!(build.len(), 2);

        // Still accepted once locked
        build.add_trotta_card(Card::new(Suit::Hjarter, Rank::Six, 0));
        assert_eq!(build.len(), 3);
        assert_eq!(build.value(), 6);
    }

    #[test]
    fn test_display() {
        let build = Build::new_locked(vec![Card::new(Suit::Spader, Rank::King, 0)], PlayerId::new(1), 13, 1);
        assert_eq!(build.to_string(), "Build(LOCK, owner=Player 1, v=13, cards=[SP K])");
    }
}
