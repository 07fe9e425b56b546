//! The board: an ordered list of piles, and the Build construction algorithm.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::build::Build;
use super::pile::Pile;
use crate::cards::{board_sum, Card};
use crate::core::{IllegalAction, PlayerId};
use crate::rules::search::{max_disjoint_subsets, SubsetOrder};

/// Ordered board piles. Piles are addressed by their current index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    piles: Vec<Pile>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board with the given piles, in order.
    #[must_use]
    pub fn from_piles(piles: Vec<Pile>) -> Self {
        Self { piles }
    }

    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    #[must_use]
    pub fn pile(&self, index: usize) -> Option<&Pile> {
        self.piles.get(index)
    }

    pub fn pile_mut(&mut self, index: usize) -> Option<&mut Pile> {
        self.piles.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// Lay a card as a new one-card pile.
    pub fn add_card(&mut self, card: Card) {
        self.piles.push(Pile::single(card));
    }

    /// Lay loose cards as one new pile.
    pub fn add_pile(&mut self, cards: Vec<Card>) {
        self.piles.push(Pile::Cards(cards));
    }

    /// Push any pile (loose or Build).
    pub fn push_pile(&mut self, pile: Pile) {
        self.piles.push(pile);
    }

    /// Remove and return the pile at `index`.
    pub fn remove_pile(&mut self, index: usize) -> Option<Pile> {
        (index < self.piles.len()).then(|| self.piles.remove(index))
    }

    /// Remove several piles, returning them in the order the indices were given.
    ///
    /// Duplicate indices are removed once. Fails without touching the board
    /// if any index is out of range.
    pub fn remove_piles(&mut self, indices: &[usize]) -> Result<Vec<Pile>, IllegalAction> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.piles.len()) {
            return Err(IllegalAction::NoSuchPile { index });
        }
        let mut unique: Vec<usize> = Vec::with_capacity(indices.len());
        for &i in indices {
            if !unique.contains(&i) {
                unique.push(i);
            }
        }

        let mut descending = unique.clone();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        let mut removed: Vec<(usize, Pile)> = descending
            .into_iter()
            .map(|i| (i, self.piles.remove(i)))
            .collect();

        Ok(unique
            .iter()
            .filter_map(|i| {
                let pos = removed.iter().position(|(idx, _)| idx == i)?;
                Some(removed.swap_remove(pos).1)
            })
            .collect())
    }

    /// Take every pile off the board.
    pub fn clear(&mut self) -> Vec<Pile> {
        std::mem::take(&mut self.piles)
    }

    /// All Builds with their board indices.
    pub fn list_builds(&self) -> impl Iterator<Item = (usize, &Build)> {
        self.piles
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_build().map(|b| (i, b)))
    }

    /// Builds whose value equals `value`, in board order.
    pub fn list_builds_by_value(&self, value: u32) -> impl Iterator<Item = (usize, &Build)> {
        self.list_builds().filter(move |(_, b)| b.value() == value)
    }

    /// Builds owned by `owner`, in board order.
    pub fn builds_owned_by(&self, owner: PlayerId) -> impl Iterator<Item = (usize, &Build)> {
        self.list_builds().filter(move |(_, b)| b.owner == owner)
    }

    /// Create a Build from the pile at `base_index` plus `added_card`.
    ///
    /// 1. The base pile leaves the board; its cards (unwrapped if a Build) form
    ///    the new Build with `added_card`.
    /// 2. The target is `declared_value`, or the board-value sum.
    /// 3. If a Build of that value exists, the cards merge into the first one,
    ///    which is locked.
    /// 4. Otherwise a new open Build is created and eligible piles are absorbed
    ///    (loose piles of one or two cards, open two-card Builds), picking the
    ///    most disjoint groups that reach the target. Any absorption locks it.
    ///
    /// Returns the resulting Build.
    pub fn create_build(
        &mut self,
        base_index: usize,
        added_card: Card,
        owner: PlayerId,
        current_round: u32,
        declared_value: Option<u32>,
    ) -> Result<&Build, IllegalAction> {
        let base = self
            .remove_pile(base_index)
            .ok_or(IllegalAction::NoSuchPile { index: base_index })?;

        let mut cards = base.into_cards();
        cards.push(added_card);
        let target = declared_value.unwrap_or_else(|| board_sum(&cards));

        let existing = self.list_builds_by_value(target).map(|(i, _)| i).next();
        if let Some(existing) = existing {
            let Some(build) = self.piles[existing].as_build_mut() else {
                unreachable!("list_builds only yields Build piles");
            };
            build.cards.extend(cards);
            build.lock();
            debug!(value = target, owner = %build.owner, "merged into existing build");
            return Ok(&*build);
        }

        let mut build = Build::new(cards, owner, target, current_round);

        let absorbed = self.absorb_into(target);
        if !absorbed.is_empty() {
            debug!(value = target, piles = absorbed.len(), "build absorbed board piles");
            for pile in absorbed {
                build.cards.extend(pile.into_cards());
            }
            build.lock();
        }

        debug!(value = target, owner = %owner, locked = build.locked, "created build");
        self.piles.push(Pile::Build(build));
        match self.piles.last() {
            Some(Pile::Build(build)) => Ok(build),
            _ => unreachable!("a Build was just pushed"),
        }
    }

    /// Remove the piles a new Build of value `target` absorbs, in board order.
    fn absorb_into(&mut self, target: u32) -> Vec<Pile> {
        let eligible: Vec<usize> = self
            .piles
            .iter()
            .enumerate()
            .filter(|(_, p)| match p {
                Pile::Build(b) => b.len() == 2 && !b.locked,
                Pile::Cards(cards) => cards.len() == 1 || cards.len() == 2,
            })
            .map(|(i, _)| i)
            .collect();

        let values: Vec<u32> = eligible.iter().map(|&i| self.piles[i].card_sum()).collect();

        let direct: Vec<usize> = (0..values.len()).filter(|&i| values[i] == target).collect();
        let candidates: Vec<usize> = (0..values.len())
            .filter(|&i| values[i] < target && !direct.contains(&i))
            .collect();

        let mut chosen = direct;
        for group in max_disjoint_subsets(&values, &candidates, target, SubsetOrder::Generated) {
            chosen.extend(group);
        }
        if chosen.is_empty() {
            return Vec::new();
        }

        let mut board_indices: Vec<usize> = chosen.into_iter().map(|i| eligible[i]).collect();
        board_indices.sort_unstable();
        board_indices.dedup();
        // Indices were checked against the board above
        self.remove_piles(&board_indices).unwrap_or_default()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, pile) in self.piles.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{i}] {pile}")?;
        }
        Ok(())
    }
}
