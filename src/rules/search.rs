//! Subset-sum search with disjoint-group maximisation.
//!
//! Shared by capture-combination generation and Build absorption. Both need
//! "as many disjoint groups summing to the target as possible" over a small
//! list of pile values.
//!
//! ## Algorithm
//!
//! 1. Enumerate every subset of the candidates whose values sum to the target,
//!    by increasing subset size, lexicographically within a size. Values are
//!    positive, so branches whose partial sum passes the target are cut.
//! 2. Order the subsets (generation order, or largest-first for captures).
//! 3. Backtrack over the ordered subsets, keeping the first selection with the
//!    strictly largest number of pairwise-disjoint subsets.
//!
//! Subsets are bitmasks over candidate positions, so at most
//! [`MAX_CANDIDATES`] candidates take part.

use smallvec::SmallVec;
use tracing::warn;

/// Most candidate piles considered by one search.
pub const MAX_CANDIDATES: usize = 24;

/// Backtracking gives up refining the selection after this many steps.
pub const MAX_SEARCH_NODES: usize = 200_000;

/// Bitmask over candidate positions.
type Mask = u32;

/// Indices into the searched `values` slice, ascending.
pub type IndexGroup = SmallVec<[usize; 4]>;

/// Order in which qualifying subsets are offered to the backtracking search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubsetOrder {
    /// Increasing size, lexicographic within a size.
    Generated,
    /// Decreasing size, then lowest first index (stable).
    LargestFirst,
}

/// Pick the largest collection of disjoint subsets of `candidates` (indices
/// into `values`) that each sum to `target`.
///
/// Returns the chosen subsets in selection order.
#[must_use]
pub fn max_disjoint_subsets(
    values: &[u32],
    candidates: &[usize],
    target: u32,
    order: SubsetOrder,
) -> Vec<IndexGroup> {
    let candidates = if candidates.len() > MAX_CANDIDATES {
        warn!(
            candidates = candidates.len(),
            limit = MAX_CANDIDATES,
            "subset search truncated to the first candidates"
        );
        &candidates[..MAX_CANDIDATES]
    } else {
        candidates
    };

    let cand_values: Vec<u32> = candidates.iter().map(|&i| values[i]).collect();
    let mut masks = subsets_summing_to(&cand_values, target);

    if order == SubsetOrder::LargestFirst {
        // Stable: ties keep generation order after the first-index key
        masks.sort_by_key(|&m| (std::cmp::Reverse(m.count_ones()), m.trailing_zeros()));
    }

    let mut search = Backtrack {
        masks: &masks,
        best: Vec::new(),
        chosen: Vec::new(),
        budget: MAX_SEARCH_NODES,
    };
    search.run(0, 0);
    if search.budget == 0 {
        warn!(
            subsets = masks.len(),
            "disjoint subset search hit its node budget; keeping best selection so far"
        );
    }

    search
        .best
        .iter()
        .map(|&j| {
            (0..candidates.len())
                .filter(|bit| masks[j] & (1 << bit) != 0)
                .map(|bit| candidates[bit])
                .collect()
        })
        .collect()
}

/// All subsets (as masks over `values` positions) summing to `target`,
/// by increasing size, lexicographic within a size.
fn subsets_summing_to(values: &[u32], target: u32) -> Vec<Mask> {
    let mut found = Vec::new();
    for size in 1..=values.len() {
        combine(values, target, size, 0, 0, 0, 0, &mut found);
    }
    found
}

#[allow(clippy::too_many_arguments)]
fn combine(
    values: &[u32],
    target: u32,
    size: usize,
    start: usize,
    taken: usize,
    sum: u32,
    mask: Mask,
    out: &mut Vec<Mask>,
) {
    if taken == size {
        if sum == target {
            out.push(mask);
        }
        return;
    }
    let needed = size - taken;
    for i in start..values.len() {
        if values.len() - i < needed {
            break;
        }
        let next = sum + values[i];
        if next > target {
            continue;
        }
        combine(values, target, size, i + 1, taken + 1, next, mask | (1 << i), out);
    }
}

struct Backtrack<'a> {
    masks: &'a [Mask],
    best: Vec<usize>,
    chosen: Vec<usize>,
    budget: usize,
}

impl Backtrack<'_> {
    fn run(&mut self, idx: usize, used: Mask) {
        if self.chosen.len() > self.best.len() {
            self.best = self.chosen.clone();
        }
        for j in idx..self.masks.len() {
            // Remaining subsets cannot beat the current best
            if self.chosen.len() + (self.masks.len() - j) <= self.best.len() {
                return;
            }
            if self.budget == 0 {
                return;
            }
            self.budget -= 1;

            let mask = self.masks[j];
            if mask & used != 0 {
                continue;
            }
            self.chosen.push(j);
            self.run(j + 1, used | mask);
            self.chosen.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(values: &[u32], target: u32, order: SubsetOrder) -> Vec<Vec<usize>> {
        let candidates: Vec<usize> = (0..values.len()).collect();
        max_disjoint_subsets(values, &candidates, target, order)
            .into_iter()
            .map(|g| g.to_vec())
            .collect()
    }

    #[test]
    fn test_subsets_generation_order() {
        // 3+4, 2+5, 2+1+4
        let masks = subsets_summing_to(&[3, 4, 2, 5, 1], 7);
        assert_eq!(masks, vec![0b00011, 0b01100, 0b10110]);
    }

    #[test]
    fn test_single_pair() {
        assert_eq!(groups(&[3, 4], 7, SubsetOrder::LargestFirst), vec![vec![0, 1]]);
    }

    #[test]
    fn test_no_subset() {
        assert!(groups(&[3, 5], 7, SubsetOrder::Generated).is_empty());
        assert!(groups(&[], 7, SubsetOrder::Generated).is_empty());
    }

    #[test]
    fn test_prefers_more_groups_over_bigger_group() {
        // {1,2,4} overlaps both pairs; {1,6} + {3,4} gives two groups
        let values = [1, 2, 4, 6, 3];
        let mut chosen = groups(&values, 7, SubsetOrder::LargestFirst);
        chosen.sort();
        assert_eq!(chosen, vec![vec![0, 3], vec![2, 4]]);
    }

    #[test]
    fn test_largest_first_breaks_ties_by_size() {
        // Only one group possible: {2,5} or {1,2,4}-like overlap. Largest first wins.
        let values = [2, 5, 1, 4];
        // subsets: {2,5}=[0,1], {2,1,4}=[0,2,3]
        assert_eq!(groups(&values, 7, SubsetOrder::LargestFirst), vec![vec![0, 2, 3]]);
        assert_eq!(groups(&values, 7, SubsetOrder::Generated), vec![vec![0, 1]]);
    }

    #[test]
    fn test_candidates_map_back_to_value_indices() {
        let values = [7, 3, 9, 4];
        let chosen = max_disjoint_subsets(&values, &[1, 3], 7, SubsetOrder::Generated);
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].as_slice(), &[1, 3]);
    }

    #[test]
    fn test_many_candidates_stay_bounded() {
        let values = vec![1u32; 40];
        let candidates: Vec<usize> = (0..values.len()).collect();
        let chosen = max_disjoint_subsets(&values, &candidates, 2, SubsetOrder::LargestFirst);
        // Truncated to MAX_CANDIDATES ones, paired up
        assert_eq!(chosen.len(), MAX_CANDIDATES / 2);
    }
}
