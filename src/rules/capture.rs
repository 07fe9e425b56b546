//! Capture combination search, mulle detection and capture execution.
//!
//! ## Combination search
//!
//! For a played card with hand value `target`:
//!
//! 1. Special hand values (14, 15, 16) capture only Builds of that value, all
//!    of them together. Loose piles never qualify, whatever they sum to.
//! 2. If exactly one loose single looks identical to the played card, that
//!    pile alone is the capture.
//! 3. Otherwise every pile worth exactly `target` is taken, plus the largest
//!    number of disjoint groups of smaller piles that each sum to `target`.
//!
//! The result is a list so callers can handle several options, but it
//! currently holds at most one group.

use rustc_hash::FxHashMap;
use smallvec::smallvec;
use tracing::debug;

use super::search::{max_disjoint_subsets, SubsetOrder};
use crate::board::{Board, Pile};
use crate::cards::{Card, Rank, Suit};
use crate::core::{ActionResult, IllegalAction, PileGroup, Player};

/// Board index groups `card` may capture, each sorted by board position.
#[must_use]
pub fn generate_capture_combinations(board: &Board, card: &Card) -> Vec<PileGroup> {
    let target = card.hand_value();
    let piles = board.piles();

    if card.has_special_hand_value() {
        let builds: PileGroup = board
            .list_builds_by_value(target)
            .map(|(i, _)| i)
            .collect();
        return if builds.is_empty() { Vec::new() } else { vec![builds] };
    }

    let mut identical = piles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.loose_single().is_some_and(|c| c.same_appearance(card)));
    if let (Some((index, _)), None) = (identical.next(), identical.next()) {
        return vec![smallvec![index]];
    }

    let values: Vec<u32> = piles.iter().map(Pile::value).collect();
    let mut group: PileGroup = (0..values.len()).filter(|&i| values[i] == target).collect();
    let candidates: Vec<usize> = (0..values.len()).filter(|&i| values[i] < target).collect();

    for subset in max_disjoint_subsets(&values, &candidates, target, SubsetOrder::LargestFirst) {
        group.extend(subset);
    }
    if group.is_empty() {
        return Vec::new();
    }
    group.sort_unstable();
    vec![group]
}

/// Pairs of cards sharing suit and rank, where exactly two such cards exist.
///
/// Three or four of a kind form no pair. Pairs come out in order of first
/// appearance.
#[must_use]
pub fn detect_mulles(cards: &[Card]) -> Vec<[Card; 2]> {
    let mut order: Vec<(Suit, Rank)> = Vec::new();
    let mut by_face: FxHashMap<(Suit, Rank), Vec<Card>> = FxHashMap::default();
    for card in cards {
        let key = (card.suit, card.rank);
        let same = by_face.entry(key).or_default();
        if same.is_empty() {
            order.push(key);
        }
        same.push(*card);
    }

    order
        .iter()
        .filter_map(|key| match by_face.get(key).map(Vec::as_slice) {
            Some(&[first, second]) => Some([first, second]),
            _ => None,
        })
        .collect()
}

/// Take the piles at `piles` with `card`.
///
/// The taken cards plus the played card form the capture group; every mulle
/// pair in it is registered with the player. Legality of the chosen piles is
/// not checked here.
pub fn perform_capture(
    board: &mut Board,
    player: &mut Player,
    card: Card,
    piles: &[usize],
) -> Result<ActionResult, IllegalAction> {
    if !player.holds(&card) {
        return Err(IllegalAction::CardNotInHand { card });
    }
    let taken = board.remove_piles(piles)?;
    player.remove_from_hand(&card);

    let mut group: Vec<Card> = taken.into_iter().flat_map(Pile::into_cards).collect();
    group.push(card);

    let pairs = detect_mulles(&group);
    player.record_capture(&group);
    for [first, _] in &pairs {
        player.record_mulle(*first);
    }

    debug!(
        player = %player.id,
        card = %card,
        captured = group.len(),
        mulles = pairs.len(),
        "capture"
    );
    Ok(ActionResult::capture(card, group, pairs))
}
