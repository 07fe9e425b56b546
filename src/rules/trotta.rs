//! Trotta: gather matching board material into a locked Build.
//!
//! With `target` = the played card's board value:
//!
//! - If the player owns a Build of that value, the card is appended to it
//!   (locked or not) and nothing else happens.
//! - Otherwise the board is scanned for loose singles worth `target`, two-card
//!   piles or Builds worth `target`, and loose singles that pair up with
//!   another loose single to `target`. All of them, plus the played card, form
//!   a new locked Build owned by the player. At least one match and a second
//!   hand card of the same board value are required.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Build, Pile};
use crate::cards::Card;
use crate::core::{ActionKind, ActionResult, IllegalAction, Player};

/// What a legal trotta will do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrottaPlan {
    /// Append to the player's Build at this index.
    Feed { pile: usize },
    /// Gather these piles (in gathering order) into a new locked Build.
    Gather { piles: Vec<usize> },
}

/// Decide what a trotta with `card` does, or why it is not allowed.
pub fn plan_trotta(board: &Board, player: &Player, card: &Card) -> Result<TrottaPlan, IllegalAction> {
    if !player.holds(card) {
        return Err(IllegalAction::CardNotInHand { card: *card });
    }
    let target = card.board_value();

    if let Some((pile, _)) = board.builds_owned_by(player.id).find(|(_, b)| b.value() == target) {
        return Ok(TrottaPlan::Feed { pile });
    }

    let piles = board.piles();
    let singles: Vec<(usize, u32)> = piles
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.loose_single().map(|c| (i, c.board_value())))
        .collect();

    let mut matched: Vec<usize> = singles
        .iter()
        .filter(|&&(_, value)| value == target)
        .map(|&(i, _)| i)
        .collect();

    for (i, pile) in piles.iter().enumerate() {
        let pair_match = match pile {
            Pile::Build(build) => build.len() == 2 && build.value() == target,
            Pile::Cards(cards) => cards.len() == 2 && pile.card_sum() == target,
        };
        if pair_match {
            matched.push(i);
        }
    }

    for (a, &(i, vi)) in singles.iter().enumerate() {
        for &(j, vj) in &singles[a + 1..] {
            if vi + vj != target {
                continue;
            }
            for index in [i, j] {
                if !matched.contains(&index) {
                    matched.push(index);
                }
            }
        }
    }

    if matched.is_empty() {
        return Err(IllegalAction::NoTrottaMatch { value: target });
    }

    let has_reservation = player
        .hand
        .iter()
        .any(|c| !c.same_identity(card) && c.board_value() == target);
    if !has_reservation {
        return Err(IllegalAction::MissingReservation { value: target });
    }

    Ok(TrottaPlan::Gather { piles: matched })
}

/// Perform a trotta with `card`.
pub fn perform_trotta(
    board: &mut Board,
    player: &mut Player,
    card: Card,
    round: u32,
) -> Result<ActionResult, IllegalAction> {
    match plan_trotta(board, player, &card)? {
        TrottaPlan::Feed { pile } => {
            let build = board
                .pile_mut(pile)
                .and_then(Pile::as_build_mut)
                .ok_or(IllegalAction::NoSuchPile { index: pile })?;
            build.add_trotta_card(card);
            player.remove_from_hand(&card);
            debug!(player = %player.id, card = %card, pile, "trotta fed own build");
            Ok(ActionResult::fed(ActionKind::Trotta, card))
        }
        TrottaPlan::Gather { piles } => {
            let gathered = board.remove_piles(&piles)?;
            let mut cards = vec![card];
            cards.extend(gathered.into_iter().flat_map(Pile::into_cards));

            debug!(
                player = %player.id,
                card = %card,
                piles = piles.len(),
                cards = cards.len(),
                "trotta"
            );
            board.push_pile(Pile::Build(Build::new_locked(cards, player.id, card.board_value(), round)));
            player.remove_from_hand(&card);
            Ok(ActionResult::build(ActionKind::Trotta, card))
        }
    }
}
