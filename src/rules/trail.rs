//! Discarding (trailing) a card.
//!
//! Planning is split from execution so legality can be queried without
//! touching the board.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::capture::generate_capture_combinations;
use super::validation::{ensure_can_trail, is_card_reserved_for_build};
use crate::board::{Board, Pile};
use crate::cards::Card;
use crate::core::{ActionKind, ActionResult, IllegalAction, Player};

/// What a legal discard will do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardPlan {
    /// Feed the card into the player's Build at this board index.
    Feed { pile: usize },
    /// Lay the card as a new loose pile.
    Trail,
}

/// Decide what discarding `card` does, or why it is not allowed.
///
/// Checks, in order: reserved card, feeding an own Build of the card's board
/// value, a capture being available, the player holding Builds.
pub fn plan_discard(board: &Board, player: &Player, card: &Card) -> Result<DiscardPlan, IllegalAction> {
    if !player.holds(card) {
        return Err(IllegalAction::CardNotInHand { card: *card });
    }
    if let Some(build) = is_card_reserved_for_build(board, player, card) {
        return Err(IllegalAction::ReservedCard {
            card: *card,
            build_value: build.value(),
        });
    }

    let value = card.board_value();
    if let Some((pile, _)) = board.builds_owned_by(player.id).find(|(_, b)| b.value() == value) {
        return Ok(DiscardPlan::Feed { pile });
    }

    if !generate_capture_combinations(board, card).is_empty() {
        return Err(IllegalAction::CaptureAvailable { card: *card });
    }
    ensure_can_trail(board, player, card)?;
    Ok(DiscardPlan::Trail)
}

/// Discard `card`: feed an own Build of the same value, or trail it.
pub fn perform_discard(board: &mut Board, player: &mut Player, card: Card) -> Result<ActionResult, IllegalAction> {
    match plan_discard(board, player, &card)? {
        DiscardPlan::Feed { pile } => {
            let build = board
                .pile_mut(pile)
                .and_then(Pile::as_build_mut)
                .ok_or(IllegalAction::NoSuchPile { index: pile })?;
            build.add_trotta_card(card);
            player.remove_from_hand(&card);
            debug!(player = %player.id, card = %card, pile, "discard fed own build");
            Ok(ActionResult::fed(ActionKind::Discard, card))
        }
        DiscardPlan::Trail => {
            player.remove_from_hand(&card);
            board.add_card(card);
            debug!(player = %player.id, card = %card, "trail");
            Ok(ActionResult::trail(card))
        }
    }
}
