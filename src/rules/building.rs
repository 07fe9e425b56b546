//! Build legality and execution.
//!
//! A build adds one hand card to a board pile. Legality, in check order:
//!
//! 1. The card is in hand and the base pile exists.
//! 2. A loose base pile holds exactly one card.
//! 3. No other player owns a Build of the resulting value.
//! 4. A Build base is open and owned by the builder.
//! 5. The added card is not reserved for one of the builder's Builds.
//! 6. The builder keeps another card whose hand value equals the target.

use tracing::debug;

use super::validation::is_card_reserved_for_build;
use crate::board::{Board, Pile};
use crate::cards::Card;
use crate::core::{ActionKind, ActionResult, IllegalAction, Player};

/// Check that `player` may build `card` onto the pile at `base_index`.
///
/// The target is `declared_value`, or the board-value sum of the base cards
/// and the added card. Returns the target.
pub fn check_build(
    board: &Board,
    player: &Player,
    base_index: usize,
    card: &Card,
    declared_value: Option<u32>,
) -> Result<u32, IllegalAction> {
    if !player.holds(card) {
        return Err(IllegalAction::CardNotInHand { card: *card });
    }
    let base = board
        .pile(base_index)
        .ok_or(IllegalAction::NoSuchPile { index: base_index })?;

    if let Pile::Cards(cards) = base {
        if cards.len() != 1 {
            return Err(IllegalAction::MultiCardBase { index: base_index });
        }
    }

    let target = declared_value.unwrap_or_else(|| base.card_sum() + card.board_value());

    if let Some((_, claimed)) = board
        .list_builds_by_value(target)
        .find(|(_, b)| b.owner != player.id)
    {
        return Err(IllegalAction::ValueClaimed {
            value: target,
            owner: claimed.owner,
        });
    }

    check_build_base(base, player, base_index)?;

    if let Some(build) = is_card_reserved_for_build(board, player, card) {
        return Err(IllegalAction::ReservedCard {
            card: *card,
            build_value: build.value(),
        });
    }

    let has_reservation = player
        .hand
        .iter()
        .any(|c| !c.same_identity(card) && c.hand_value() == target);
    if !has_reservation {
        return Err(IllegalAction::MissingReservation { value: target });
    }

    Ok(target)
}

/// Whether [`check_build`] passes with the summed target.
#[must_use]
pub fn can_build(board: &Board, player: &Player, base_index: usize, card: &Card) -> bool {
    check_build(board, player, base_index, card, None).is_ok()
}

/// Board indices `card` can be built onto.
#[must_use]
pub fn buildable_piles(board: &Board, player: &Player, card: &Card) -> Vec<usize> {
    (0..board.len())
        .filter(|&i| can_build(board, player, i, card))
        .collect()
}

/// Build `card` onto the pile at `base_index`.
///
/// Only the base Build's lock and ownership are checked; call [`check_build`]
/// first for the full rules.
pub fn perform_build(
    board: &mut Board,
    player: &mut Player,
    base_index: usize,
    card: Card,
    round: u32,
    declared_value: Option<u32>,
) -> Result<ActionResult, IllegalAction> {
    if !player.holds(&card) {
        return Err(IllegalAction::CardNotInHand { card });
    }
    let base = board
        .pile(base_index)
        .ok_or(IllegalAction::NoSuchPile { index: base_index })?;
    check_build_base(base, player, base_index)?;

    let build = board.create_build(base_index, card, player.id, round, declared_value)?;
    debug!(
        player = %player.id,
        card = %card,
        value = build.value(),
        locked = build.locked,
        "build"
    );
    player.remove_from_hand(&card);
    Ok(ActionResult::build(ActionKind::Build, card))
}

fn check_build_base(base: &Pile, player: &Player, index: usize) -> Result<(), IllegalAction> {
    match base {
        Pile::Build(build) if build.locked => Err(IllegalAction::LockedBuild { index }),
        Pile::Build(build) if build.owner != player.id => Err(IllegalAction::NotBuildOwner { index }),
        _ => Ok(()),
    }
}
