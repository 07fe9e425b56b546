//! Cross-cutting legality checks shared by build, discard and the AI.

use crate::board::{Board, Build};
use crate::cards::Card;
use crate::core::{IllegalAction, Player};

/// Does `player` own any Build on the board?
#[must_use]
pub fn player_has_builds(board: &Board, player: &Player) -> bool {
    board.builds_owned_by(player.id).next().is_some()
}

/// The player's own Build that `card` is the only hand card able to capture.
///
/// Playing a reserved card anywhere else would leave that Build uncapturable
/// for its owner.
#[must_use]
pub fn is_card_reserved_for_build<'b>(board: &'b Board, player: &Player, card: &Card) -> Option<&'b Build> {
    let value = card.hand_value();
    board
        .builds_owned_by(player.id)
        .map(|(_, build)| build)
        .find(|build| {
            if build.value() != value {
                return false;
            }
            let mut capturers = player.hand.iter().filter(|c| c.hand_value() == build.value());
            matches!(
                (capturers.next(), capturers.next()),
                (Some(only), None) if only.same_identity(card)
            )
        })
}

/// Fails with `TrailRestricted` while the player has Builds on the board.
pub fn ensure_can_trail(board: &Board, player: &Player, card: &Card) -> Result<(), IllegalAction> {
    if player_has_builds(board, player) {
        return Err(IllegalAction::TrailRestricted { card: *card });
    }
    Ok(())
}
