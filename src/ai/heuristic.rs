//! Deterministic autoplay.
//!
//! Picks one action for the acting player, trying in order:
//!
//! 1. The capture with the most mulle pairs, then the largest group. Ties go
//!    to the earlier hand card.
//! 2. A capture of one loose single, identical or equal in value (special
//!    hand values excluded).
//! 3. The first legal build, by hand card then pile.
//! 4. The first legal trotta, by hand card.
//! 5. A discard. With Builds on the board only cards that feed one of them
//!    are tried.
//!
//! Reaching the end of the list is an engine defect: a player always has a
//! legal move.

use smallvec::smallvec;

use super::candidates::{capture_group, loose_singles};
use super::policy::no_legal_move;
use crate::board::Board;
use crate::core::{Action, ActionResult, InternalError, MulleError, Player};
use crate::rules::{
    apply_action, can_build, detect_mulles, generate_capture_combinations, plan_discard, plan_trotta,
    player_has_builds,
};

/// Choose the autoplay action for `player`.
pub fn select_heuristic_action(board: &Board, player: &Player) -> Result<Action, InternalError> {
    if let Some(action) = best_capture(board, player) {
        return Ok(action);
    }
    if let Some(action) = single_capture(board, player) {
        return Ok(action);
    }

    for card in &player.hand {
        if let Some(pile) = (0..board.len()).find(|&i| can_build(board, player, i, card)) {
            return Ok(Action::Build {
                card: *card,
                pile,
                declared_value: None,
            });
        }
    }

    if let Some(card) = player.hand.iter().find(|c| plan_trotta(board, player, c).is_ok()) {
        return Ok(Action::Trotta { card: *card });
    }

    let feed_only = player_has_builds(board, player);
    let discard = player.hand.iter().find(|card| {
        let feeds = board
            .builds_owned_by(player.id)
            .any(|(_, b)| b.value() == card.board_value());
        (!feed_only || feeds) && plan_discard(board, player, card).is_ok()
    });
    if let Some(card) = discard {
        return Ok(Action::Discard { card: *card });
    }

    Err(no_legal_move(board, player))
}

/// Choose and execute the autoplay action.
pub fn auto_play_turn(board: &mut Board, player: &mut Player, round: u32) -> Result<ActionResult, MulleError> {
    let action = select_heuristic_action(board, player)?;
    Ok(apply_action(board, player, &action, round)?)
}

fn best_capture(board: &Board, player: &Player) -> Option<Action> {
    let mut best: Option<((usize, usize), Action)> = None;
    for card in &player.hand {
        for piles in generate_capture_combinations(board, card) {
            let group = capture_group(board, card, &piles);
            let metric = (detect_mulles(&group).len(), group.len());
            if best.as_ref().map_or(true, |(m, _)| metric > *m) {
                best = Some((metric, Action::Capture { card: *card, piles }));
            }
        }
    }
    best.map(|(_, action)| action)
}

fn single_capture(board: &Board, player: &Player) -> Option<Action> {
    for card in player.hand.iter().filter(|c| !c.has_special_hand_value()) {
        let matched = loose_singles(board)
            .find(|(_, c)| c.same_appearance(card))
            .or_else(|| loose_singles(board).find(|(_, c)| c.board_value() == card.hand_value()));
        if let Some((pile, _)) = matched {
            return Some(Action::Capture {
                card: *card,
                piles: smallvec![pile],
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Build, Pile};
    use crate::cards::Card;
    use crate::core::PlayerId;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn player(hand: &[&str]) -> Player {
        let mut player = Player::new(PlayerId::new(1), "Bo");
        player.add_to_hand(hand.iter().map(|c| card(c)));
        player
    }

    fn board_of(codes: &[&str]) -> Board {
        let mut board = Board::new();
        for code in codes {
            board.add_card(card(code));
        }
        board
    }

    #[test]
    fn test_prefers_mulle_over_size() {
        // RU7 takes 3+4 (3 cards), SP5 copy takes the SP5 single with a mulle
        let board = board_of(&["SP5", "HJ3", "KL4"]);
        let mut bo = player(&["RU7"]);
        bo.add_to_hand([card("SP5").with_copy(1)]);

        let action = select_heuristic_action(&board, &bo).unwrap();
        assert_eq!(action.card(), card("SP5").with_copy(1));
    }

    #[test]
    fn test_prefers_larger_group() {
        let board = board_of(&["SP2", "HJ3", "KL4", "RU9"]);
        let bo = player(&["SP9", "HJ7"]);

        // SP9 takes 9 and 2+3+4 (4 cards) ahead of HJ7 taking 3+4
        let action = select_heuristic_action(&board, &bo).unwrap();
        assert_eq!(action, Action::Capture { card: card("SP9"), piles: smallvec![0, 1, 2, 3] });
    }

    #[test]
    fn test_ties_go_to_first_hand_card() {
        let board = board_of(&["SP6", "HJ8"]);
        let bo = player(&["KL6", "RU8"]);
        let action = select_heuristic_action(&board, &bo).unwrap();
        assert_eq!(action.card(), card("KL6"));
    }

    #[test]
    fn test_builds_when_no_capture() {
        let board = board_of(&["SP3"]);
        let bo = player(&["HJ4", "KL7"]);
        assert_eq!(
            select_heuristic_action(&board, &bo).unwrap(),
            Action::Build { card: card("HJ4"), pile: 0, declared_value: None }
        );
    }

    #[test]
    fn test_trotta_before_discard() {
        // Aces capture only Builds, so the lone Ace single is gathered instead
        let board = board_of(&["SPA"]);
        let bo = player(&["HJA", "KLA"]);
        assert_eq!(select_heuristic_action(&board, &bo).unwrap(), Action::Trotta { card: card("HJA") });
    }

    #[test]
    fn test_own_build_fed_by_board_value() {
        // SP 2 has hand value 15 but feeds a 2-build by board value
        let mut board = Board::new();
        board.push_pile(Pile::Build(Build::new_locked(
            vec![card("SPA"), card("HJA")],
            PlayerId::new(1),
            2,
            1,
        )));
        let mut bo = player(&["SP2", "KL9"]);

        let action = select_heuristic_action(&board, &bo).unwrap();
        assert_eq!(action, Action::Trotta { card: card("SP2") });

        let result = apply_action(&mut board, &mut bo, &action, 1).unwrap();
        assert!(result.fed_build);
        assert_eq!(board.pile(0).map(Pile::len), Some(3));
    }

    #[test]
    fn test_plain_discard() {
        let board = board_of(&["SPK"]);
        let bo = player(&["HJ2", "KL5"]);
        assert_eq!(select_heuristic_action(&board, &bo).unwrap(), Action::Discard { card: card("HJ2") });
    }

    #[test]
    fn test_no_legal_move_is_internal() {
        // Own Build of value 1 that nothing in hand feeds or captures
        let mut board = Board::new();
        board.push_pile(Pile::Build(Build::new_locked(vec![card("SPA"), card("HJA")], PlayerId::new(1), 1, 1)));
        let bo = player(&["KL9"]);

        assert_eq!(
            select_heuristic_action(&board, &bo),
            Err(InternalError::NoLegalMove { player: PlayerId::new(1) })
        );
    }

    #[test]
    fn test_auto_play_turn_executes() {
        let mut board = board_of(&["SP3", "HJ4"]);
        let mut bo = player(&["KL7"]);
        let result = auto_play_turn(&mut board, &mut bo, 1).unwrap();
        assert_eq!(result.captured.len(), 3);
        assert!(board.is_empty());
        assert!(bo.hand.is_empty());
    }
}
