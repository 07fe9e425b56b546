//! Capture search, mulle detection and capture execution.

mod common;

use common::{board_of, card, init_logging, player_with};
use mulle_engine::{
    detect_mulles, generate_capture_combinations, perform_capture, Board, Build, IllegalAction, Pile, PlayerId,
};

/// Capture groups as plain index lists.
fn groups(board: &Board, played: &str) -> Vec<Vec<usize>> {
    generate_capture_combinations(board, &card(played))
        .into_iter()
        .map(|g| g.to_vec())
        .collect()
}

fn build_of(codes: &[&str], owner: u8, value: u32) -> Pile {
    Pile::Build(Build::new(
        codes.iter().map(|c| card(c)).collect(),
        PlayerId::new(owner),
        value,
        1,
    ))
}

#[test]
fn test_identical_card_captures_its_twin_as_mulle() {
    init_logging();
    let mut board = Board::new();
    board.add_card(card("SP5").with_copy(1));
    let mut player = player_with(0, &["SP5"]);

    assert_eq!(groups(&board, "SP5"), vec![vec![0]]);

    let result = perform_capture(&mut board, &mut player, card("SP5"), &[0]).unwrap();
    assert!(board.is_empty());
    assert_eq!(player.captured.len(), 2);
    assert_eq!(result.mulle_pairs.len(), 1);
    assert_eq!(player.mulles, vec![card("SP5").with_copy(1)]);
    assert!(player.hand.is_empty());
}

#[test]
fn test_same_rank_other_suit_is_no_mulle() {
    init_logging();
    let mut board = board_of(&["SP5"]);
    let mut player = player_with(0, &["HJ5"]);

    assert_eq!(groups(&board, "HJ5"), vec![vec![0]]);

    let result = perform_capture(&mut board, &mut player, card("HJ5"), &[0]).unwrap();
    assert_eq!(player.captured.len(), 2);
    assert!(result.mulle_pairs.is_empty());
    assert!(player.mulles.is_empty());
}

#[test]
fn test_two_piles_summing_to_hand_value() {
    let board = board_of(&["SP3", "HJ4"]);
    assert_eq!(groups(&board, "KL7"), vec![vec![0, 1]]);
}

#[test]
fn test_direct_matches_and_disjoint_sums_combine() {
    let board = board_of(&["SP7", "HJ7", "KL3", "RU4", "SP2", "HJ5", "KL9"]);
    assert_eq!(groups(&board, "KL7"), vec![vec![0, 1, 2, 3, 4, 5]]);
}

#[test]
fn test_overlapping_sums_pick_most_groups() {
    // 1+5 and 2+4 beat 1+2+3
    let board = board_of(&["SPA", "HJ2", "KL3", "RU4", "SP5"]);
    let combos = generate_capture_combinations(&board, &card("HJ6"));
    assert_eq!(combos.len(), 1);
    let group = &combos[0];
    assert_eq!(group.len(), 4);
    assert!(!group.contains(&2));
}

#[test]
fn test_identical_single_takes_precedence() {
    let mut board = board_of(&["HJ5", "KL2", "RU3"]);
    board.add_card(card("SP5").with_copy(1));

    assert_eq!(groups(&board, "SP5"), vec![vec![3]]);
}

#[test]
fn test_no_capture_when_nothing_matches() {
    let board = board_of(&["SP9", "HJK"]);
    assert!(generate_capture_combinations(&board, &card("KL4")).is_empty());
    assert!(generate_capture_combinations(&Board::new(), &card("KL4")).is_empty());
}

#[test]
fn test_build_captured_by_its_value() {
    let board = Board::from_piles(vec![build_of(&["SP3", "HJ4"], 1, 7), Pile::single(card("KL2"))]);
    assert_eq!(groups(&board, "RU7"), vec![vec![0]]);
}

#[test]
fn test_special_hand_values_only_take_builds() {
    // Loose cards summing to 14 never fall to an Ace
    let loose = board_of(&["SP7", "HJ7", "KL9", "RU5"]);
    for code in ["HJA", "SPA", "SP2", "RU10"] {
        assert!(generate_capture_combinations(&loose, &card(code)).is_empty(), "{code}");
    }

    let board = Board::from_piles(vec![
        build_of(&["SP7", "HJ7"], 0, 14),
        Pile::single(card("KL9")),
        build_of(&["SP9", "HJ6"], 1, 15),
        build_of(&["RU8", "KL6"], 1, 14),
    ]);
    assert_eq!(groups(&board, "KLA"), vec![vec![0, 3]]);
    assert_eq!(groups(&board, "SP2"), vec![vec![2]]);
    assert!(generate_capture_combinations(&board, &card("RU10")).is_empty());
}

#[test]
fn test_non_special_two_and_ten_use_board_value() {
    let board = board_of(&["SP2", "HJ10"]);
    assert_eq!(groups(&board, "HJ2"), vec![vec![0]]);
    assert_eq!(groups(&board, "KL10"), vec![vec![1]]);
}

#[test]
fn test_detect_mulles_requires_exactly_two() {
    let pair = detect_mulles(&[card("SP5"), card("HJ5"), card("SP5").with_copy(1)]);
    assert_eq!(pair, vec![[card("SP5"), card("SP5").with_copy(1)]]);

    let triple = detect_mulles(&[card("SP5"), card("SP5"), card("SP5").with_copy(1)]);
    assert!(triple.is_empty());

    let two_pairs = detect_mulles(&[
        card("KLA"),
        card("HJ9"),
        card("HJ9").with_copy(1),
        card("KLA").with_copy(1),
    ]);
    assert_eq!(two_pairs.len(), 2);
    assert_eq!(two_pairs[0][0], card("KLA"));
    assert_eq!(two_pairs[1][0], card("HJ9"));
}

#[test]
fn test_mulle_points_come_from_captured_pairs() {
    let mut board = Board::new();
    board.add_pile(vec![card("KLA").with_copy(1), card("SP3")]);
    board.add_card(card("RU4"));
    let mut player = player_with(0, &["KLA"]);

    // perform_capture takes whatever piles it is given
    let result = perform_capture(&mut board, &mut player, card("KLA"), &[0]).unwrap();
    assert_eq!(result.captured.len(), 3);
    assert_eq!(*result.captured.last().unwrap(), card("KLA"));
    assert_eq!(player.total_mulle_points(), 14);
    assert_eq!(board.len(), 1);
}

#[test]
fn test_capture_errors_leave_state_untouched() {
    let mut board = board_of(&["SP3", "HJ4"]);
    let mut player = player_with(0, &["KL7"]);
    let before = (board.clone(), player.clone());

    assert_eq!(
        perform_capture(&mut board, &mut player, card("RU7"), &[0, 1]),
        Err(IllegalAction::CardNotInHand { card: card("RU7") })
    );
    assert_eq!(
        perform_capture(&mut board, &mut player, card("KL7"), &[0, 5]),
        Err(IllegalAction::NoSuchPile { index: 5 })
    );
    assert_eq!((board, player), before);
}
