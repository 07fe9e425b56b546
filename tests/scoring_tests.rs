//! Round scoring: mulle points, tabbe and the intake bonus.

mod common;

use common::{card, player_with};
use mulle_engine::cards::{Card, Rank, Suit};
use mulle_engine::rules::{intake_points, scoring::INTAKE_BONUS_THRESHOLD};
use mulle_engine::{score_player, score_round, Player, PlayerId};

fn all_spader(copy: u8) -> Vec<Card> {
    Rank::ALL.into_iter().map(|rank| Card::new(Suit::Spader, rank, copy)).collect()
}

#[test]
fn test_intake_above_threshold_doubles_into_bonus() {
    let mut player = player_with(0, &[]);
    player.record_capture(&all_spader(0));
    player.record_capture(&all_spader(1));
    player.record_mulle(card("SPA"));
    player.tabbe = 2;

    let score = score_player(&player);
    // 11 plain spades at 1 and SP2, SP A at 2, twice over
    assert_eq!(score.intake, 30);
    assert_eq!(score.bonus, (30 - INTAKE_BONUS_THRESHOLD) * 2);
    assert_eq!(score.mulle_points, 14);
    assert_eq!(score.tabbe, 2);
    assert_eq!(score.total, 14 + 2 + 20);
}

#[test]
fn test_intake_at_threshold_earns_nothing() {
    let mut player = player_with(0, &[]);
    player.record_capture(&all_spader(0));
    // 15 from the spades, 2 per Ruter 10, 1 per other Ace
    player.record_capture(&[card("RU10"), card("RU10").with_copy(1), card("HJA")]);
    assert_eq!(intake_points(&player), 20);

    let score = score_player(&player);
    assert_eq!(score.bonus, 0);
    assert_eq!(score.total, 0);
}

#[test]
fn test_intake_never_reaches_total_below_threshold() {
    let mut player = player_with(0, &[]);
    player.record_capture(&[card("SP2"), card("SPA"), card("HJ9")]);
    player.record_mulle(card("HJ9"));

    let score = score_player(&player);
    assert_eq!(score.intake, 4);
    assert_eq!(score.total, 9);
}

#[test]
fn test_mulle_points_by_rank() {
    let mut player = player_with(0, &[]);
    for code in ["KLA", "HJK", "SP2", "RU10"] {
        player.record_mulle(card(code));
    }
    assert_eq!(player.total_mulle_points(), 14 + 13 + 2 + 10);
}

#[test]
fn test_score_round_is_seat_ordered_and_pure() {
    let mut anna = Player::new(PlayerId::new(0), "Anna");
    anna.tabbe = 1;
    let mut bo = Player::new(PlayerId::new(1), "Bo");
    bo.record_mulle(card("HJ7"));
    let players = vec![anna, bo];

    let first = score_round(&players);
    let second = score_round(&players);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].player, PlayerId::new(0));
    assert_eq!(first[0].total, 1);
    assert_eq!(first[1].name, "Bo");
    assert_eq!(first[1].total, 7);
    assert_eq!(
        first[1].to_string(),
        "Bo: mulle=7, tabbe=0, intake=0, bonus=0, total=7"
    );
}
