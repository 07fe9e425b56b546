//! Round scoring.
//!
//! `total = mulle_points + tabbe + bonus`, where `bonus` is twice the intake
//! above [`INTAKE_BONUS_THRESHOLD`]. Intake itself never reaches the total.
//!
//! Scoring reads player state only; calling it twice gives the same result.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::core::{Player, PlayerId};

/// Intake above this earns a bonus.
pub const INTAKE_BONUS_THRESHOLD: u32 = 20;

/// One player's round score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub player: PlayerId,
    pub name: String,
    pub mulle_points: u32,
    pub tabbe: u32,
    pub intake: u32,
    pub bonus: u32,
    pub total: u32,
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: mulle={}, tabbe={}, intake={}, bonus={}, total={}",
            self.name, self.mulle_points, self.tabbe, self.intake, self.bonus, self.total
        )
    }
}

/// Intake points for one captured card.
///
/// Spader 3 through King and the other three Aces are worth 1. Spader 2,
/// Spader Ace and Ruter 10 are worth 2.
#[must_use]
pub fn intake_value(card: &Card) -> u32 {
    match (card.suit, card.rank) {
        (Suit::Spader, Rank::Two | Rank::Ace) => 2,
        (Suit::Ruter, Rank::Ten) => 2,
        (Suit::Spader, _) => 1,
        (_, Rank::Ace) => 1,
        _ => 0,
    }
}

/// Sum of intake values over everything the player captured.
#[must_use]
pub fn intake_points(player: &Player) -> u32 {
    player.captured.iter().map(intake_value).sum()
}

#[must_use]
pub fn score_player(player: &Player) -> ScoreBreakdown {
    let mulle_points = player.total_mulle_points();
    let intake = intake_points(player);
    let bonus = intake.saturating_sub(INTAKE_BONUS_THRESHOLD) * 2;

    ScoreBreakdown {
        player: player.id,
        name: player.name.clone(),
        mulle_points,
        tabbe: player.tabbe,
        intake,
        bonus,
        total: mulle_points + player.tabbe + bonus,
    }
}

/// Scores for every player, in seat order.
#[must_use]
pub fn score_round(players: &[Player]) -> Vec<ScoreBreakdown> {
    players.iter().map(score_player).collect()
}
