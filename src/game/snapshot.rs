//! Read-only projections of the engine for UIs and tests.
//!
//! Everything here is an owned copy; changing it does not change the game.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::engine::GamePhase;
use crate::board::Board;
use crate::core::{ActionRecord, PileGroup, Player, PlayerId, PlayerMap};
use crate::rules::ScoreBreakdown;

/// Round progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub round_number: u32,
    pub deal_number: u32,
    pub current_player_index: usize,
    /// True once the game is over (rounds in progress are never "over" between calls).
    pub is_round_over: bool,
}

/// Full view of a game at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub players: Vec<Player>,
    pub round: RoundState,
    /// Live scores for the round in progress (or the final round).
    pub scores: Vec<ScoreBreakdown>,
    pub phase: GamePhase,
    pub deck_remaining: usize,
    /// Sum of round totals over every scored round.
    pub cumulative_scores: PlayerMap<u32>,
}

impl GameSnapshot {
    /// Cards across deck, hands, board and captured piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck_remaining
            + self.board.card_count()
            + self
                .players
                .iter()
                .map(|p| p.hand.len() + p.captured.len())
                .sum::<usize>()
    }
}

/// What the current player could do with one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableActions {
    pub can_capture: bool,
    pub capture_combinations: Vec<PileGroup>,
    /// Board indices the card can be built onto.
    pub can_build: Vec<usize>,
    pub can_discard: bool,
    pub can_trotta: bool,
}

/// A scored round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub scores: Vec<ScoreBreakdown>,
    /// Who received the cards left on the board, if anyone.
    pub last_capturer: Option<PlayerId>,
    /// Cards that were still on the board when the round ended.
    pub leftover_cards: usize,
    pub actions: Vector<ActionRecord>,
}

impl RoundSummary {
    /// Seats whose total reached `threshold` this round.
    pub fn players_reaching(&self, threshold: u32) -> impl Iterator<Item = PlayerId> + '_ {
        self.scores
            .iter()
            .filter(move |s| s.total >= threshold)
            .map(|s| s.player)
    }
}
