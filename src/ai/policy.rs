//! Pluggable turn strategies.
//!
//! A policy only chooses; the engine validates and executes the chosen action
//! through the same path as a human move, then reports the outcome back with
//! [`ActionPolicy::observe`].

use tracing::error;

use super::candidates::{enumerate_candidate_actions, CandidateAction};
use super::heuristic::select_heuristic_action;
use crate::board::Board;
use crate::core::{Action, ActionResult, InternalError, Player};

/// Strategy that picks an action for the acting player.
pub trait ActionPolicy: Send {
    /// Choose an action for `player`.
    fn choose(&mut self, board: &Board, player: &Player) -> Result<Action, InternalError>;

    /// Outcome of the last chosen action. Default: ignored.
    fn observe(&mut self, _action: &Action, _result: &ActionResult) {}
}

/// The deterministic autoplay heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicPolicy;

impl ActionPolicy for HeuristicPolicy {
    fn choose(&mut self, board: &Board, player: &Player) -> Result<Action, InternalError> {
        select_heuristic_action(board, player)
    }
}

/// Highest predicted reward among all legal candidates; the first wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl ActionPolicy for GreedyPolicy {
    fn choose(&mut self, board: &Board, player: &Player) -> Result<Action, InternalError> {
        let candidates = enumerate_candidate_actions(board, player);
        best_by(&candidates, |c| c.predicted_reward)
            .map(|c| c.action.clone())
            .ok_or_else(|| no_legal_move(board, player))
    }
}

/// Log and build the error for a seat left without any legal action.
pub(crate) fn no_legal_move(board: &Board, player: &Player) -> InternalError {
    error!(
        player = %player.id,
        hand = player.hand.len(),
        board = %board,
        "no legal move"
    );
    InternalError::NoLegalMove { player: player.id }
}

/// First candidate with the strictly highest score.
pub(crate) fn best_by(
    candidates: &[CandidateAction],
    score: impl Fn(&CandidateAction) -> f64,
) -> Option<&CandidateAction> {
    let mut best: Option<(&CandidateAction, f64)> = None;
    for candidate in candidates {
        let s = score(candidate);
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((candidate, s));
        }
    }
    best.map(|(c, _)| c)
}
