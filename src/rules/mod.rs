//! Mulle rules: capture search, action execution, legality and scoring.
//!
//! Every `perform_*` function checks its preconditions before touching the
//! board or the player, so a returned [`IllegalAction`] never leaves partial
//! state behind. The functions borrow the board and the acting player for the
//! duration of one call and keep nothing.
//!
//! [`apply_action`] dispatches an [`Action`] to the matching primitive and is
//! the single execution path shared by the engine and the automated players.

pub mod building;
pub mod capture;
pub mod scoring;
pub mod search;
pub mod trail;
pub mod trotta;
pub mod validation;

pub use building::{buildable_piles, can_build, check_build, perform_build};
pub use capture::{detect_mulles, generate_capture_combinations, perform_capture};
pub use scoring::{intake_points, intake_value, score_player, score_round, ScoreBreakdown};
pub use trail::{perform_discard, plan_discard, DiscardPlan};
pub use trotta::{perform_trotta, plan_trotta, TrottaPlan};
pub use validation::{ensure_can_trail, is_card_reserved_for_build, player_has_builds};

use crate::board::Board;
use crate::core::{Action, ActionResult, IllegalAction, Player};

/// Execute `action` for `player`.
///
/// Captures are executed as given; use [`generate_capture_combinations`] (or
/// the engine, which validates against it) to make sure they are legal.
pub fn apply_action(
    board: &mut Board,
    player: &mut Player,
    action: &Action,
    round: u32,
) -> Result<ActionResult, IllegalAction> {
    match action {
        Action::Capture { card, piles } => perform_capture(board, player, *card, piles),
        Action::Build {
            card,
            pile,
            declared_value,
        } => perform_build(board, player, *pile, *card, round, *declared_value),
        Action::Discard { card } => perform_discard(board, player, *card),
        Action::Trotta { card } => perform_trotta(board, player, *card, round),
    }
}
