//! Every legal action for a seat, with a rough predicted reward.
//!
//! Strategies rank these candidates instead of searching the rules
//! themselves. Rewards:
//!
//! | Category             | Predicted reward                 |
//! |----------------------|----------------------------------|
//! | capture with mulle   | group size + 5 per mulle pair    |
//! | capture              | group size                       |
//! | build, trotta        | [`BUILD_REWARD`]                 |
//! | discard              | 0                                |

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pile};
use crate::cards::Card;
use crate::core::{Action, ActionKind, ActionResult, Player};
use crate::rules::{buildable_piles, detect_mulles, generate_capture_combinations, plan_discard, plan_trotta};

/// Predicted reward of a build or trotta.
pub const BUILD_REWARD: f64 = 1.5;

/// Extra predicted reward per mulle pair in a capture.
pub const MULLE_REWARD: f64 = 5.0;

/// Coarse action families, used for learned weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    CaptureComboMulle,
    CaptureCombo,
    Build,
    Trotta,
    Discard,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 5] = [
        ActionCategory::CaptureComboMulle,
        ActionCategory::CaptureCombo,
        ActionCategory::Build,
        ActionCategory::Trotta,
        ActionCategory::Discard,
    ];

    /// Category of an executed action.
    #[must_use]
    pub fn of_result(result: &ActionResult) -> Self {
        match result.kind {
            ActionKind::Capture if !result.mulle_pairs.is_empty() => ActionCategory::CaptureComboMulle,
            ActionKind::Capture => ActionCategory::CaptureCombo,
            ActionKind::Build => ActionCategory::Build,
            ActionKind::Trotta => ActionCategory::Trotta,
            ActionKind::Discard => ActionCategory::Discard,
        }
    }
}

/// A legal action with its category and predicted reward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateAction {
    pub action: Action,
    pub category: ActionCategory,
    pub predicted_reward: f64,
}

/// The cards a capture of `piles` with `card` would take, played card last.
#[must_use]
pub fn capture_group(board: &Board, card: &Card, piles: &[usize]) -> Vec<Card> {
    let mut group: Vec<Card> = piles
        .iter()
        .filter_map(|&i| board.pile(i))
        .flat_map(|p| p.cards().iter().copied())
        .collect();
    group.push(*card);
    group
}

/// All legal actions for `player`, in hand order within each family:
/// captures, builds, trottas, then discards.
///
/// Reserved cards never appear as discards.
#[must_use]
pub fn enumerate_candidate_actions(board: &Board, player: &Player) -> Vec<CandidateAction> {
    let mut candidates = Vec::new();

    for card in &player.hand {
        for piles in generate_capture_combinations(board, card) {
            let group = capture_group(board, card, &piles);
            let mulles = detect_mulles(&group).len();
            let category = if mulles > 0 {
                ActionCategory::CaptureComboMulle
            } else {
                ActionCategory::CaptureCombo
            };
            candidates.push(CandidateAction {
                predicted_reward: group.len() as f64 + MULLE_REWARD * mulles as f64,
                action: Action::Capture { card: *card, piles },
                category,
            });
        }
    }

    for card in &player.hand {
        for pile in buildable_piles(board, player, card) {
            candidates.push(CandidateAction {
                action: Action::Build {
                    card: *card,
                    pile,
                    declared_value: None,
                },
                category: ActionCategory::Build,
                predicted_reward: BUILD_REWARD,
            });
        }
    }

    for card in &player.hand {
        if plan_trotta(board, player, card).is_ok() {
            candidates.push(CandidateAction {
                action: Action::Trotta { card: *card },
                category: ActionCategory::Trotta,
                predicted_reward: BUILD_REWARD,
            });
        }
    }

    for card in &player.hand {
        if plan_discard(board, player, card).is_ok() {
            candidates.push(CandidateAction {
                action: Action::Discard { card: *card },
                category: ActionCategory::Discard,
                predicted_reward: 0.0,
            });
        }
    }

    candidates
}

/// Loose one-card piles with their board indices.
pub(crate) fn loose_singles(board: &Board) -> impl Iterator<Item = (usize, &Card)> {
    board
        .piles()
        .iter()
        .enumerate()
        .filter_map(|(i, p)| Pile::loose_single(p).map(|c| (i, c)))
}
