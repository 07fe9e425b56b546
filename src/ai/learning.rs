//! A minimal learner over action categories.
//!
//! Each [`ActionCategory`] carries a weight (initially 0) added to every
//! candidate's predicted reward. After an action executes, its category weight
//! moves by `learning_rate × reward`, where
//! `reward = captured + 10 × mulle pairs + 2 × build created`. Weights never
//! drop below zero.

use rustc_hash::FxHashMap;
use tracing::trace;

use super::candidates::{enumerate_candidate_actions, ActionCategory};
use super::policy::{best_by, no_legal_move, ActionPolicy};
use crate::board::Board;
use crate::core::{Action, ActionResult, GameRng, InternalError, Player};

/// Default step size for weight updates.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Category-weight learner with optional epsilon exploration.
#[derive(Clone, Debug)]
pub struct LearningPolicy {
    weights: FxHashMap<ActionCategory, f64>,
    learning_rate: f64,
    epsilon: f64,
    rng: GameRng,
}

impl Default for LearningPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}

impl LearningPolicy {
    /// Purely greedy learner with the given learning rate.
    #[must_use]
    pub fn new(learning_rate: f64) -> Self {
        Self {
            weights: ActionCategory::ALL.into_iter().map(|c| (c, 0.0)).collect(),
            learning_rate,
            epsilon: 0.0,
            rng: GameRng::new(0),
        }
    }

    /// Pick a uniformly random candidate with probability `epsilon`.
    #[must_use]
    pub fn with_exploration(mut self, epsilon: f64, seed: u64) -> Self {
        self.epsilon = epsilon.clamp(0.0, 1.0);
        self.rng = GameRng::new(seed);
        self
    }

    #[must_use]
    pub fn weight(&self, category: ActionCategory) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Apply a reward to a category weight.
    pub fn learn(&mut self, category: ActionCategory, reward: f64) {
        let weight = self.weights.entry(category).or_insert(0.0);
        *weight = (*weight + self.learning_rate * reward).max(0.0);
        trace!(?category, weight = *weight, "weight updated");
    }

    /// Reward credited for an executed action.
    #[must_use]
    pub fn reward(result: &ActionResult) -> f64 {
        let build = if result.build_created { 2.0 } else { 0.0 };
        result.captured.len() as f64 + 10.0 * result.mulle_pairs.len() as f64 + build
    }
}

impl ActionPolicy for LearningPolicy {
    fn choose(&mut self, board: &Board, player: &Player) -> Result<Action, InternalError> {
        let candidates = enumerate_candidate_actions(board, player);
        let explore = self.epsilon > 0.0 && self.rng.gen_bool(self.epsilon);
        let picked = if explore {
            self.rng.choose(&candidates)
        } else {
            best_by(&candidates, |c| self.weight(c.category) + c.predicted_reward)
        };
        picked
            .map(|c| c.action.clone())
            .ok_or_else(|| no_legal_move(board, player))
    }

    fn observe(&mut self, _action: &Action, result: &ActionResult) {
        self.learn(ActionCategory::of_result(result), Self::reward(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::{ActionKind, PlayerId};

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn test_weights_start_at_zero() {
        let policy = LearningPolicy::default();
        for category in ActionCategory::ALL {
            assert_eq!(policy.weight(category), 0.0);
        }
        assert_eq!(policy.learning_rate(), DEFAULT_LEARNING_RATE);
    }

    #[test]
    fn test_observe_rewards_category() {
        let mut policy = LearningPolicy::new(0.5);
        let played = card("SP5");
        let result = ActionResult::capture(
            played,
            vec![played.with_copy(1), played],
            vec![[played.with_copy(1), played]],
        );
        policy.observe(&Action::Discard { card: played }, &result);

        // 2 captured + 10 for the mulle, times 0.5
        assert_eq!(policy.weight(ActionCategory::CaptureComboMulle), 6.0);
        assert_eq!(policy.weight(ActionCategory::CaptureCombo), 0.0);

        policy.observe(&Action::Trotta { card: played }, &ActionResult::build(ActionKind::Trotta, played));
        assert_eq!(policy.weight(ActionCategory::Trotta), 1.0);
    }

    #[test]
    fn test_weights_clamped_at_zero() {
        let mut policy = LearningPolicy::new(1.0);
        policy.learn(ActionCategory::Discard, -5.0);
        assert_eq!(policy.weight(ActionCategory::Discard), 0.0);
    }

    #[test]
    fn test_learned_weight_changes_choice() {
        let mut board = Board::new();
        board.add_card(card("SP3"));
        let mut player = Player::new(PlayerId::new(0), "Anna");
        player.add_to_hand([card("HJ4"), card("KL7")]);

        // Build (1.5) beats discard (0) until discards are worth more
        let mut policy = LearningPolicy::new(1.0);
        assert_eq!(policy.choose(&board, &player).unwrap().kind(), ActionKind::Build);

        policy.learn(ActionCategory::Discard, 2.0);
        assert_eq!(policy.choose(&board, &player).unwrap().kind(), ActionKind::Discard);
    }

    #[test]
    fn test_exploration_is_seeded() {
        let mut board = Board::new();
        board.add_card(card("SP3"));
        let mut player = Player::new(PlayerId::new(0), "Anna");
        player.add_to_hand([card("HJ4"), card("KL7"), card("RU9")]);

        let mut a = LearningPolicy::default().with_exploration(1.0, 7);
        let mut b = LearningPolicy::default().with_exploration(1.0, 7);
        for _ in 0..5 {
            assert_eq!(a.choose(&board, &player), b.choose(&board, &player));
        }
    }
}
