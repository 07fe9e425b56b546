//! Single-round training episodes.
//!
//! An episode starts with a fresh game and ends when its first round is
//! scored. The caller acts for [`CONTROLLED_SEAT`]; after each step every
//! other seat plays with the heuristic until the controlled seat is to move
//! again. The reward is the one [`LearningPolicy`] learns from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{enumerate_candidate_actions, CandidateAction, GreedyPolicy, HeuristicPolicy, LearningPolicy};
use crate::board::Board;
use crate::cards::Card;
use crate::core::{Action, ActionResult, GameConfig, IllegalAction, PlayerId, Result};
use crate::game::MulleEngine;
use crate::rules::ScoreBreakdown;

/// The seat driven by the caller.
pub const CONTROLLED_SEAT: PlayerId = PlayerId::new(0);

/// The controlled seat's view before it acts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub board: Board,
    pub hand: Vec<Card>,
    /// Hand sizes of the other seats, in seat order.
    pub opponent_cards: Vec<usize>,
    pub round_number: u32,
    /// Empty once the episode is done.
    pub legal_actions: Vec<CandidateAction>,
}

/// Result of one [`TrainingEnv::step`].
///
/// On the final step of a game that goes on, the observed board and hand
/// already belong to the next round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub player_result: ActionResult,
    /// Autoplayed turns of the other seats, in order.
    pub opponent_results: Vec<ActionResult>,
    /// Round scores, set on the final step.
    pub scores: Option<Vec<ScoreBreakdown>>,
}

/// Reset/step wrapper around a [`MulleEngine`].
#[derive(Clone, Debug)]
pub struct TrainingEnv {
    config: GameConfig,
    engine: MulleEngine,
    episodes: u64,
    episode_round: u32,
    done: bool,
}

impl TrainingEnv {
    /// Create an environment. Call [`TrainingEnv::reset`] before stepping.
    ///
    /// With a seed, episode `n` is dealt from `seed + n`.
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = MulleEngine::new(config.clone())?;
        Ok(Self {
            config,
            engine,
            episodes: 0,
            episode_round: 1,
            done: true,
        })
    }

    /// Start a new episode and return the first observation.
    pub fn reset(&mut self) -> Result<Observation> {
        let mut config = self.config.clone();
        config.seed = self.config.seed.map(|seed| seed.wrapping_add(self.episodes));
        self.episodes += 1;

        self.engine = MulleEngine::new(config)?;
        self.engine.start_game()?;
        self.episode_round = self.engine.round_number();
        self.done = false;
        self.advance_opponents()?;
        debug!(episode = self.episodes, "training episode reset");
        Ok(self.observe())
    }

    /// Play `action` for the controlled seat (greedy if `None`), then let the
    /// other seats move.
    ///
    /// An illegal action is returned as an error and changes nothing.
    pub fn step(&mut self, action: Option<Action>) -> Result<StepOutcome> {
        if self.done {
            return Err(IllegalAction::EpisodeOver.into());
        }
        if self.engine.current_player_id() != CONTROLLED_SEAT {
            return Err(IllegalAction::NotYourTurn.into());
        }

        let player_result = match action {
            Some(action) => self.engine.play(action)?,
            None => self.engine.execute_turn_with(&mut GreedyPolicy)?,
        };
        let reward = LearningPolicy::reward(&player_result);
        let opponent_results = self.advance_opponents()?;
        let scores = if self.done {
            self.engine.round_history().last().map(|round| round.scores.clone())
        } else {
            None
        };

        debug!(reward, done = self.done, opponents = opponent_results.len(), "training step");
        Ok(StepOutcome {
            observation: self.observe(),
            reward,
            done: self.done,
            player_result,
            opponent_results,
            scores,
        })
    }

    /// Candidate actions for the controlled seat. Empty when it cannot act.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<CandidateAction> {
        if self.done || self.engine.current_player_id() != CONTROLLED_SEAT {
            return Vec::new();
        }
        enumerate_candidate_actions(self.engine.board(), self.engine.current_player())
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The wrapped engine, for inspection.
    #[must_use]
    pub fn engine(&self) -> &MulleEngine {
        &self.engine
    }

    fn advance_opponents(&mut self) -> Result<Vec<ActionResult>> {
        let mut results = Vec::new();
        loop {
            if self.engine.is_game_over() || self.engine.round_number() != self.episode_round {
                self.done = true;
                break;
            }
            if self.engine.current_player_id() == CONTROLLED_SEAT {
                break;
            }
            results.push(self.engine.execute_turn_with(&mut HeuristicPolicy)?);
        }
        Ok(results)
    }

    fn observe(&self) -> Observation {
        let players = self.engine.players();
        Observation {
            board: self.engine.board().clone(),
            hand: players[CONTROLLED_SEAT.index()].hand.clone(),
            opponent_cards: players
                .iter()
                .filter(|p| p.id != CONTROLLED_SEAT)
                .map(|p| p.hand.len())
                .collect(),
            round_number: self.episode_round,
            legal_actions: self.legal_actions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InternalError, MulleError};

    fn env(seed: u64) -> TrainingEnv {
        TrainingEnv::new(GameConfig::new(["Anna", "Bo"]).with_seed(seed)).unwrap()
    }

    fn stranded(err: &MulleError) -> bool {
        matches!(err, MulleError::Internal(InternalError::NoLegalMove { .. }))
    }

    #[test]
    fn test_step_requires_reset() {
        let mut env = env(1);
        assert!(env.is_done());
        assert_eq!(env.step(None), Err(IllegalAction::EpisodeOver.into()));
        assert!(env.legal_actions().is_empty());
    }

    #[test]
    fn test_reset_deals_a_fresh_round() {
        let mut env = env(1);
        let observation = env.reset().unwrap();

        assert!(!env.is_done());
        assert_eq!(observation.hand.len(), 8);
        assert_eq!(observation.opponent_cards, vec![8]);
        assert_eq!(observation.board.len(), 8);
        assert_eq!(observation.round_number, 1);
        assert_eq!(observation.legal_actions, env.legal_actions());
        assert!(!observation.legal_actions.is_empty());
    }

    #[test]
    fn test_step_plays_both_seats() {
        let mut env = env(2);
        env.reset().unwrap();

        let outcome = match env.step(None) {
            Ok(outcome) => outcome,
            Err(err) if stranded(&err) => return,
            Err(err) => panic!("step failed: {err}"),
        };
        assert!(!outcome.done);
        assert_eq!(outcome.reward, LearningPolicy::reward(&outcome.player_result));
        assert_eq!(outcome.opponent_results.len(), 1);
        assert_eq!(outcome.observation.hand.len(), 7);
        assert_eq!(outcome.observation.opponent_cards, vec![7]);
        assert!(outcome.scores.is_none());
        assert_eq!(env.engine().action_history().len(), 2);
    }

    #[test]
    fn test_illegal_step_changes_nothing() {
        let mut env = env(3);
        let before = env.reset().unwrap();
        let card = env.engine().players()[1].hand[0];
        assert!(!before.hand.contains(&card));

        assert_eq!(
            env.step(Some(Action::Discard { card })),
            Err(IllegalAction::CardNotInHand { card }.into())
        );
        assert_eq!(env.observe(), before);
    }

    #[test]
    fn test_episode_ends_with_round_scores() {
        for seed in 0..6 {
            let mut env = env(seed);
            env.reset().unwrap();

            let mut last = None;
            for _ in 0..100 {
                match env.step(None) {
                    Ok(outcome) => {
                        let done = outcome.done;
                        last = Some(outcome);
                        if done {
                            break;
                        }
                    }
                    Err(err) if stranded(&err) => break,
                    Err(err) => panic!("seed {seed}: {err}"),
                }
            }
            let Some(outcome) = last.filter(|o| o.done) else {
                continue;
            };

            let scores = outcome.scores.unwrap();
            assert_eq!(scores.len(), 2);
            assert_eq!(scores, env.engine().round_history()[0].scores);
            assert!(outcome.observation.legal_actions.is_empty());
            assert_eq!(env.step(None), Err(IllegalAction::EpisodeOver.into()));

            // The next episode starts over at round 1
            let again = env.reset().unwrap();
            assert_eq!(again.round_number, 1);
            assert_eq!(again.hand.len(), 8);
            return;
        }
        panic!("no episode finished");
    }

    #[test]
    fn test_seeded_episodes_repeat() {
        let mut a = env(9);
        let mut b = env(9);
        assert_eq!(a.reset().unwrap(), b.reset().unwrap());
        assert_eq!(a.step(None), b.step(None));
        assert_eq!(a.reset().unwrap(), b.reset().unwrap());
    }
}
