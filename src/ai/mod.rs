//! Automated players.
//!
//! - `heuristic`: the deterministic priority-list autoplay
//! - `candidates`: every legal action with a predicted reward
//! - `policy`: the `ActionPolicy` trait plus heuristic and greedy strategies
//! - `learning`: a category-weight learner built on the candidates
//!
//! None of these touch state directly except [`auto_play_turn`]; policies
//! return an [`Action`](crate::core::Action) for the engine to validate and
//! execute.

pub mod candidates;
pub mod heuristic;
pub mod learning;
pub mod policy;

pub use candidates::{enumerate_candidate_actions, ActionCategory, CandidateAction, BUILD_REWARD, MULLE_REWARD};
pub use heuristic::{auto_play_turn, select_heuristic_action};
pub use learning::{LearningPolicy, DEFAULT_LEARNING_RATE};
pub use policy::{ActionPolicy, GreedyPolicy, HeuristicPolicy};
