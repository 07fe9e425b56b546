//! # mulle-engine
//!
//! Rules engine for Mulle, a two-deck Swedish capture card game.
//!
//! ## Design Principles
//!
//! 1. **One execution path**: human moves, the autoplay heuristic and any
//!    pluggable policy all produce an `Action` that runs through the same
//!    validation and the same `rules::apply_action`.
//!
//! 2. **No partial application**: every action checks its preconditions
//!    before mutating anything. A rule violation (`IllegalAction`) is kept
//!    apart from an engine defect (`InternalError`).
//!
//! 3. **Reproducible**: all randomness comes from a seeded `GameRng`, so
//!    equal seeds and equal actions give equal games.
//!
//! ## Architecture
//!
//! - **Tagged piles**: a board slot is `Pile::Cards` or `Pile::Build`,
//!   matched exhaustively, and addressed by board index.
//!
//! - **Bounded search**: captures and Build absorption share one subset-sum
//!   search that maximises the number of disjoint groups.
//!
//! - **Persistent history**: the action log is an `im::Vector`, so round
//!   summaries and snapshots share it cheaply.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, actions, errors
//! - `cards`: card identity and valuation, the 104-card deck
//! - `board`: piles, Builds and Build construction
//! - `rules`: capture search, action execution, legality, scoring
//! - `ai`: autoplay heuristic, candidate enumeration, policies
//! - `game`: the turn/deal/round orchestrator and its snapshots
//! - `training`: reset/step episodes for learning agents

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod ai;
pub mod game;
pub mod training;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, Player,
    GameRng, GameConfig,
    Action, ActionKind, ActionRecord, ActionResult, PileGroup,
    MulleError, IllegalAction, InternalError, Result,
};

pub use crate::cards::{Card, Deck, Rank, Suit};

pub use crate::board::{Board, Build, Pile};

pub use crate::rules::{
    apply_action, can_build, check_build, detect_mulles, generate_capture_combinations,
    perform_build, perform_capture, perform_discard, perform_trotta,
    score_player, score_round, ScoreBreakdown,
};

pub use crate::ai::{
    ActionPolicy, HeuristicPolicy, GreedyPolicy, LearningPolicy,
    ActionCategory, CandidateAction, enumerate_candidate_actions,
    auto_play_turn, select_heuristic_action,
};

pub use crate::game::{
    MulleEngine, GamePhase,
    GameSnapshot, RoundState, RoundSummary, AvailableActions,
};

pub use crate::training::{Observation, StepOutcome, TrainingEnv};
