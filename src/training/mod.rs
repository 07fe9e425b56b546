//! Reset/step access to the engine for learning agents.
//!
//! ## Overview
//!
//! - **TrainingEnv**: one round per episode, seat 0 controlled by the caller,
//!   every other seat autoplayed
//! - **Observation**: what the controlled seat sees before acting
//! - **StepOutcome**: observation, reward and done flag after one step
//!
//! ## Usage
//!
//! ```
//! use mulle_engine::core::GameConfig;
//! use mulle_engine::training::TrainingEnv;
//!
//! let mut env = TrainingEnv::new(GameConfig::new(["Anna", "Bo"]).with_seed(3)).unwrap();
//! let first = env.reset().unwrap();
//! assert_eq!(first.hand.len(), 8);
//! assert!(!first.legal_actions.is_empty());
//! ```

pub mod environment;

pub use environment::{Observation, StepOutcome, TrainingEnv, CONTROLLED_SEAT};
