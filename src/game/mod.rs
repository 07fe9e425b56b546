//! Game orchestration.
//!
//! `MulleEngine` owns the deck, board and seats for a whole game and runs the
//! turn/deal/round state machine. `snapshot` holds the owned read views it
//! hands out.

pub mod engine;
pub mod snapshot;

pub use engine::{GamePhase, MulleEngine};
pub use snapshot::{AvailableActions, GameSnapshot, RoundState, RoundSummary};
