//! Core engine types: players, RNG, configuration, actions, errors.
//!
//! Everything here is free of Mulle rule logic; the rules live in `rules`
//! and operate on these types.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, ActionKind, ActionRecord, ActionResult, PileGroup};
pub use config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{IllegalAction, InternalError, MulleError, ParseCardError, Result};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
