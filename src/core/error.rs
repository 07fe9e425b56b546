//! Error types.
//!
//! Two kinds of failure are kept apart:
//! - [`IllegalAction`]: the caller asked for something the rules forbid.
//!   Nothing was mutated; the caller may retry with another action.
//! - [`InternalError`]: the engine reached a state its own bookkeeping says is
//!   impossible. Report it as a bug.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::Card;

/// A rule violation raised before any state was touched.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("{card} is not in the player's hand")]
    CardNotInHand { card: Card },

    #[error("no pile at board index {index}")]
    NoSuchPile { index: usize },

    #[error("{card} cannot be discarded while a capture is available")]
    CaptureAvailable { card: Card },

    #[error("{card} cannot be trailed while the player has builds on the board")]
    TrailRestricted { card: Card },

    #[error("{card} is the only card that can take the player's {build_value}-build")]
    ReservedCard { card: Card, build_value: u32 },

    #[error("pile {index} has more than one loose card and cannot be built on")]
    MultiCardBase { index: usize },

    #[error("build at index {index} is locked")]
    LockedBuild { index: usize },

    #[error("build at index {index} belongs to another player")]
    NotBuildOwner { index: usize },

    #[error("{owner} already owns a build of value {value}")]
    ValueClaimed { value: u32, owner: PlayerId },

    #[error("no reservation card of value {value} left in hand")]
    MissingReservation { value: u32 },

    #[error("no pile on the board matches value {value} for trotta")]
    NoTrottaMatch { value: u32 },

    #[error("the chosen piles are not a legal capture for {card}")]
    InvalidCapture { card: Card },

    #[error("game already started")]
    AlreadyStarted,

    #[error("game not started")]
    NotStarted,

    #[error("game is over")]
    GameOver,

    #[error("training episode is over; reset to play again")]
    EpisodeOver,

    #[error("it is not the controlled seat's turn")]
    NotYourTurn,
}

/// An engine defect. Never caused by caller input.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum InternalError {
    #[error("deck exhausted during a guaranteed draw")]
    DeckExhausted,

    #[error("{player} has no legal move")]
    NoLegalMove { player: PlayerId },
}

/// Top-level engine error.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MulleError {
    #[error(transparent)]
    Illegal(#[from] IllegalAction),

    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MulleError {
    /// True for engine defects that should be reported as bugs.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, MulleError::Internal(_))
    }

    /// True if the caller can fix the problem by choosing another action.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            MulleError::Illegal(_) => true,
            MulleError::Internal(_) => false,
            MulleError::InvalidConfig(_) => false,
        }
    }

    /// The rule violation, if this is one.
    #[must_use]
    pub fn as_illegal(&self) -> Option<&IllegalAction> {
        match self {
            MulleError::Illegal(violation) => Some(violation),
            _ => None,
        }
    }
}

/// Error from parsing a card code.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid card code: {0:?}")]
pub struct ParseCardError(pub String);

/// Engine result type.
pub type Result<T, E = MulleError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_error_classification() {
        let illegal: MulleError = IllegalAction::NotStarted.into();
        assert!(illegal.is_recoverable());
        assert!(!illegal.is_internal());
        assert_eq!(illegal.as_illegal(), Some(&IllegalAction::NotStarted));

        let internal: MulleError = InternalError::DeckExhausted.into();
        assert!(internal.is_internal());
        assert!(!internal.is_recoverable());
        assert!(internal.as_illegal().is_none());

        let config = MulleError::InvalidConfig("no players".into());
        assert!(!config.is_internal());
        assert!(!config.is_recoverable());
    }

    #[test]
    fn test_display_is_transparent() {
        let card = Card::new(Suit::Spader, Rank::Five, 0);
        let err: MulleError = IllegalAction::CardNotInHand { card }.into();
        assert_eq!(err.to_string(), "SP 5 is not in the player's hand");
    }
}
