//! Action representation, execution results, and history records.
//!
//! An `Action` names a card from the acting player's hand and, where needed,
//! the board piles it acts on (by index). Every seat, human or automated,
//! plays through the same `Action` values.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::Card;

/// Board indices of piles taken together in one capture.
///
/// SmallVec keeps the common 1-4 pile case off the heap.
pub type PileGroup = SmallVec<[usize; 4]>;

/// A complete player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play `card` and take the piles at `piles`.
    Capture { card: Card, piles: PileGroup },
    /// Add `card` to the pile at `pile`, forming or extending a Build.
    Build {
        card: Card,
        pile: usize,
        declared_value: Option<u32>,
    },
    /// Trail `card` (or feed it into an own Build of the same value).
    Discard { card: Card },
    /// Gather matching board material into a locked Build.
    Trotta { card: Card },
}

impl Action {
    /// The card played from hand.
    #[must_use]
    pub fn card(&self) -> Card {
        match self {
            Action::Capture { card, .. }
            | Action::Build { card, .. }
            | Action::Discard { card }
            | Action::Trotta { card } => *card,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Capture { .. } => ActionKind::Capture,
            Action::Build { .. } => ActionKind::Build,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Trotta { .. } => ActionKind::Trotta,
        }
    }
}

/// Action kind, without operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Capture,
    Build,
    Discard,
    Trotta,
}

/// Outcome of an executed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub kind: ActionKind,
    /// The card that left the player's hand.
    pub played: Card,
    /// Capture group (taken piles plus the played card). Empty unless capturing.
    pub captured: Vec<Card>,
    /// Mulle pairs found in the capture group.
    pub mulle_pairs: Vec<[Card; 2]>,
    /// A Build was created or merged into.
    pub build_created: bool,
    /// A discard was fed into an existing own Build instead of trailed.
    pub fed_build: bool,
}

impl ActionResult {
    pub(crate) fn capture(played: Card, captured: Vec<Card>, mulle_pairs: Vec<[Card; 2]>) -> Self {
        Self {
            kind: ActionKind::Capture,
            played,
            captured,
            mulle_pairs,
            build_created: false,
            fed_build: false,
        }
    }

    pub(crate) fn build(kind: ActionKind, played: Card) -> Self {
        Self {
            kind,
            played,
            captured: Vec::new(),
            mulle_pairs: Vec::new(),
            build_created: true,
            fed_build: false,
        }
    }

    pub(crate) fn fed(kind: ActionKind, played: Card) -> Self {
        Self {
            kind,
            played,
            captured: Vec::new(),
            mulle_pairs: Vec::new(),
            build_created: false,
            fed_build: true,
        }
    }

    pub(crate) fn trail(played: Card) -> Self {
        Self {
            kind: ActionKind::Discard,
            played,
            captured: Vec::new(),
            mulle_pairs: Vec::new(),
            build_created: false,
            fed_build: false,
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round number when the action was taken.
    pub round: u32,

    /// Deal number within the round.
    pub deal: u32,

    /// Sequence number within the round (for ordering).
    pub sequence: u32,
}
