//! The shared table zone.
//!
//! - `Pile`: a loose card stack or a Build, matched exhaustively
//! - `Build`: an owned meld with a declared value
//! - `Board`: ordered piles plus Build construction (merge and absorption)

pub mod build;
pub mod pile;
pub mod table;

pub use build::Build;
pub use pile::Pile;
pub use table::Board;
