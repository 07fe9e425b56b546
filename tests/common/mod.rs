//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use mulle_engine::{Board, Card, InternalError, MulleError, Player, PlayerId};
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static LOGGING: OnceCell<()> = OnceCell::new();
static STRANDED: AtomicUsize = AtomicUsize::new(0);

/// Install a test-friendly tracing subscriber once per test binary.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, and defaults to `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Parse a card code such as `"SP5"` (deck copy 0).
pub fn card(code: &str) -> Card {
    code.parse().unwrap()
}

/// A board of loose single-card piles, in the given order.
pub fn board_of(codes: &[&str]) -> Board {
    let mut board = Board::new();
    for code in codes {
        board.add_card(card(code));
    }
    board
}

/// A player at `seat` holding the given cards.
pub fn player_with(seat: u8, codes: &[&str]) -> Player {
    let mut player = Player::new(PlayerId::new(seat), format!("Seat {seat}"));
    player.add_to_hand(codes.iter().map(|c| card(c)));
    player
}

/// True if the autoplay heuristic ran out of legal moves.
///
/// This is the one engine defect a driven game may hit; every other error,
/// internal or not, is a test failure. Each hit is counted.
pub fn is_stranded(err: &MulleError) -> bool {
    let stranded = matches!(err, MulleError::Internal(InternalError::NoLegalMove { .. }));
    if stranded {
        STRANDED.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(%err, "autoplay stranded");
    }
    stranded
}

/// Stranded games seen so far by this test binary.
pub fn stranded_count() -> usize {
    STRANDED.load(Ordering::Relaxed)
}
