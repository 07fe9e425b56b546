//! The turn, deal and round state machine.
//!
//! ## Phases
//!
//! ```text
//! NotStarted --start_game--> InRound --last deal played--> RoundScored
//!                               ^                              |
//!                               +------ no winner yet ---------+
//!                                                              |
//!                                           a total reached -> GameOver
//! ```
//!
//! `RoundScored` is entered and left inside the call that plays the last card
//! of a round, so callers only ever observe `NotStarted`, `InRound` or
//! `GameOver`.
//!
//! ## Turns
//!
//! Every successful action ends the turn. When all hands are empty the next
//! deal is dealt if the deck can give every player a full hand; otherwise the
//! round ends. Remaining board cards go to the player who captured the most
//! cards this round (lowest seat on ties).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::snapshot::{AvailableActions, GameSnapshot, RoundState, RoundSummary};
use crate::ai::{ActionPolicy, HeuristicPolicy};
use crate::board::{Board, Pile};
use crate::cards::{Card, Deck};
use crate::core::{
    Action, ActionKind, ActionRecord, ActionResult, GameConfig, GameRng, IllegalAction, InternalError, Player,
    PlayerId, PlayerMap, Result,
};
use crate::rules::{
    apply_action, buildable_piles, check_build, generate_capture_combinations, plan_discard, plan_trotta,
    score_round, ScoreBreakdown,
};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InRound,
    RoundScored,
    GameOver,
}

/// A complete Mulle game: deck, board, seats and round progression.
///
/// Seat 0 is the human seat; every other seat is automated. The engine does
/// not enforce this: any seat can be driven by [`MulleEngine::execute_ai_turn`]
/// or the `player_*` methods.
#[derive(Clone, Debug)]
pub struct MulleEngine {
    config: GameConfig,
    rng: GameRng,
    deck: Deck,
    board: Board,
    players: Vec<Player>,
    phase: GamePhase,
    round_number: u32,
    deal_number: u32,
    current: PlayerId,
    round_starter: PlayerId,
    sequence: u32,
    history: Vector<ActionRecord>,
    round_start: usize,
    rounds: Vec<RoundSummary>,
    cumulative: PlayerMap<u32>,
}

impl MulleEngine {
    /// Build an engine from a validated config. Nothing is dealt yet.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let deck = Deck::shuffled(&mut rng.fork());
        let players = config
            .player_names
            .iter()
            .zip(PlayerId::all(config.player_count()))
            .map(|(name, id)| Player::new(id, name.clone()))
            .collect();
        let cumulative = PlayerMap::with_value(config.player_count(), 0);

        Ok(Self {
            config,
            rng,
            deck,
            board: Board::new(),
            players,
            phase: GamePhase::NotStarted,
            round_number: 1,
            deal_number: 1,
            current: PlayerId::new(0),
            round_starter: PlayerId::new(0),
            sequence: 0,
            history: Vector::new(),
            round_start: 0,
            rounds: Vec::new(),
            cumulative,
        })
    }

    /// Deal the first hands and the opening board layout.
    pub fn start_game(&mut self) -> Result<()> {
        if self.phase != GamePhase::NotStarted {
            return Err(IllegalAction::AlreadyStarted.into());
        }
        self.phase = GamePhase::InRound;
        info!(
            players = self.players.len(),
            seed = self.rng.seed(),
            "game started"
        );
        self.deal()?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current.index()]
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    /// Seat 0 is human, all other seats are automated.
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.current.index() != 0
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn deal_number(&self) -> u32 {
        self.deal_number
    }

    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Scores of the round in progress, or of the final round once over.
    #[must_use]
    pub fn final_scores(&self) -> Vec<ScoreBreakdown> {
        score_round(&self.players)
    }

    /// Every executed action, oldest first.
    #[must_use]
    pub fn action_history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Scored rounds, oldest first.
    #[must_use]
    pub fn round_history(&self) -> &[RoundSummary] {
        &self.rounds
    }

    /// Round totals summed over every scored round.
    #[must_use]
    pub fn cumulative_scores(&self) -> &PlayerMap<u32> {
        &self.cumulative
    }

    /// What the current player could do with `card`. Read-only.
    #[must_use]
    pub fn available_actions(&self, card: &Card) -> AvailableActions {
        let player = self.current_player();
        let capture_combinations = generate_capture_combinations(&self.board, card);
        AvailableActions {
            can_capture: !capture_combinations.is_empty(),
            capture_combinations,
            can_build: buildable_piles(&self.board, player, card),
            can_discard: plan_discard(&self.board, player, card).is_ok(),
            can_trotta: plan_trotta(&self.board, player, card).is_ok(),
        }
    }

    /// An owned copy of the whole game state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            players: self.players.clone(),
            round: RoundState {
                round_number: self.round_number,
                deal_number: self.deal_number,
                current_player_index: self.current.index(),
                is_round_over: self.is_game_over(),
            },
            scores: score_round(&self.players),
            phase: self.phase,
            deck_remaining: self.deck.remaining(),
            cumulative_scores: self.cumulative.clone(),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Capture the piles at `piles` with `card`.
    ///
    /// The piles must be exactly a combination offered by
    /// [`generate_capture_combinations`], in any order.
    pub fn player_capture(&mut self, card: Card, piles: &[usize]) -> Result<ActionResult> {
        self.play(Action::Capture {
            card,
            piles: piles.iter().copied().collect(),
        })
    }

    /// Build `card` onto the pile at `pile`.
    pub fn player_build(&mut self, card: Card, pile: usize, declared_value: Option<u32>) -> Result<ActionResult> {
        self.play(Action::Build {
            card,
            pile,
            declared_value,
        })
    }

    /// Discard (trail or feed) `card`.
    pub fn player_discard(&mut self, card: Card) -> Result<ActionResult> {
        self.play(Action::Discard { card })
    }

    /// Trotta with `card`.
    pub fn player_trotta(&mut self, card: Card) -> Result<ActionResult> {
        self.play(Action::Trotta { card })
    }

    /// Autoplay the current seat with the heuristic.
    pub fn execute_ai_turn(&mut self) -> Result<ActionResult> {
        self.execute_turn_with(&mut HeuristicPolicy)
    }

    /// Let `policy` choose for the current seat, then play its choice.
    pub fn execute_turn_with(&mut self, policy: &mut dyn ActionPolicy) -> Result<ActionResult> {
        self.ensure_in_round()?;
        let action = policy.choose(&self.board, self.current_player())?;
        let result = self.play(action.clone())?;
        policy.observe(&action, &result);
        Ok(result)
    }

    /// Validate and execute `action` for the current seat, then end the turn.
    pub fn play(&mut self, action: Action) -> Result<ActionResult> {
        self.ensure_in_round()?;
        self.validate(&action)?;

        let seat = self.current;
        let player = &mut self.players[seat.index()];
        let result = apply_action(&mut self.board, player, &action, self.round_number)?;
        if result.kind == ActionKind::Capture && self.board.is_empty() {
            player.tabbe += 1;
            debug!(player = %seat, tabbe = player.tabbe, "tabbe");
        }

        self.history.push_back(ActionRecord {
            player: seat,
            action,
            round: self.round_number,
            deal: self.deal_number,
            sequence: self.sequence,
        });
        self.sequence += 1;

        self.end_turn()?;
        Ok(result)
    }

    /// Drive every seat with the heuristic until the game ends or `max_turns`
    /// actions were played. Starts the game if needed. Returns the turns played.
    pub fn run_to_completion(&mut self, max_turns: usize) -> Result<usize> {
        if self.phase == GamePhase::NotStarted {
            self.start_game()?;
        }
        let mut turns = 0;
        while !self.is_game_over() && turns < max_turns {
            self.execute_ai_turn()?;
            turns += 1;
        }
        Ok(turns)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_in_round(&self) -> Result<(), IllegalAction> {
        match self.phase {
            GamePhase::NotStarted => Err(IllegalAction::NotStarted),
            GamePhase::GameOver => Err(IllegalAction::GameOver),
            GamePhase::InRound | GamePhase::RoundScored => Ok(()),
        }
    }

    fn validate(&self, action: &Action) -> Result<(), IllegalAction> {
        let player = self.current_player();
        let card = action.card();
        if !player.holds(&card) {
            return Err(IllegalAction::CardNotInHand { card });
        }

        match action {
            Action::Capture { piles, .. } => {
                let mut requested: Vec<usize> = piles.to_vec();
                requested.sort_unstable();
                requested.dedup();
                if let Some(&index) = requested.iter().find(|&&i| i >= self.board.len()) {
                    return Err(IllegalAction::NoSuchPile { index });
                }
                let offered = generate_capture_combinations(&self.board, &card);
                if !offered.iter().any(|group| group.as_slice() == requested.as_slice()) {
                    return Err(IllegalAction::InvalidCapture { card });
                }
                Ok(())
            }
            Action::Build {
                pile,
                declared_value,
                ..
            } => check_build(&self.board, player, *pile, &card, *declared_value).map(|_| ()),
            Action::Discard { .. } | Action::Trotta { .. } => Ok(()),
        }
    }

    fn deal(&mut self) -> Result<(), InternalError> {
        for player in &mut self.players {
            let cards = self.deck.draw_many(self.config.cards_per_deal);
            player.add_to_hand(cards);
        }

        if self.deal_number == 1 {
            for _ in 0..self.config.initial_board_size {
                let card = self.deck.draw().map_err(|err| {
                    error!(round = self.round_number, "deck ran out while laying the board");
                    err
                })?;
                self.board.add_card(card);
            }
        }

        debug!(
            round = self.round_number,
            deal = self.deal_number,
            deck = self.deck.remaining(),
            board = self.board.len(),
            "dealt"
        );
        Ok(())
    }

    fn end_turn(&mut self) -> Result<(), InternalError> {
        if self.players.iter().all(|p| p.hand.is_empty()) {
            let needed = self.players.len() * self.config.cards_per_deal;
            if self.deck.remaining() >= needed {
                self.deal_number += 1;
                self.deal()?;
            } else {
                return self.end_round();
            }
        }
        self.current = self.current.next(self.players.len());
        Ok(())
    }

    fn end_round(&mut self) -> Result<(), InternalError> {
        self.phase = GamePhase::RoundScored;

        let last_capturer = self.last_capturer();
        let leftover: Vec<Card> = self.board.clear().into_iter().flat_map(Pile::into_cards).collect();
        match last_capturer {
            Some(seat) => self.players[seat.index()].record_capture(&leftover),
            None if !leftover.is_empty() => {
                debug!(cards = leftover.len(), "nobody captured this round; board cleared");
            }
            None => {}
        }

        let scores = score_round(&self.players);
        for score in &scores {
            self.cumulative[score.player] += score.total;
        }
        info!(
            round = self.round_number,
            totals = ?scores.iter().map(|s| s.total).collect::<Vec<_>>(),
            "round scored"
        );

        let summary = RoundSummary {
            round_number: self.round_number,
            scores,
            last_capturer,
            leftover_cards: leftover.len(),
            actions: self.history.clone().slice(self.round_start..),
        };
        let winners: Vec<PlayerId> = summary.players_reaching(self.config.rounds_to_win).collect();
        self.rounds.push(summary);

        if !winners.is_empty() {
            self.phase = GamePhase::GameOver;
            info!(round = self.round_number, ?winners, "game over");
            return Ok(());
        }

        self.round_number += 1;
        self.deal_number = 1;
        self.sequence = 0;
        self.round_start = self.history.len();
        self.deck = Deck::shuffled(&mut self.rng.fork());
        self.board = Board::new();
        for player in &mut self.players {
            player.reset_round();
        }
        self.round_starter = self.round_starter.next(self.players.len());
        self.current = self.round_starter;
        self.phase = GamePhase::InRound;
        self.deal()
    }

    /// Seat with the strictly most captured cards; lowest seat on ties.
    fn last_capturer(&self) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, usize)> = None;
        for player in &self.players {
            let count = player.captured.len();
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((player.id, count));
            }
        }
        best.map(|(seat, _)| seat)
    }
}
