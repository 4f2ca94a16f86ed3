use crate::domain::guessing::all_guesses_valid;
use crate::domain::ledger::{RoundRecord, ScoreLedger};
use crate::domain::rules::{self, ROUNDS};

/// Stable 0-based seat index for the game's duration.
pub type PlayerIndex = usize;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Choosing how many players.
    Setup,
    /// Entering names for the chosen player count.
    NamingPlayers { player_count: usize },
    /// Collecting guesses for the current round.
    Guessing,
    /// Guesses locked in; collecting tricks won.
    Tricking,
    /// All rounds complete.
    GameOver,
    /// Correcting tricks in completed rounds; returns to `return_to` on save or cancel.
    EditingHistory { return_to: PlayPhase },
}

/// Phases a history edit can return to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PlayPhase {
    Guessing,
    Tricking,
    GameOver,
}

impl From<PlayPhase> for Phase {
    fn from(phase: PlayPhase) -> Self {
        match phase {
            PlayPhase::Guessing => Phase::Guessing,
            PlayPhase::Tricking => Phase::Tricking,
            PlayPhase::GameOver => Phase::GameOver,
        }
    }
}

/// Live state of the round being played. Replaced, never carried across rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    /// 0-based round index.
    pub round_index: usize,
    /// Cards dealt to each player this round.
    pub cards: u8,
    pub dealer: PlayerIndex,
    pub first_guesser: PlayerIndex,
    /// Guessing turn order, dealer last.
    pub guess_order: Vec<PlayerIndex>,
    /// Guesses per player; `None` is unset.
    pub guesses: Vec<Option<u8>>,
    /// Tricks won per player; `None` is unset.
    pub tricks: Vec<Option<u8>>,
}

impl RoundState {
    pub fn player_count(&self) -> usize {
        self.guesses.len()
    }

    pub fn guesses_complete(&self) -> bool {
        self.guesses.iter().all(Option::is_some)
    }

    pub fn tricks_complete(&self) -> bool {
        self.tricks.iter().all(Option::is_some)
    }
}

/// Result of setting up a round: either a live round or the end of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundSetup {
    InProgress(RoundState),
    GameComplete,
}

/// Entire game container: names, history, totals, and the live round.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Display names, indexed by player.
    pub player_names: Vec<String>,
    /// Completed rounds and running totals.
    pub ledger: ScoreLedger,
    /// 0-based index of the round being played; `ROUNDS` once the game is over.
    pub current_round: usize,
    /// Live round, `None` once the game is over.
    pub round: Option<RoundState>,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    pub fn history(&self) -> &[RoundRecord] {
        self.ledger.history()
    }

    pub fn scores(&self) -> &[i16] {
        self.ledger.scores()
    }

    pub fn is_complete(&self) -> bool {
        self.current_round >= ROUNDS
    }

    pub fn player_name(&self, player: PlayerIndex) -> &str {
        self.player_names
            .get(player)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Dealer of the live round, or of the last round once the game is over.
    pub fn dealer(&self) -> PlayerIndex {
        let round_index = self.current_round.min(ROUNDS - 1);
        rules::dealer_for_round(round_index, self.player_count())
    }

    /// Play phase implied by the stored data alone.
    ///
    /// Used when resuming: a round whose guesses are complete and legal was
    /// already past guess submission.
    pub fn play_phase(&self) -> PlayPhase {
        match &self.round {
            None => PlayPhase::GameOver,
            Some(_) if self.is_complete() => PlayPhase::GameOver,
            Some(round) if all_guesses_valid(round) => PlayPhase::Tricking,
            Some(_) => PlayPhase::Guessing,
        }
    }
}
