use tracing::{error, info};

use super::{no_game, GameFlow, SubmitOutcome};
use crate::domain::game;
use crate::domain::rules;
use crate::domain::state::Phase;
use crate::domain::tricks::{check_tricks, trick_total_warning};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::store::GameStore;

impl<S: GameStore> GameFlow<S> {
    /// Setup → NamingPlayers.
    pub fn choose_player_count(&mut self, player_count: usize) -> Result<(), DomainError> {
        self.require_phase(self.phase == Phase::Setup, "choose the player count")?;
        if !rules::valid_player_count(player_count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount {
                    count: player_count,
                },
                format!(
                    "Please enter a number of players between {} and {}.",
                    rules::MIN_PLAYERS,
                    rules::MAX_PLAYERS
                ),
            ));
        }
        self.phase = Phase::NamingPlayers { player_count };
        Ok(())
    }

    /// NamingPlayers → Setup.
    pub fn back_to_count(&mut self) -> Result<(), DomainError> {
        self.require_phase(
            matches!(self.phase, Phase::NamingPlayers { .. }),
            "go back to the player count",
        )?;
        self.phase = Phase::Setup;
        Ok(())
    }

    /// NamingPlayers → Guessing with a fresh game.
    pub fn start_game(&mut self, names: &[String]) -> Result<(), DomainError> {
        let Phase::NamingPlayers { player_count } = self.phase else {
            return Err(super::phase_mismatch("start a game", self.phase));
        };
        self.game = Some(game::start_game(player_count, names)?);
        self.phase = Phase::Guessing;
        self.persist();
        Ok(())
    }

    /// Score the round and move on.
    ///
    /// Missing or out-of-range tricks are an error. A trick total that does
    /// not match the cards dealt needs `confirm_mismatch`; without it nothing
    /// changes and the warning is returned.
    pub fn submit_results(&mut self, confirm_mismatch: bool) -> Result<SubmitOutcome, DomainError> {
        self.require_phase(self.phase == Phase::Tricking, "submit results")?;
        let state = self.game.as_mut().ok_or_else(no_game)?;
        let round = state.round.as_ref().ok_or(DomainError::GameComplete)?;
        check_tricks(round)?;
        if let Some(warning) = trick_total_warning(round) {
            if !confirm_mismatch {
                return Ok(SubmitOutcome::NeedsConfirmation(warning));
            }
        }

        let record = game::complete_round(state)?;
        self.phase = if state.is_complete() {
            Phase::GameOver
        } else {
            Phase::Guessing
        };
        self.persist();
        Ok(SubmitOutcome::Committed(record))
    }

    /// Replace whatever is in progress with a fresh game, from any phase.
    ///
    /// The new game is built before anything is discarded, so a rejected
    /// player count leaves the current game and its save untouched.
    pub fn restart(&mut self, player_count: usize, names: &[String]) -> Result<(), DomainError> {
        let fresh = game::start_game(player_count, names)?;
        self.new_game();
        self.game = Some(fresh);
        self.phase = Phase::Guessing;
        self.persist();
        Ok(())
    }

    /// Discard the game and saved state, back to Setup. Allowed from any phase.
    pub fn new_game(&mut self) {
        if let Err(e) = self.store.clear() {
            error!(error = %e, "Failed to clear saved game");
        }
        self.game = None;
        self.phase = Phase::Setup;
        info!("New game requested");
    }
}
