use tracing::debug;

use super::{no_game, GameFlow};
use crate::domain::guessing::{self, check_guesses};
use crate::domain::state::{Phase, PlayerIndex, RoundState};
use crate::domain::tricks;
use crate::errors::domain::DomainError;
use crate::store::GameStore;

impl<S: GameStore> GameFlow<S> {
    /// Enter one player's guess. Out-of-range input clears the guess.
    pub fn record_guess(&mut self, player: PlayerIndex, value: i32) -> Result<Option<u8>, DomainError> {
        self.require_phase(self.phase == Phase::Guessing, "record a guess")?;
        guessing::record_guess(self.round_mut()?, player, value)
    }

    /// Lock in the guesses: Guessing → Tricking.
    pub fn submit_guesses(&mut self) -> Result<(), DomainError> {
        self.require_phase(self.phase == Phase::Guessing, "submit guesses")?;
        check_guesses(self.round_mut()?)?;
        self.phase = Phase::Tricking;
        debug!("Guesses submitted");
        self.persist();
        Ok(())
    }

    /// Enter one player's tricks won. Out-of-range input clears the value.
    pub fn record_tricks(&mut self, player: PlayerIndex, value: i32) -> Result<Option<u8>, DomainError> {
        self.require_phase(self.phase == Phase::Tricking, "record tricks")?;
        tricks::record_tricks(self.round_mut()?, player, value)
    }

    fn round_mut(&mut self) -> Result<&mut RoundState, DomainError> {
        let game = self.game.as_mut().ok_or_else(no_game)?;
        game.round.as_mut().ok_or(DomainError::GameComplete)
    }
}
