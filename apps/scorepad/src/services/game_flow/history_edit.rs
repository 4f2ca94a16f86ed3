use tracing::debug;

use super::{no_game, GameFlow};
use crate::domain::game;
use crate::domain::state::{Phase, PlayPhase};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::store::GameStore;

impl<S: GameStore> GameFlow<S> {
    /// Enter history editing from any play phase once a round is complete.
    pub fn begin_edit(&mut self) -> Result<(), DomainError> {
        let return_to = match self.phase {
            Phase::Guessing => PlayPhase::Guessing,
            Phase::Tricking => PlayPhase::Tricking,
            Phase::GameOver => PlayPhase::GameOver,
            other => return Err(super::phase_mismatch("edit history", other)),
        };
        let state = self.game.as_ref().ok_or_else(no_game)?;
        if state.history().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("NoHistory".into()),
                "No completed rounds to edit",
            ));
        }
        self.phase = Phase::EditingHistory { return_to };
        debug!(?return_to, "History edit started");
        Ok(())
    }

    /// Replace one round's tricks and return to play. On error the edit stays open.
    pub fn save_edit(&mut self, round_index: usize, new_tricks: &[i32]) -> Result<(), DomainError> {
        let return_to = self.editing()?;
        let state = self.game.as_mut().ok_or_else(no_game)?;
        game::edit_tricks_and_recalculate(state, round_index, new_tricks)?;
        self.phase = return_to.into();
        self.persist();
        Ok(())
    }

    /// Replace every round's tricks from a full history table and return to play.
    pub fn save_history_edit(&mut self, all_tricks: &[Vec<i32>]) -> Result<(), DomainError> {
        let return_to = self.editing()?;
        let state = self.game.as_mut().ok_or_else(no_game)?;
        game::edit_history(state, all_tricks)?;
        self.phase = return_to.into();
        self.persist();
        Ok(())
    }

    /// Leave the edit without changing anything.
    pub fn cancel_edit(&mut self) -> Result<(), DomainError> {
        let return_to = self.editing()?;
        self.phase = return_to.into();
        Ok(())
    }

    fn editing(&self) -> Result<PlayPhase, DomainError> {
        match self.phase {
            Phase::EditingHistory { return_to } => Ok(return_to),
            other => Err(super::phase_mismatch("save a history edit", other)),
        }
    }
}
