//! Game flow service: the phase state machine over the pure engine, with
//! best-effort persistence after every committing step.

mod history_edit;
mod player_actions;
mod round_lifecycle;

use tracing::{debug, error, info, warn};

use crate::domain::ledger::RoundRecord;
use crate::domain::snapshot;
use crate::domain::standings::{self, GameOutcome, Standings};
use crate::domain::state::{GameState, Phase, RoundState};
use crate::domain::view::{self, HistoryRow, RoundView};
use crate::domain::warnings::RoundWarning;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::store::{GameStore, StoreError};

/// Result of submitting a round's tricks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The round was scored and appended to history.
    Committed(RoundRecord),
    /// Nothing changed; resubmit with confirmation to accept the totals.
    NeedsConfirmation(RoundWarning),
}

pub struct GameFlow<S: GameStore> {
    store: S,
    phase: Phase,
    game: Option<GameState>,
    last_save_failed: bool,
}

impl<S: GameStore> GameFlow<S> {
    /// Fresh flow in `Setup`, ignoring anything saved.
    pub fn new(store: S) -> Self {
        Self {
            store,
            phase: Phase::Setup,
            game: None,
            last_save_failed: false,
        }
    }

    /// Restore the saved game, if any, into the phase its data implies.
    ///
    /// An unreadable or malformed save is discarded with a warning. Store
    /// I/O and lock failures are returned.
    pub fn resume(store: S) -> Result<Self, AppError> {
        let game = match store.load() {
            Ok(Some(value)) => snapshot::restore_or_fresh(&value),
            Ok(None) => None,
            Err(StoreError::Corrupt(detail)) => {
                warn!(%detail, "Saved game unreadable; starting fresh");
                None
            }
            Err(e) => return Err(e.into()),
        };
        let phase = game
            .as_ref()
            .map_or(Phase::Setup, |g| Phase::from(g.play_phase()));
        info!(?phase, "Game flow resumed");
        Ok(Self {
            store,
            phase,
            game,
            last_save_failed: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the most recent save attempt failed.
    pub fn last_save_failed(&self) -> bool {
        self.last_save_failed
    }

    pub fn standings(&self) -> Option<Standings> {
        self.game.as_ref().and_then(standings::standings)
    }

    pub fn summary(&self) -> Option<String> {
        self.game.as_ref().map(standings::summary)
    }

    /// Final result, only once every round is complete.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.game
            .as_ref()
            .filter(|g| g.is_complete())
            .and_then(standings::outcome)
    }

    pub fn round_view(&self) -> Option<RoundView> {
        self.game.as_ref().map(view::round_view)
    }

    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.game.as_ref().map(view::history_rows).unwrap_or_default()
    }

    /// Live warnings for the round on screen.
    pub fn warnings(&self) -> Vec<RoundWarning> {
        let Some(round) = self.live_round() else {
            return Vec::new();
        };
        let warning = match self.phase {
            Phase::Guessing => crate::domain::guessing::dealer_warning(round),
            Phase::Tricking => crate::domain::tricks::trick_total_warning(round),
            _ => None,
        };
        warning.into_iter().collect()
    }

    fn live_round(&self) -> Option<&RoundState> {
        self.game.as_ref().and_then(|g| g.round.as_ref())
    }

    fn require_phase(&self, allowed: bool, action: &str) -> Result<(), DomainError> {
        if allowed {
            Ok(())
        } else {
            Err(phase_mismatch(action, self.phase))
        }
    }

    /// Save the current game. Failures are logged and never undo the change.
    fn persist(&mut self) {
        let Some(game) = &self.game else {
            return;
        };
        match self.store.save(&snapshot::serialize(game)) {
            Ok(()) => {
                debug!(current_round = game.current_round, "Game persisted");
                self.last_save_failed = false;
            }
            Err(e) => {
                error!(error = %e, "Failed to save game; play continues unsaved");
                self.last_save_failed = true;
            }
        }
    }
}

fn phase_mismatch(action: &str, phase: Phase) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("Cannot {action} while in {phase:?}"),
    )
}

fn no_game() -> DomainError {
    DomainError::validation(ValidationKind::PhaseMismatch, "No game in progress")
}
