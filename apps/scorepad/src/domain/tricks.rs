//! Trick collection and round finalization.

use tracing::{debug, warn};

use crate::domain::guessing::{check_guesses, count_in_range, require_player};
use crate::domain::ledger::RoundOutcome;
use crate::domain::scoring::round_deltas;
use crate::domain::state::{PlayerIndex, RoundState};
use crate::domain::warnings::RoundWarning;
use crate::errors::domain::{DomainError, ValidationKind};

/// Record tricks won. Out-of-range input is stored as unset.
pub fn record_tricks(
    state: &mut RoundState,
    player: PlayerIndex,
    value: i32,
) -> Result<Option<u8>, DomainError> {
    require_player(state, player)?;
    let stored = count_in_range(value, state.cards);
    state.tricks[player] = stored;
    debug!(round_index = state.round_index, player, value, ?stored, "Tricks recorded");
    Ok(stored)
}

/// Every player has a tricks-won count in range.
pub fn check_tricks(state: &RoundState) -> Result<(), DomainError> {
    match state.tricks.iter().position(Option::is_none) {
        None => Ok(()),
        Some(player) => Err(DomainError::validation(
            ValidationKind::InvalidTricks {
                round_index: state.round_index,
                player,
            },
            format!(
                "Please enter a valid tricks count (0-{}) for player {}",
                state.cards,
                player + 1
            ),
        )),
    }
}

pub fn all_tricks_valid(state: &RoundState) -> bool {
    check_tricks(state).is_ok()
}

/// Sum of the tricks recorded so far.
pub fn trick_total(state: &RoundState) -> u32 {
    state.tricks.iter().flatten().map(|&t| t as u32).sum()
}

/// Soft warning when complete tricks do not add up to the cards dealt.
pub fn trick_total_warning(state: &RoundState) -> Option<RoundWarning> {
    if !state.tricks_complete() {
        return None;
    }
    let total = trick_total(state);
    (total != state.cards as u32).then_some(RoundWarning::TrickTotalMismatch {
        total,
        cards: state.cards,
    })
}

/// Score the round. Pure: the same state always yields the same outcome.
///
/// A trick-total mismatch is not checked here; confirming it is the caller's call.
pub fn finalize_round(state: &RoundState) -> Result<RoundOutcome, DomainError> {
    check_guesses(state)?;
    check_tricks(state)?;

    let guesses: Vec<u8> = state.guesses.iter().flatten().copied().collect();
    let tricks: Vec<u8> = state.tricks.iter().flatten().copied().collect();
    if let Some(w) = trick_total_warning(state) {
        warn!(round_index = state.round_index, warning = ?w, "Finalizing round with trick total mismatch");
    }
    let deltas = round_deltas(&guesses, &tricks);

    Ok(RoundOutcome {
        round_index: state.round_index,
        cards: state.cards,
        guesses,
        tricks,
        deltas,
    })
}
