//! Game lifecycle: start, round completion, and history edits on a `GameState`.

use tracing::info;

use crate::domain::guessing::setup_round;
use crate::domain::ledger::{RoundRecord, ScoreLedger};
use crate::domain::rules;
use crate::domain::state::{GameState, RoundSetup};
use crate::domain::tricks::finalize_round;
use crate::errors::domain::{DomainError, ValidationKind};

pub fn default_player_name(player: usize) -> String {
    format!("Player {}", player + 1)
}

/// Start a fresh game. Blank or missing names fall back to "Player N".
pub fn start_game(player_count: usize, names: &[String]) -> Result<GameState, DomainError> {
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

    let player_names: Vec<String> = (0..player_count)
        .map(|i| {
            names
                .get(i)
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| default_player_name(i))
        })
        .collect();

    let round = match setup_round(0, player_count, None, None)? {
        RoundSetup::InProgress(round) => Some(round),
        RoundSetup::GameComplete => None,
    };

    info!(player_count, names = ?player_names, "Game started");
    Ok(GameState {
        player_names,
        ledger: ScoreLedger::new(player_count),
        current_round: 0,
        round,
    })
}

/// Finalize the live round, commit it, and set up the next one.
///
/// On error nothing changes. Returns the committed record.
pub fn complete_round(game: &mut GameState) -> Result<RoundRecord, DomainError> {
    let round = game.round.as_ref().ok_or(DomainError::GameComplete)?;
    let outcome = finalize_round(round)?;
    let record = game.ledger.commit_round(outcome)?.clone();

    game.current_round = game.ledger.len();
    game.round = match setup_round(game.current_round, game.player_count(), None, None)? {
        RoundSetup::InProgress(next) => Some(next),
        RoundSetup::GameComplete => {
            info!(scores = ?game.scores(), "Game over");
            None
        }
    };
    Ok(record)
}

/// Edit one completed round's tricks and replay the ledger.
pub fn edit_tricks_and_recalculate(
    game: &mut GameState,
    round_index: usize,
    new_tricks: &[i32],
) -> Result<(), DomainError> {
    game.ledger.edit_tricks_and_recalculate(round_index, new_tricks)
}

/// Edit every completed round's tricks at once and replay the ledger.
pub fn edit_history(game: &mut GameState, all_tricks: &[Vec<i32>]) -> Result<(), DomainError> {
    game.ledger.edit_history(all_tricks)
}
