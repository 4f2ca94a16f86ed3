//! Domain layer: pure round/scoring engine types and helpers.

pub mod game;
pub mod guessing;
pub mod ledger;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod standings;
pub mod state;
pub mod tricks;
pub mod view;
pub mod warnings;

#[cfg(test)]
mod tests_full_game;
#[cfg(test)]
mod tests_ledger;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_standings;

// Re-exports for ergonomics
pub use game::{complete_round, start_game};
pub use guessing::{all_guesses_valid, dealer_forbidden_value, record_guess, setup_round};
pub use ledger::{RoundOutcome, RoundRecord, ScoreLedger};
pub use rules::{cards_for_round, ROUNDS, ROUND_SPEC};
pub use scoring::score_delta;
pub use snapshot::{deserialize, serialize, GameSnapshot, InvalidSnapshot};
pub use state::{GameState, Phase, PlayPhase, PlayerIndex, RoundSetup, RoundState};
pub use tricks::{all_tricks_valid, finalize_round, record_tricks};
pub use warnings::RoundWarning;
