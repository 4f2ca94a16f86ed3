//! Presentation-ready data: what a table or form needs, nothing rendered.

use serde::Serialize;

use crate::domain::rules::{self, ROUNDS, ROUND_SPEC};
use crate::domain::state::{GameState, PlayerIndex};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreRow {
    pub player: PlayerIndex,
    pub name: String,
    pub guess: Option<u8>,
    pub tricks: Option<u8>,
    pub total: i16,
    pub is_dealer: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundView {
    /// 1-based, for display.
    pub round_number: usize,
    pub cards: u8,
    pub dealer: PlayerIndex,
    pub first_guesser: PlayerIndex,
    pub guess_order: Vec<PlayerIndex>,
    /// Score table in guess order.
    pub rows: Vec<ScoreRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub round_number: usize,
    pub cards: u8,
    /// "guess/tricks (delta)" per player, e.g. `2/2 (+14)`.
    pub cells: Vec<String>,
}

/// Round header and score table. After the game ends this shows the last round's seating.
pub fn round_view(game: &GameState) -> RoundView {
    let n = game.player_count();
    let round_index = game.current_round.min(ROUNDS - 1);
    let dealer = rules::dealer_for_round(round_index, n);
    let guess_order = rules::guess_order(dealer, n);

    let rows = guess_order
        .iter()
        .map(|&player| ScoreRow {
            player,
            name: game.player_name(player).to_string(),
            guess: game.round.as_ref().and_then(|r| r.guesses.get(player).copied().flatten()),
            tricks: game.round.as_ref().and_then(|r| r.tricks.get(player).copied().flatten()),
            total: game.scores().get(player).copied().unwrap_or(0),
            is_dealer: player == dealer,
        })
        .collect();

    RoundView {
        round_number: round_index + 1,
        cards: ROUND_SPEC[round_index],
        dealer,
        first_guesser: rules::first_guesser(dealer, n),
        guess_order,
        rows,
    }
}

pub fn history_rows(game: &GameState) -> Vec<HistoryRow> {
    game.history()
        .iter()
        .map(|record| HistoryRow {
            round_number: record.round_index + 1,
            cards: record.cards,
            cells: record
                .guesses
                .iter()
                .zip(&record.tricks)
                .zip(&record.deltas)
                .map(|((g, t), d)| {
                    if *d > 0 {
                        format!("{g}/{t} (+{d})")
                    } else {
                        format!("{g}/{t} ({d})")
                    }
                })
                .collect(),
        })
        .collect()
}
