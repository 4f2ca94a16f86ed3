//! Score ledger: completed-round history and running totals.
//!
//! History is append-only in play. The only mutation of a committed round is a
//! tricks edit, after which every record is replayed from round 0 so that
//! `deltas` and `scores_after` can never drift from guesses and tricks.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::rules::{cards_for_round, dealer_for_round, valid_count_range, ROUNDS};
use crate::domain::scoring::round_deltas;
use crate::errors::domain::{DomainError, SequenceKind, ValidationKind};

/// A finalized round not yet placed in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round_index: usize,
    pub cards: u8,
    pub guesses: Vec<u8>,
    pub tricks: Vec<u8>,
    pub deltas: Vec<i16>,
}

/// One completed round. Arrays are indexed by player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_index: usize,
    #[serde(rename = "cardsThisRound")]
    pub cards: u8,
    pub guesses: Vec<u8>,
    pub tricks: Vec<u8>,
    #[serde(default)]
    pub deltas: Vec<i16>,
    /// Running totals immediately after this round.
    #[serde(default)]
    pub scores_after: Vec<i16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLedger {
    player_count: usize,
    history: Vec<RoundRecord>,
    scores: Vec<i16>,
}

impl ScoreLedger {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            history: Vec::new(),
            scores: vec![0; player_count],
        }
    }

    /// Rebuild from stored records, replaying totals from guesses and tricks.
    ///
    /// Returns the ledger and whether any stored delta or total had to be repaired.
    pub fn from_history(player_count: usize, history: Vec<RoundRecord>) -> (Self, bool) {
        let mut ledger = Self {
            player_count,
            history,
            scores: vec![0; player_count],
        };
        let before = ledger.history.clone();
        ledger.recalculate();
        let repaired = before != ledger.history;
        if repaired {
            warn!(
                rounds = ledger.history.len(),
                "Stored deltas or running totals disagreed with guesses/tricks; repaired"
            );
        }
        (ledger, repaired)
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Current totals: the last record's `scores_after`, or zeros.
    pub fn scores(&self) -> &[i16] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Append a finalized round, extending the running totals.
    pub fn commit_round(&mut self, outcome: RoundOutcome) -> Result<&RoundRecord, DomainError> {
        let expected = self.history.len();
        if expected >= ROUNDS {
            return Err(DomainError::GameComplete);
        }
        if outcome.round_index != expected {
            return Err(DomainError::sequence(
                SequenceKind::OutOfOrderCommit {
                    expected,
                    got: outcome.round_index,
                },
                format!(
                    "Round {} committed but history holds {expected} rounds",
                    outcome.round_index
                ),
            ));
        }
        for got in [
            outcome.guesses.len(),
            outcome.tricks.len(),
            outcome.deltas.len(),
        ] {
            if got != self.player_count {
                return Err(DomainError::sequence(
                    SequenceKind::PlayerCountMismatch {
                        expected: self.player_count,
                        got,
                    },
                    "Round outcome sized for a different player count",
                ));
            }
        }

        let cards = cards_for_round(expected).unwrap_or_default();
        if outcome.cards != cards {
            return Err(DomainError::sequence(
                SequenceKind::CardsMismatch {
                    round_index: expected,
                    expected: cards,
                    got: outcome.cards,
                },
                format!("Round {expected} deals {cards} cards, outcome says {}", outcome.cards),
            ));
        }
        let range = valid_count_range(cards);
        let stray = outcome
            .guesses
            .iter()
            .chain(&outcome.tricks)
            .enumerate()
            .find(|&(_, &v)| !range.contains(&v));
        if let Some((slot, &value)) = stray {
            return Err(DomainError::sequence(
                SequenceKind::CountOutOfRange {
                    player: slot % self.player_count,
                    value,
                },
                format!("Outcome holds {value}, outside 0..={cards}"),
            ));
        }

        let guess_total: i16 = outcome.guesses.iter().map(|&g| i16::from(g)).sum();
        if guess_total == i16::from(outcome.cards) {
            let dealer = dealer_for_round(outcome.round_index, self.player_count);
            return Err(DomainError::Constraint {
                dealer,
                forbidden: i16::from(outcome.guesses[dealer]),
                cards: outcome.cards,
            });
        }

        let deltas = round_deltas(&outcome.guesses, &outcome.tricks);
        debug_assert_eq!(deltas, outcome.deltas, "outcome deltas were not produced by score_delta");

        let scores_after: Vec<i16> = self.scores.iter().zip(&deltas).map(|(s, d)| s + d).collect();
        self.scores.clone_from(&scores_after);
        self.history.push(RoundRecord {
            round_index: outcome.round_index,
            cards: outcome.cards,
            guesses: outcome.guesses,
            tricks: outcome.tricks,
            deltas,
            scores_after,
        });

        info!(round_index = expected, scores = ?self.scores, "Round committed");
        Ok(&self.history[expected])
    }

    /// Replace one round's tricks and replay the whole history.
    ///
    /// All-or-nothing: any invalid value rejects the edit and leaves the ledger untouched.
    pub fn edit_tricks_and_recalculate(
        &mut self,
        round_index: usize,
        new_tricks: &[i32],
    ) -> Result<(), DomainError> {
        let record = self.history.get(round_index).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::RoundOutOfRange { round_index },
                format!("Round {} has not been played", round_index + 1),
            )
        })?;
        let tricks = self.validate_tricks(round_index, record.cards, new_tricks)?;

        self.history[round_index].tricks = tricks;
        self.recalculate();
        info!(round_index, scores = ?self.scores, "Round tricks edited");
        Ok(())
    }

    /// Replace the tricks of every round at once, as submitted from a full history table.
    ///
    /// Every round is validated before anything is written.
    pub fn edit_history(&mut self, all_tricks: &[Vec<i32>]) -> Result<(), DomainError> {
        if all_tricks.len() != self.history.len() {
            return Err(DomainError::sequence(
                SequenceKind::RoundCountMismatch {
                    expected: self.history.len(),
                    got: all_tricks.len(),
                },
                "History edit must cover every completed round",
            ));
        }
        let validated = self
            .history
            .iter()
            .zip(all_tricks)
            .enumerate()
            .map(|(round_index, (record, raw))| self.validate_tricks(round_index, record.cards, raw))
            .collect::<Result<Vec<_>, _>>()?;

        for (record, tricks) in self.history.iter_mut().zip(validated) {
            record.tricks = tricks;
        }
        self.recalculate();
        info!(rounds = self.history.len(), scores = ?self.scores, "History edited");
        Ok(())
    }

    fn validate_tricks(
        &self,
        round_index: usize,
        cards: u8,
        raw: &[i32],
    ) -> Result<Vec<u8>, DomainError> {
        if raw.len() != self.player_count {
            return Err(DomainError::sequence(
                SequenceKind::PlayerCountMismatch {
                    expected: self.player_count,
                    got: raw.len(),
                },
                format!("Round {} edit has {} entries", round_index + 1, raw.len()),
            ));
        }
        let range = valid_count_range(cards);
        raw.iter()
            .enumerate()
            .map(|(player, &value)| {
                u8::try_from(value)
                    .ok()
                    .filter(|v| range.contains(v))
                    .ok_or_else(|| {
                        DomainError::validation(
                            ValidationKind::InvalidTricks {
                                round_index,
                                player,
                            },
                            format!(
                                "Error in Round {}: Tricks must be between 0 and {cards}.",
                                round_index + 1
                            ),
                        )
                    })
            })
            .collect()
    }

    /// Replay every record from round 0: deltas, running totals, current scores.
    pub fn recalculate(&mut self) {
        let mut running = vec![0i16; self.player_count];
        for record in &mut self.history {
            record.deltas = round_deltas(&record.guesses, &record.tricks);
            for (total, delta) in running.iter_mut().zip(&record.deltas) {
                *total += delta;
            }
            record.scores_after.clone_from(&running);
        }
        self.scores = running;
        debug!(rounds = self.history.len(), "Ledger recalculated");
    }

    /// True when every stored delta and running total matches a fresh replay.
    pub fn is_consistent(&self) -> bool {
        let mut replay = self.clone();
        replay.recalculate();
        replay == *self
    }
}
