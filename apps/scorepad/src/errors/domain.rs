//! Domain-level error type returned by every engine operation.
//!
//! This error type knows nothing about storage or presentation. The
//! application boundary converts it into `crate::error::AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::PlayerIndex;
use crate::errors::ErrorCode;

/// What a validation failure was about, with the offending coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Player count outside 2..=7.
    InvalidPlayerCount { count: usize },
    /// Guess missing or out of `0..=cards` for this player.
    InvalidGuess { player: PlayerIndex },
    /// Tricks missing or out of `0..=cards` for this player in this round.
    InvalidTricks {
        round_index: usize,
        player: PlayerIndex,
    },
    /// Player index not seated in this game.
    UnknownPlayer { player: PlayerIndex },
    /// Round index does not name a completed round.
    RoundOutOfRange { round_index: usize },
    /// Operation not allowed in the current phase.
    PhaseMismatch,
    Other(String),
}

/// Internal misuse of the engine. Never expected in normal play.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SequenceKind {
    /// Commit whose round index is not `history.len()`.
    OutOfOrderCommit { expected: usize, got: usize },
    /// Record sized for a different number of players.
    PlayerCountMismatch { expected: usize, got: usize },
    /// Bulk history edit that does not cover exactly the completed rounds.
    RoundCountMismatch { expected: usize, got: usize },
    /// Outcome dealt a different number of cards than its round calls for.
    CardsMismatch {
        round_index: usize,
        expected: u8,
        got: u8,
    },
    /// Guess or tricks outside `0..=cards` in a finalized outcome.
    CountOutOfRange { player: PlayerIndex, value: u8 },
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input out of range or missing; blocks progression until corrected.
    Validation(ValidationKind, String),
    /// Dealer guess would make the guesses sum to the cards dealt.
    Constraint {
        dealer: PlayerIndex,
        forbidden: i16,
        cards: u8,
    },
    /// Programmer error: operation invoked out of sequence.
    Sequence(SequenceKind, String),
    /// All rounds are complete.
    GameComplete,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(_, d) => write!(f, "validation error: {d}"),
            DomainError::Constraint {
                forbidden, cards, ..
            } => write!(
                f,
                "dealer cannot guess {forbidden} (total guesses cannot equal {cards})"
            ),
            DomainError::Sequence(kind, d) => write!(f, "sequence error {kind:?}: {d}"),
            DomainError::GameComplete => write!(f, "all rounds are complete"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn sequence(kind: SequenceKind, detail: impl Into<String>) -> Self {
        Self::Sequence(kind, detail.into())
    }

    /// Stable code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidPlayerCount { .. } => ErrorCode::InvalidPlayerCount,
                ValidationKind::InvalidGuess { .. } => ErrorCode::InvalidGuess,
                ValidationKind::InvalidTricks { .. } => ErrorCode::InvalidTricks,
                ValidationKind::UnknownPlayer { .. } => ErrorCode::UnknownPlayer,
                ValidationKind::RoundOutOfRange { .. } => ErrorCode::RoundOutOfRange,
                ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Constraint { .. } => ErrorCode::DealerForbiddenGuess,
            DomainError::Sequence(..) => ErrorCode::OutOfSequence,
            DomainError::GameComplete => ErrorCode::GameComplete,
        }
    }
}
