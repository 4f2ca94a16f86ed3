//! Error codes for the scorepad engine and front-end.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input validation
    /// Player count outside 2..=7
    InvalidPlayerCount,
    /// Guess missing or out of range
    InvalidGuess,
    /// Dealer guess equals the forbidden value
    DealerForbiddenGuess,
    /// Tricks missing or out of range
    InvalidTricks,
    /// Player index not in this game
    UnknownPlayer,
    /// Round index not in history
    RoundOutOfRange,
    /// Operation not allowed in the current phase
    PhaseMismatch,
    /// General validation error
    ValidationError,

    // Engine misuse
    /// Commit or finalize out of sequence
    OutOfSequence,
    /// All rounds complete
    GameComplete,

    // Persistence and configuration
    /// Snapshot failed to decode
    InvalidSnapshot,
    /// Store read or write failed
    StoreFailure,
    /// Another process holds the store lock
    StoreLocked,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::InvalidGuess => "INVALID_GUESS",
            Self::DealerForbiddenGuess => "DEALER_FORBIDDEN_GUESS",
            Self::InvalidTricks => "INVALID_TRICKS",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::RoundOutOfRange => "ROUND_OUT_OF_RANGE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::OutOfSequence => "OUT_OF_SEQUENCE",
            Self::GameComplete => "GAME_COMPLETE",

            Self::InvalidSnapshot => "INVALID_SNAPSHOT",
            Self::StoreFailure => "STORE_FAILURE",
            Self::StoreLocked => "STORE_LOCKED",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
