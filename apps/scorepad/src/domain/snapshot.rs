//! Plain-data snapshot of a game for the persistence collaborator.
//!
//! The JSON keys match the tracker's saved-game format, so saves written by
//! earlier versions keep loading.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::guessing::setup_round;
use crate::domain::ledger::{RoundRecord, ScoreLedger};
use crate::domain::rules::{self, cards_for_round, valid_count_range, ROUNDS};
use crate::domain::state::{GameState, RoundSetup};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub player_count: usize,
    pub player_names: Vec<String>,
    pub current_round: usize,
    pub scores: Vec<i16>,
    pub history: Vec<RoundRecord>,
    /// In-progress round, so a reload mid-round resumes where play paused.
    pub current_round_guesses: Vec<Option<u8>>,
    pub current_round_tricks: Vec<Option<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSnapshot {
    #[error("snapshot is not valid JSON: {0}")]
    Json(String),
    #[error("snapshot is not a JSON object")]
    NotAnObject,
    #[error("snapshot has no numeric playerCount")]
    MissingPlayerCount,
    #[error("snapshot has no playerNames array")]
    MissingPlayerNames,
    #[error("player count {0} is outside 2..=7")]
    PlayerCount(u64),
    #[error("{names} player names for {count} players")]
    NameCount { count: usize, names: usize },
    #[error("malformed history: {0}")]
    MalformedHistory(String),
    #[error("history round {index} is inconsistent: {detail}")]
    InconsistentRound { index: usize, detail: String },
    #[error("currentRound {current_round} does not follow {completed} completed rounds")]
    RoundMismatch {
        current_round: usize,
        completed: usize,
    },
}

/// Capture everything needed to resume `game` exactly.
pub fn serialize(game: &GameState) -> GameSnapshot {
    let player_count = game.player_count();
    let (guesses, tricks) = match &game.round {
        Some(round) => (round.guesses.clone(), round.tricks.clone()),
        None => (vec![None; player_count], vec![None; player_count]),
    };
    GameSnapshot {
        player_count,
        player_names: game.player_names.clone(),
        current_round: game.current_round,
        scores: game.scores().to_vec(),
        history: game.history().to_vec(),
        current_round_guesses: guesses,
        current_round_tricks: tricks,
    }
}

pub fn to_json(game: &GameState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serialize(game))
}

pub fn from_json(json: &str) -> Result<GameState, InvalidSnapshot> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| InvalidSnapshot::Json(e.to_string()))?;
    deserialize(&value)
}

/// Decode a loosely-typed saved blob, checking shape before trusting it.
///
/// `playerCount` and `playerNames` are required; the other fields fall back
/// to an empty game position when absent. Stored deltas and totals are
/// re-derived from guesses and tricks.
pub fn deserialize(value: &Value) -> Result<GameState, InvalidSnapshot> {
    let obj = value.as_object().ok_or(InvalidSnapshot::NotAnObject)?;

    let raw_count = obj
        .get("playerCount")
        .and_then(Value::as_u64)
        .ok_or(InvalidSnapshot::MissingPlayerCount)?;
    let names = obj
        .get("playerNames")
        .and_then(Value::as_array)
        .ok_or(InvalidSnapshot::MissingPlayerNames)?;

    let player_count = usize::try_from(raw_count)
        .ok()
        .filter(|&n| rules::valid_player_count(n))
        .ok_or(InvalidSnapshot::PlayerCount(raw_count))?;
    if names.len() != player_count {
        return Err(InvalidSnapshot::NameCount {
            count: player_count,
            names: names.len(),
        });
    }
    let player_names = names
        .iter()
        .map(|n| n.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(InvalidSnapshot::MissingPlayerNames)?;

    let current_round = obj
        .get("currentRound")
        .and_then(Value::as_u64)
        .and_then(|r| usize::try_from(r).ok())
        .unwrap_or(0);

    let history = decode_history(obj, player_count)?;
    if current_round != history.len() {
        return Err(InvalidSnapshot::RoundMismatch {
            current_round,
            completed: history.len(),
        });
    }

    let (ledger, repaired) = ScoreLedger::from_history(player_count, history);
    if let Some(stored) = obj.get("scores").and_then(Value::as_array) {
        let stored: Vec<Option<i64>> = stored.iter().map(Value::as_i64).collect();
        let derived: Vec<Option<i64>> = ledger.scores().iter().map(|&s| Some(s.into())).collect();
        if stored != derived && !repaired {
            warn!(?stored, derived = ?ledger.scores(), "Stored totals disagree with history; using history");
        }
    }

    let guesses = decode_pending(obj, "currentRoundGuesses");
    let tricks = decode_pending(obj, "currentRoundTricks");
    let round = match setup_round(current_round, player_count, Some(&guesses), Some(&tricks)) {
        Ok(RoundSetup::InProgress(round)) => Some(round),
        Ok(RoundSetup::GameComplete) => None,
        Err(_) => return Err(InvalidSnapshot::PlayerCount(raw_count)),
    };

    debug!(player_count, current_round, "Snapshot decoded");
    Ok(GameState {
        player_names,
        ledger,
        current_round,
        round,
    })
}

/// Decode, or log why not and return `None` so the caller starts fresh.
pub fn restore_or_fresh(value: &Value) -> Option<GameState> {
    match deserialize(value) {
        Ok(game) => Some(game),
        Err(e) => {
            warn!(error = %e, "Discarding saved game");
            None
        }
    }
}

fn decode_history(
    obj: &Map<String, Value>,
    player_count: usize,
) -> Result<Vec<RoundRecord>, InvalidSnapshot> {
    let Some(raw) = obj.get("history").filter(|h| h.is_array()) else {
        return Ok(Vec::new());
    };
    let history: Vec<RoundRecord> = serde_json::from_value(raw.clone())
        .map_err(|e| InvalidSnapshot::MalformedHistory(e.to_string()))?;
    if history.len() > ROUNDS {
        return Err(InvalidSnapshot::MalformedHistory(format!(
            "{} rounds recorded, at most {ROUNDS} exist",
            history.len()
        )));
    }

    for (index, record) in history.iter().enumerate() {
        let inconsistent = |detail: String| InvalidSnapshot::InconsistentRound { index, detail };
        if record.round_index != index {
            return Err(inconsistent(format!("roundIndex is {}", record.round_index)));
        }
        if cards_for_round(index) != Some(record.cards) {
            return Err(inconsistent(format!("cardsThisRound is {}", record.cards)));
        }
        if record.guesses.len() != player_count || record.tricks.len() != player_count {
            return Err(inconsistent("guesses/tricks sized for another player count".into()));
        }
        let range = valid_count_range(record.cards);
        if !record.guesses.iter().chain(&record.tricks).all(|v| range.contains(v)) {
            return Err(inconsistent("guess or tricks out of range".into()));
        }
    }
    Ok(history)
}

fn decode_pending(obj: &Map<String, Value>, key: &str) -> Vec<Option<u8>> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect()
        })
        .unwrap_or_default()
}
