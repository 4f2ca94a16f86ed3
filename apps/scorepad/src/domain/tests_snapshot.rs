use serde_json::{json, Value};

use crate::domain::game::start_game;
use crate::domain::guessing::record_guess;
use crate::domain::snapshot::{deserialize, from_json, restore_or_fresh, serialize, to_json, InvalidSnapshot};
use crate::domain::state::{GameState, PlayPhase};
use crate::domain::test_prelude::{names, play_round};

fn mid_game() -> GameState {
    let mut game = start_game(3, &names(&["Ann", "Bo", "Cy"])).unwrap();
    play_round(&mut game, &[1, 0, 0], &[1, 0, 6]);
    play_round(&mut game, &[2, 2, 0], &[2, 1, 3]);
    let round = game.round.as_mut().unwrap();
    record_guess(round, 0, 1).unwrap();
    record_guess(round, 1, 2).unwrap();
    game
}

fn to_value(game: &GameState) -> Value {
    serde_json::to_value(serialize(game)).unwrap()
}

#[test]
fn snapshot_round_trips_mid_round() {
    let game = mid_game();
    let restored = deserialize(&to_value(&game)).unwrap();
    assert_eq!(restored, game);
    assert_eq!(restored.round.as_ref().unwrap().guesses, vec![Some(1), Some(2), None]);
    assert_eq!(restored.play_phase(), PlayPhase::Guessing);

    let text = to_json(&game).unwrap();
    assert_eq!(from_json(&text).unwrap(), game);
}

#[test]
fn snapshot_uses_saved_game_keys() {
    let value = to_value(&mid_game());
    let obj = value.as_object().unwrap();
    for key in [
        "playerCount",
        "playerNames",
        "currentRound",
        "scores",
        "history",
        "currentRoundGuesses",
        "currentRoundTricks",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj["currentRound"], json!(2));
    let first = &obj["history"][0];
    assert_eq!(first["roundIndex"], json!(0));
    assert_eq!(first["cardsThisRound"], json!(7));
    assert_eq!(first["deltas"], json!([12, 10, -12]));
    assert_eq!(first["scoresAfter"], json!([12, 10, -12]));
    assert_eq!(obj["currentRoundGuesses"], json!([1, 2, null]));
}

#[test]
fn finished_game_round_trips() {
    let mut game = start_game(2, &[]).unwrap();
    for _ in 0..11 {
        play_round(&mut game, &[0, 0], &[0, 0]);
    }
    assert!(game.round.is_none());
    let restored = deserialize(&to_value(&game)).unwrap();
    assert_eq!(restored, game);
    assert_eq!(restored.play_phase(), PlayPhase::GameOver);
}

#[test]
fn minimal_blob_starts_at_round_one() {
    let game = deserialize(&json!({ "playerCount": 2, "playerNames": ["A", "B"] })).unwrap();
    assert_eq!(game.current_round, 0);
    assert!(game.history().is_empty());
    assert_eq!(game.scores(), &[0, 0]);
    let round = game.round.unwrap();
    assert_eq!(round.cards, 7);
    assert_eq!(round.guesses, vec![None, None]);
}

#[test]
fn missing_required_fields_are_rejected() {
    assert_eq!(
        deserialize(&json!({ "playerNames": ["A", "B"] })).unwrap_err(),
        InvalidSnapshot::MissingPlayerCount
    );
    assert_eq!(
        deserialize(&json!({ "playerCount": 2 })).unwrap_err(),
        InvalidSnapshot::MissingPlayerNames
    );
    assert_eq!(deserialize(&json!([1, 2])).unwrap_err(), InvalidSnapshot::NotAnObject);
    assert!(matches!(from_json("{not json"), Err(InvalidSnapshot::Json(_))));
}

#[test]
fn player_count_and_names_must_agree() {
    assert_eq!(
        deserialize(&json!({ "playerCount": 9, "playerNames": [] })).unwrap_err(),
        InvalidSnapshot::PlayerCount(9)
    );
    assert_eq!(
        deserialize(&json!({ "playerCount": 3, "playerNames": ["A", "B"] })).unwrap_err(),
        InvalidSnapshot::NameCount { count: 3, names: 2 }
    );
    assert_eq!(
        deserialize(&json!({ "playerCount": 2, "playerNames": ["A", 5] })).unwrap_err(),
        InvalidSnapshot::MissingPlayerNames
    );
}

#[test]
fn inconsistent_history_is_rejected() {
    let mut value = to_value(&mid_game());
    value["history"][1]["cardsThisRound"] = json!(7);
    assert!(matches!(
        deserialize(&value).unwrap_err(),
        InvalidSnapshot::InconsistentRound { index: 1, .. }
    ));

    let mut value = to_value(&mid_game());
    value["history"][0]["tricks"] = json!([1, 0, 9]);
    assert!(matches!(
        deserialize(&value).unwrap_err(),
        InvalidSnapshot::InconsistentRound { index: 0, .. }
    ));

    let mut value = to_value(&mid_game());
    value["currentRound"] = json!(5);
    assert_eq!(
        deserialize(&value).unwrap_err(),
        InvalidSnapshot::RoundMismatch {
            current_round: 5,
            completed: 2
        }
    );
}

#[test]
fn stored_totals_are_rederived() {
    let game = mid_game();
    let mut value = to_value(&game);
    value["history"][0]["deltas"] = json!([0, 0, 0]);
    value["history"][1]["scoresAfter"] = json!([1, 2, 3]);
    value["scores"] = json!([100, 100, 100]);
    let restored = deserialize(&value).unwrap();
    assert_eq!(restored.scores(), game.scores());
    assert!(restored.ledger.is_consistent());
}

#[test]
fn garbage_pending_values_are_dropped() {
    let mut value = to_value(&mid_game());
    value["currentRoundGuesses"] = json!(["x", -1, 99]);
    value["currentRoundTricks"] = json!("nope");
    let restored = deserialize(&value).unwrap();
    let round = restored.round.unwrap();
    assert_eq!(round.guesses, vec![None, None, None]);
    assert_eq!(round.tricks, vec![None, None, None]);
}

#[test]
fn restore_or_fresh_discards_bad_blobs() {
    assert!(restore_or_fresh(&json!({ "playerCount": "two" })).is_none());
    assert!(restore_or_fresh(&to_value(&mid_game())).is_some());
}
