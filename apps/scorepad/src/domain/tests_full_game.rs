//! A complete 11-round game driven through the public engine calls.

use crate::domain::game::{complete_round, start_game};
use crate::domain::rules::ROUNDS;
use crate::domain::standings::{outcome, GameOutcome};
use crate::domain::state::PlayPhase;
use crate::domain::test_prelude::{names, play_round};
use crate::errors::domain::DomainError;

#[test]
fn four_player_game_to_completion() {
    let mut game = start_game(4, &names(&["Ann", "Bo", "Cy", "Di"])).unwrap();

    // Everyone guesses 0 and the first guesser takes every trick.
    for r in 0..ROUNDS {
        let round = game.round.as_ref().unwrap();
        assert_eq!(round.round_index, r);
        let cards = round.cards as i32;
        let first = round.first_guesser;
        let tricks: Vec<i32> = (0..4).map(|p| if p == first { cards } else { 0 }).collect();

        let record = play_round(&mut game, &[0, 0, 0, 0], &tricks);
        assert_eq!(record.round_index, r);
        assert_eq!(game.current_round, r + 1);
    }

    // Each seat takes 10 per made zero and -2 per trick when it was first guesser.
    assert_eq!(game.scores(), &[74, 50, 52, 50]);
    assert!(game.is_complete());
    assert!(game.round.is_none());
    assert_eq!(game.play_phase(), PlayPhase::GameOver);
    assert_eq!(game.history().len(), ROUNDS);
    assert_eq!(
        outcome(&game),
        Some(GameOutcome::Winner {
            player: 0,
            score: 74
        })
    );

    assert_eq!(complete_round(&mut game).unwrap_err(), DomainError::GameComplete);
}

#[test]
fn half_hand_guesses_all_made() {
    let mut game = start_game(4, &names(&["Ann", "Bo", "Cy", "Di"])).unwrap();
    let mut expected = 0i16;

    // Every guess is cards / 2 and every guess is made. Four such guesses
    // never sum to the cards dealt, so the trick totals are over and the
    // mismatch is accepted.
    for _ in 0..ROUNDS {
        let cards = game.round.as_ref().unwrap().cards;
        let half = i32::from(cards / 2);
        play_round(&mut game, &[half; 4], &[half; 4]);
        expected += 10 + 2 * i16::from(cards / 2);
    }

    assert_eq!(expected, 156);
    assert_eq!(game.scores(), &[156; 4]);
    assert_eq!(
        outcome(&game),
        Some(GameOutcome::Tie {
            players: vec![0, 1, 2, 3],
            score: 156
        })
    );
}

#[test]
fn blank_names_fall_back_to_seat_numbers() {
    let game = start_game(3, &names(&["  Ann ", "", "   "])).unwrap();
    assert_eq!(game.player_names, vec!["Ann", "Player 2", "Player 3"]);

    let game = start_game(2, &[]).unwrap();
    assert_eq!(game.player_names, vec!["Player 1", "Player 2"]);
}

#[test]
fn start_rejects_bad_player_count() {
    let err = start_game(1, &[]).unwrap_err();
    assert_eq!(err.code().as_str(), "INVALID_PLAYER_COUNT");
    assert!(start_game(8, &[]).is_err());
}

#[test]
fn rejected_round_leaves_game_untouched() {
    let mut game = start_game(3, &[]).unwrap();
    {
        let round = game.round.as_mut().unwrap();
        // Dealer (player 0) hits the forbidden value: 7 - (3 + 1) = 3.
        round.guesses = vec![Some(3), Some(3), Some(1)];
        round.tricks = vec![Some(3), Some(3), Some(1)];
    }
    let before = game.clone();
    assert!(matches!(
        complete_round(&mut game),
        Err(DomainError::Constraint { dealer: 0, forbidden: 3, cards: 7 })
    ));
    assert_eq!(game, before);
}

#[test]
fn resume_phase_follows_guess_validity() {
    let mut game = start_game(3, &[]).unwrap();
    assert_eq!(game.play_phase(), PlayPhase::Guessing);
    game.round.as_mut().unwrap().guesses = vec![Some(0), Some(1), Some(1)];
    assert_eq!(game.play_phase(), PlayPhase::Tricking);
}
