use crate::domain::game::start_game;
use crate::domain::standings::{outcome, outcome_message, standings, summary, GameOutcome, Standings};
use crate::domain::state::GameState;
use crate::domain::test_prelude::{names, play_round};
use crate::domain::view::{history_rows, round_view};

fn three_players() -> GameState {
    start_game(3, &names(&["Ann", "Bo", "Cy"])).unwrap()
}

#[test]
fn nothing_to_report_before_first_round() {
    let game = three_players();
    assert_eq!(standings(&game), None);
    assert_eq!(summary(&game), "No rounds played yet.");
}

#[test]
fn single_leader_with_margin() {
    let mut game = three_players();
    // 7 cards, Ann deals.
    play_round(&mut game, &[0, 1, 0], &[6, 1, 0]);
    assert_eq!(game.scores(), &[-12, 12, 10]);
    assert_eq!(
        standings(&game),
        Some(Standings {
            rounds_played: 1,
            top_score: 12,
            leaders: vec![1],
            margin: Some(2),
        })
    );
    assert_eq!(summary(&game), "Bo leads with 12 points, ahead by 2 after 1 round.");
    assert_eq!(outcome_message(&game).unwrap(), "Bo wins with 12 points!");
}

#[test]
fn ties_are_reported_not_broken() {
    let mut game = three_players();
    play_round(&mut game, &[0, 1, 1], &[5, 1, 1]);
    play_round(&mut game, &[0, 0, 0], &[6, 0, 0]);
    assert_eq!(game.scores(), &[-22, 22, 22]);

    let st = standings(&game).unwrap();
    assert_eq!(st.leaders, vec![1, 2]);
    assert_eq!(st.margin, None);
    assert_eq!(summary(&game), "It's a tie between Bo, Cy at 22 points after 2 rounds.");
    assert_eq!(
        outcome(&game),
        Some(GameOutcome::Tie {
            players: vec![1, 2],
            score: 22
        })
    );
    assert_eq!(
        outcome_message(&game).unwrap(),
        "It's a tie between Bo, Cy with 22 points!"
    );
}

#[test]
fn round_view_follows_guess_order() {
    let mut game = three_players();
    play_round(&mut game, &[0, 1, 0], &[6, 1, 0]);

    let view = round_view(&game);
    assert_eq!(view.round_number, 2);
    assert_eq!(view.cards, 6);
    assert_eq!(view.dealer, 1);
    assert_eq!(view.guess_order, vec![2, 0, 1]);
    let seats: Vec<_> = view.rows.iter().map(|r| (r.name.as_str(), r.total, r.is_dealer)).collect();
    assert_eq!(seats, vec![("Cy", 10, false), ("Ann", -12, false), ("Bo", 12, true)]);
    assert!(view.rows.iter().all(|r| r.guess.is_none() && r.tricks.is_none()));
}

#[test]
fn history_cells_show_guess_tricks_and_delta() {
    let mut game = three_players();
    play_round(&mut game, &[0, 1, 0], &[6, 1, 0]);
    let rows = history_rows(&game);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].round_number, 1);
    assert_eq!(rows[0].cards, 7);
    assert_eq!(rows[0].cells, vec!["0/6 (-12)", "1/1 (+12)", "0/0 (+10)"]);
}
