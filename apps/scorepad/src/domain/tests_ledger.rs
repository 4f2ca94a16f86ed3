use crate::domain::ledger::{RoundOutcome, ScoreLedger};
use crate::domain::rules::{ROUNDS, ROUND_SPEC};
use crate::domain::scoring::round_deltas;
use crate::errors::domain::{DomainError, SequenceKind, ValidationKind};

fn outcome(round_index: usize, guesses: Vec<u8>, tricks: Vec<u8>) -> RoundOutcome {
    let deltas = round_deltas(&guesses, &tricks);
    RoundOutcome {
        round_index,
        cards: ROUND_SPEC[round_index],
        guesses,
        tricks,
        deltas,
    }
}

/// Three players; player 0 guesses 1 and makes it, player 1 guesses 0 and makes it,
/// player 2 guesses 0 and takes the rest.
fn played(rounds: usize) -> ScoreLedger {
    let mut ledger = ScoreLedger::new(3);
    for r in 0..rounds {
        let cards = ROUND_SPEC[r];
        ledger
            .commit_round(outcome(r, vec![1, 0, 0], vec![1, 0, cards - 1]))
            .unwrap();
    }
    ledger
}

#[test]
fn commit_extends_running_totals() {
    let ledger = played(2);
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.history()[0].deltas, vec![12, 10, -12]);
    assert_eq!(ledger.history()[0].scores_after, vec![12, 10, -12]);
    assert_eq!(ledger.history()[1].deltas, vec![12, 10, -10]);
    assert_eq!(ledger.history()[1].scores_after, vec![24, 20, -22]);
    assert_eq!(ledger.scores(), &[24, 20, -22]);
    assert!(ledger.is_consistent());
}

#[test]
fn empty_ledger_scores_are_zero() {
    let ledger = ScoreLedger::new(4);
    assert!(ledger.is_empty());
    assert_eq!(ledger.scores(), &[0, 0, 0, 0]);
}

#[test]
fn out_of_order_commit_is_rejected() {
    let mut ledger = ScoreLedger::new(3);
    let err = ledger
        .commit_round(outcome(1, vec![1, 0, 0], vec![1, 0, 5]))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Sequence(
            SequenceKind::OutOfOrderCommit {
                expected: 0,
                got: 1
            },
            _
        )
    ));
    assert!(ledger.is_empty());
}

#[test]
fn wrongly_sized_outcome_is_rejected() {
    let mut ledger = ScoreLedger::new(3);
    let err = ledger
        .commit_round(outcome(0, vec![1, 0], vec![1, 6]))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Sequence(SequenceKind::PlayerCountMismatch { expected: 3, got: 2 }, _)
    ));
}

#[test]
fn outcome_with_wrong_card_count_is_rejected() {
    let mut ledger = ScoreLedger::new(3);
    let mut bad = outcome(0, vec![1, 0, 0], vec![1, 0, 5]);
    bad.cards = 6;
    let err = ledger.commit_round(bad).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Sequence(
            SequenceKind::CardsMismatch {
                round_index: 0,
                expected: 7,
                got: 6
            },
            _
        )
    ));
    assert!(ledger.is_empty());
    assert_eq!(ledger.scores(), &[0, 0, 0]);
}

#[test]
fn outcome_counts_beyond_cards_are_rejected() {
    let mut ledger = ScoreLedger::new(3);
    let err = ledger
        .commit_round(outcome(0, vec![9, 0, 0], vec![1, 0, 6]))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Sequence(SequenceKind::CountOutOfRange { player: 0, value: 9 }, _)
    ));

    let err = ledger
        .commit_round(outcome(0, vec![1, 0, 0], vec![1, 0, 8]))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Sequence(SequenceKind::CountOutOfRange { player: 2, value: 8 }, _)
    ));
    assert!(ledger.is_empty());
}

#[test]
fn guesses_summing_to_cards_cannot_be_committed() {
    let mut ledger = ScoreLedger::new(3);
    let err = ledger
        .commit_round(outcome(0, vec![3, 2, 2], vec![3, 2, 2]))
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::Constraint {
            dealer: 0,
            forbidden: 3,
            cards: 7
        }
    );
    assert!(ledger.is_empty());
}

#[test]
fn no_commit_after_last_round() {
    let mut ledger = played(ROUNDS);
    let err = ledger
        .commit_round(outcome(10, vec![1, 0, 0], vec![1, 0, 6]))
        .unwrap_err();
    assert_eq!(err, DomainError::GameComplete);
    assert_eq!(ledger.len(), ROUNDS);
}

#[test]
fn edit_cascades_forward_only() {
    let mut ledger = played(5);
    let before = ledger.clone();
    assert_eq!(before.scores(), &[60, 50, -40]);

    ledger.edit_tricks_and_recalculate(1, &[0, 1, 5]).unwrap();

    assert_eq!(ledger.history()[0], before.history()[0]);
    assert_eq!(ledger.history()[1].tricks, vec![0, 1, 5]);
    assert_eq!(ledger.history()[1].deltas, vec![-2, -2, -10]);
    for r in 1..5 {
        let old = &before.history()[r].scores_after;
        let new = &ledger.history()[r].scores_after;
        assert_eq!(new, &vec![old[0] - 14, old[1] - 12, old[2]], "round {r}");
        assert_eq!(ledger.history()[r].guesses, before.history()[r].guesses);
    }
    assert_eq!(ledger.scores(), &[46, 38, -40]);
    assert!(ledger.is_consistent());
}

#[test]
fn edit_with_unchanged_tricks_is_a_no_op() {
    let mut ledger = played(4);
    let before = ledger.clone();
    let same: Vec<i32> = before.history()[2].tricks.iter().map(|&t| t.into()).collect();
    ledger.edit_tricks_and_recalculate(2, &same).unwrap();
    assert_eq!(ledger, before);
}

#[test]
fn edit_rejects_out_of_range_value_and_keeps_ledger() {
    let mut ledger = played(3);
    let before = ledger.clone();
    // Round 3 deals 5 cards.
    let err = ledger
        .edit_tricks_and_recalculate(2, &[1, 6, 0])
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(
            ValidationKind::InvalidTricks {
                round_index: 2,
                player: 1
            },
            _
        )
    ));
    assert!(err.to_string().contains("Error in Round 3: Tricks must be between 0 and 5."));
    assert_eq!(ledger, before);

    assert!(ledger.edit_tricks_and_recalculate(0, &[-1, 0, 0]).is_err());
    assert_eq!(ledger, before);
}

#[test]
fn edit_of_unplayed_round_is_rejected() {
    let mut ledger = played(2);
    let err = ledger
        .edit_tricks_and_recalculate(2, &[0, 0, 0])
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoundOutOfRange { round_index: 2 }, _)
    ));
}

#[test]
fn bulk_edit_is_all_or_nothing() {
    let mut ledger = played(5);
    let before = ledger.clone();
    let mut table: Vec<Vec<i32>> = before
        .history()
        .iter()
        .map(|r| r.tricks.iter().map(|&t| t.into()).collect())
        .collect();
    table[0] = vec![0, 0, 0];
    table[4] = vec![0, 0, 4];

    let err = ledger.edit_history(&table).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(
            ValidationKind::InvalidTricks {
                round_index: 4,
                player: 2
            },
            _
        )
    ));
    assert_eq!(ledger, before);

    table[4] = vec![0, 0, 3];
    ledger.edit_history(&table).unwrap();
    assert_eq!(ledger.history()[0].deltas, vec![-2, 10, 10]);
    assert_eq!(ledger.history()[4].deltas, vec![-2, 10, -6]);
    assert!(ledger.is_consistent());
}

#[test]
fn bulk_edit_must_cover_every_round() {
    let mut ledger = played(3);
    let err = ledger.edit_history(&[vec![1, 0, 6]]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Sequence(SequenceKind::RoundCountMismatch { expected: 3, got: 1 }, _)
    ));
}

#[test]
fn from_history_repairs_stored_totals() {
    let ledger = played(3);
    let mut history = ledger.history().to_vec();
    history[1].deltas = vec![0, 0, 0];
    history[2].scores_after = vec![99, 99, 99];

    let (rebuilt, repaired) = ScoreLedger::from_history(3, history);
    assert!(repaired);
    assert_eq!(rebuilt, ledger);

    let (clean, repaired) = ScoreLedger::from_history(3, ledger.history().to_vec());
    assert!(!repaired);
    assert_eq!(clean, ledger);
}
