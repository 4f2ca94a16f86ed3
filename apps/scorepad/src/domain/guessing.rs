//! Round setup and guess collection, including the dealer constraint.

use tracing::debug;

use crate::domain::rules::{self, cards_for_round, valid_count_range};
use crate::domain::state::{PlayerIndex, RoundSetup, RoundState};
use crate::domain::warnings::RoundWarning;
use crate::errors::domain::{DomainError, ValidationKind};

/// Build the live state for `round_index`.
///
/// `prior_guesses` / `prior_tricks` seed a round restored mid-play; entries
/// beyond the player count or outside `0..=cards` are dropped to unset.
pub fn setup_round(
    round_index: usize,
    player_count: usize,
    prior_guesses: Option<&[Option<u8>]>,
    prior_tricks: Option<&[Option<u8>]>,
) -> Result<RoundSetup, DomainError> {
    if !rules::valid_player_count(player_count) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount {
                count: player_count,
            },
            format!("Player count must be between 2 and 7, got {player_count}"),
        ));
    }
    let Some(cards) = cards_for_round(round_index) else {
        return Ok(RoundSetup::GameComplete);
    };

    let dealer = rules::dealer_for_round(round_index, player_count);
    let first_guesser = rules::first_guesser(dealer, player_count);
    let guess_order = rules::guess_order(dealer, player_count);

    debug!(round_index, cards, dealer, first_guesser, "Round set up");

    Ok(RoundSetup::InProgress(RoundState {
        round_index,
        cards,
        dealer,
        first_guesser,
        guess_order,
        guesses: seed_counts(prior_guesses, player_count, cards),
        tricks: seed_counts(prior_tricks, player_count, cards),
    }))
}

fn seed_counts(prior: Option<&[Option<u8>]>, player_count: usize, cards: u8) -> Vec<Option<u8>> {
    let range = valid_count_range(cards);
    (0..player_count)
        .map(|i| {
            prior
                .and_then(|p| p.get(i).copied().flatten())
                .filter(|v| range.contains(v))
        })
        .collect()
}

/// Convert raw input to a count, or `None` when outside `0..=cards`.
pub(crate) fn count_in_range(value: i32, cards: u8) -> Option<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| valid_count_range(cards).contains(v))
}

pub(crate) fn require_player(state: &RoundState, player: PlayerIndex) -> Result<(), DomainError> {
    if player < state.player_count() {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::UnknownPlayer { player },
            format!("No player at index {player}"),
        ))
    }
}

/// Record a guess. Out-of-range input is stored as unset, not rejected.
///
/// Returns the stored value.
pub fn record_guess(
    state: &mut RoundState,
    player: PlayerIndex,
    value: i32,
) -> Result<Option<u8>, DomainError> {
    require_player(state, player)?;
    let stored = count_in_range(value, state.cards);
    state.guesses[player] = stored;
    debug!(round_index = state.round_index, player, value, ?stored, "Guess recorded");
    Ok(stored)
}

/// The one value the dealer may not guess: `cards - sum(non-dealer guesses)`.
///
/// Unset guesses count as zero. The result may fall outside `0..=cards`,
/// in which case the constraint cannot bite.
pub fn dealer_forbidden_value(state: &RoundState) -> i16 {
    let rest_total: i16 = state
        .guesses
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != state.dealer)
        .filter_map(|(_, g)| g.map(i16::from))
        .sum();
    state.cards as i16 - rest_total
}

/// Full guess validation: every guess set, dealer clear of the forbidden value.
pub fn check_guesses(state: &RoundState) -> Result<(), DomainError> {
    for &player in &state.guess_order {
        if state.guesses.get(player).copied().flatten().is_none() {
            return Err(DomainError::validation(
                ValidationKind::InvalidGuess { player },
                format!(
                    "Please enter a valid guess (0-{}) for player {}",
                    state.cards,
                    player + 1
                ),
            ));
        }
    }

    let forbidden = dealer_forbidden_value(state);
    let dealer_guess = state.guesses[state.dealer].map(i16::from);
    if dealer_guess == Some(forbidden) {
        return Err(DomainError::Constraint {
            dealer: state.dealer,
            forbidden,
            cards: state.cards,
        });
    }

    debug_assert_ne!(
        state.guesses.iter().flatten().map(|&g| g as u32).sum::<u32>(),
        state.cards as u32,
        "guesses sum to cards despite dealer clearing the forbidden value"
    );
    Ok(())
}

pub fn all_guesses_valid(state: &RoundState) -> bool {
    check_guesses(state).is_ok()
}

/// Live warning while the dealer's guess sits on the forbidden value.
pub fn dealer_warning(state: &RoundState) -> Option<RoundWarning> {
    let forbidden = dealer_forbidden_value(state);
    match state.guesses.get(state.dealer).copied().flatten() {
        Some(g) if i16::from(g) == forbidden => Some(RoundWarning::DealerForbidden {
            dealer: state.dealer,
            forbidden,
            cards: state.cards,
        }),
        _ => None,
    }
}
