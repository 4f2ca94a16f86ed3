use std::ops::RangeInclusive;

use crate::domain::state::PlayerIndex;

pub const ROUNDS: usize = 11;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 7;

// Cards per player: 7 down to 2, then back up to 7.
pub const ROUND_SPEC: [u8; ROUNDS] = [7, 6, 5, 4, 3, 2, 3, 4, 5, 6, 7];

/// Cards dealt in a 0-based round, `None` once past the last round.
pub fn cards_for_round(round_index: usize) -> Option<u8> {
    ROUND_SPEC.get(round_index).copied()
}

/// Inclusive range for both guesses and tricks won.
pub fn valid_count_range(cards: u8) -> RangeInclusive<u8> {
    0..=cards
}

pub fn valid_player_count(count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
}

/// Dealer rotates one seat per round, starting with player 0.
#[inline]
pub fn dealer_for_round(round_index: usize, player_count: usize) -> PlayerIndex {
    round_index % player_count
}

/// Player to the left of the dealer guesses first.
#[inline]
pub fn first_guesser(dealer: PlayerIndex, player_count: usize) -> PlayerIndex {
    (dealer + 1) % player_count
}

/// Guessing turn order: everyone from the first guesser onward, dealer last.
pub fn guess_order(dealer: PlayerIndex, player_count: usize) -> Vec<PlayerIndex> {
    let first = first_guesser(dealer, player_count);
    let mut order: Vec<PlayerIndex> = (0..player_count - 1)
        .map(|i| (first + i) % player_count)
        .collect();
    order.push(dealer);
    order
}
