/// Score change for one player in one round.
///
/// Exact guess earns `10 + 2 * guess`; a miss costs 2 points per trick of error.
/// Forward play and history recalculation both go through here.
pub fn score_delta(guess: u8, tricks_won: u8) -> i16 {
    let guess = guess as i16;
    let tricks_won = tricks_won as i16;
    if guess == tricks_won {
        10 + 2 * guess
    } else {
        -2 * (guess - tricks_won).abs()
    }
}

/// Per-player deltas for a round. Slices are indexed by player.
pub fn round_deltas(guesses: &[u8], tricks: &[u8]) -> Vec<i16> {
    guesses
        .iter()
        .zip(tricks)
        .map(|(&g, &t)| score_delta(g, t))
        .collect()
}
