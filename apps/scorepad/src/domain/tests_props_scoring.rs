//! Property tests for per-round scoring.

use proptest::prelude::*;

use crate::domain::scoring::score_delta;
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Hits are always positive and at least 10; misses are always negative and even.
    #[test]
    fn prop_hit_positive_miss_negative(guess in 0u8..=7, tricks in 0u8..=7) {
        let delta = score_delta(guess, tricks);
        if guess == tricks {
            prop_assert_eq!(delta, 10 + 2 * guess as i16);
        } else {
            prop_assert!(delta < 0);
            prop_assert_eq!(delta % 2, 0);
            prop_assert_eq!(delta, -2 * (guess as i16 - tricks as i16).abs());
        }
    }

    /// Swapping guess and tricks never changes the delta.
    #[test]
    fn prop_miss_penalty_symmetric(guess in 0u8..=7, tricks in 0u8..=7) {
        prop_assert_eq!(score_delta(guess, tricks), score_delta(tricks, guess));
    }
}
