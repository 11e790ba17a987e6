//! Property-based tests for producer interval aggregation.
//!
//! Winners are generated from a small producer pool so repeat wins and
//! ties show up often.

use awards_core::{compute_award_intervals, producer_intervals, producer_win_history};
use proptest::prelude::*;
use std::collections::BTreeMap;

const PRODUCERS: &[&str] = &[
    "Allan Carr",
    "Bo Derek",
    "Buzz Feitshans",
    "Joel Silver",
    "Matthew Vaughn",
    "Wes Anderson",
];

/// One winning movie: year plus 0..=3 credited producers.
fn arb_winner() -> impl Strategy<Value = (i32, String)> {
    (
        1980i32..2030,
        proptest::collection::vec(0..PRODUCERS.len(), 0..=3),
        prop::bool::ANY,
    )
        .prop_map(|(year, names, use_and)| {
            let names: Vec<&str> = names.into_iter().map(|index| PRODUCERS[index]).collect();
            let credits = match names.split_last() {
                Some((last, rest)) if use_and && !rest.is_empty() => {
                    format!("{} and {last}", rest.join(", "))
                }
                _ => names.join(", "),
            };
            (year, credits)
        })
}

fn arb_winners() -> impl Strategy<Value = Vec<(i32, String)>> {
    proptest::collection::vec(arb_winner(), 0..40)
}

/// Winners paired with an arbitrary reordering of the same rows.
fn arb_winners_and_shuffle() -> impl Strategy<Value = (Vec<(i32, String)>, Vec<(i32, String)>)> {
    arb_winners().prop_flat_map(|winners| {
        let shuffled = Just(winners.clone()).prop_shuffle();
        (Just(winners), shuffled)
    })
}

/// Winners spread over the whole `i32` year range.
fn arb_wide_year_winners() -> impl Strategy<Value = Vec<(i32, String)>> {
    proptest::collection::vec(
        (any::<i32>(), 0..PRODUCERS.len())
            .prop_map(|(year, index)| (year, PRODUCERS[index].to_string())),
        0..20,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every interval is the gap between its ordered wins.
    #[test]
    fn prop_interval_is_gap_between_ordered_wins(winners in arb_winners()) {
        for item in producer_intervals(&winners) {
            prop_assert!(item.previous_win <= item.following_win);
            prop_assert_eq!(
                i64::from(item.interval),
                i64::from(item.following_win) - i64::from(item.previous_win)
            );
        }
    }

    /// Property: years anywhere in the `i32` range never overflow the gap.
    #[test]
    fn prop_interval_holds_for_any_year(winners in arb_wide_year_winners()) {
        let result = compute_award_intervals(&winners);
        for item in result.min.iter().chain(&result.max) {
            prop_assert!(item.previous_win <= item.following_win);
            prop_assert_eq!(
                i64::from(item.interval),
                i64::from(item.following_win) - i64::from(item.previous_win)
            );
        }
    }

    /// Property: a producer with n wins yields exactly n - 1 intervals,
    /// chained over its sorted win years.
    #[test]
    fn prop_intervals_chain_consecutive_wins(winners in arb_winners()) {
        let history = producer_win_history(&winners);
        let mut by_producer: BTreeMap<String, Vec<(i32, i32)>> = BTreeMap::new();
        for item in producer_intervals(&winners) {
            by_producer
                .entry(item.producer)
                .or_default()
                .push((item.previous_win, item.following_win));
        }

        for (producer, years) in &history {
            let pairs = by_producer.remove(producer).unwrap_or_default();
            prop_assert_eq!(pairs.len(), years.len().saturating_sub(1));
            let expected: Vec<(i32, i32)> =
                years.windows(2).map(|pair| (pair[0], pair[1])).collect();
            prop_assert_eq!(pairs, expected);
        }
        prop_assert!(by_producer.is_empty());
    }

    /// Property: input order never changes the result.
    #[test]
    fn prop_result_is_permutation_invariant((winners, shuffled) in arb_winners_and_shuffle()) {
        let forward = compute_award_intervals(&winners);
        prop_assert_eq!(&compute_award_intervals(&shuffled), &forward);

        let mut reversed = winners.clone();
        reversed.reverse();
        prop_assert_eq!(&compute_award_intervals(&reversed), &forward);

        let mut by_year = winners.clone();
        by_year.sort_by_key(|(year, _)| *year);
        prop_assert_eq!(&compute_award_intervals(&by_year), &forward);

        prop_assert_eq!(&compute_award_intervals(&winners), &forward);
    }

    /// Property: tie sets hold every interval at the global extremes.
    #[test]
    fn prop_tie_sets_are_exhaustive(winners in arb_winners()) {
        let all = producer_intervals(&winners);
        let result = compute_award_intervals(&winners);

        match (
            all.iter().map(|item| item.interval).min(),
            all.iter().map(|item| item.interval).max(),
        ) {
            (Some(min_interval), Some(max_interval)) => {
                let expected_min: Vec<_> =
                    all.iter().filter(|item| item.interval == min_interval).cloned().collect();
                let expected_max: Vec<_> =
                    all.iter().filter(|item| item.interval == max_interval).cloned().collect();
                prop_assert_eq!(result.min, expected_min);
                prop_assert_eq!(result.max, expected_max);
            }
            _ => {
                prop_assert!(result.min.is_empty());
                prop_assert!(result.max.is_empty());
            }
        }
    }
}
