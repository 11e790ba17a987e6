//! Consecutive-win interval aggregation.
//!
//! # Responsibility
//! - Group producer win years across all winning movies.
//! - Emit one interval per consecutive pair of sorted win years.
//! - Select every interval sharing the global minimum and maximum.
//!
//! # Invariants
//! - Grouping state is owned by a single call and rebuilt every time.
//! - Win years are sorted per producer before diffing; input order never
//!   affects the result.
//! - `previous_win <= following_win` and `interval` is their distance,
//!   computed without overflow for any pair of `i32` years.
//! - Output is ordered by `(producer, previous_win)`.

use crate::awards::producers::split_producers;
use crate::model::movie::{Movie, NewMovie};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Winning-movie view required by the aggregator.
pub trait WinningCredit {
    /// Year the award was won.
    fn win_year(&self) -> i32;
    /// Raw producer credit string of the winning movie.
    fn producer_credits(&self) -> &str;
}

impl WinningCredit for Movie {
    fn win_year(&self) -> i32 {
        self.year
    }

    fn producer_credits(&self) -> &str {
        &self.producers
    }
}

impl WinningCredit for NewMovie {
    fn win_year(&self) -> i32 {
        self.year
    }

    fn producer_credits(&self) -> &str {
        &self.producers
    }
}

impl WinningCredit for (i32, &str) {
    fn win_year(&self) -> i32 {
        self.0
    }

    fn producer_credits(&self) -> &str {
        self.1
    }
}

impl WinningCredit for (i32, String) {
    fn win_year(&self) -> i32 {
        self.0
    }

    fn producer_credits(&self) -> &str {
        &self.1
    }
}

impl<T: WinningCredit + ?Sized> WinningCredit for &T {
    fn win_year(&self) -> i32 {
        (**self).win_year()
    }

    fn producer_credits(&self) -> &str {
        (**self).producer_credits()
    }
}

/// Gap between two consecutive wins of one producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerInterval {
    pub producer: String,
    /// Years between `previous_win` and `following_win`.
    pub interval: u32,
    pub previous_win: i32,
    pub following_win: i32,
}

/// Producers with the shortest and longest gaps between consecutive wins.
///
/// Both sets are empty when no producer won more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardIntervalResult {
    pub min: Vec<ProducerInterval>,
    pub max: Vec<ProducerInterval>,
}

/// Producer name -> win years, one entry per credited win.
pub type ProducerWinHistory = BTreeMap<String, Vec<i32>>;

/// Groups win years by producer name.
///
/// Each winner contributes its year once per producer name found in its
/// credit string. Years are returned sorted ascending.
pub fn producer_win_history<I>(winners: I) -> ProducerWinHistory
where
    I: IntoIterator,
    I::Item: WinningCredit,
{
    let mut history = ProducerWinHistory::new();
    for winner in winners {
        let year = winner.win_year();
        for producer in split_producers(winner.producer_credits()) {
            history.entry(producer.to_string()).or_default().push(year);
        }
    }

    for years in history.values_mut() {
        years.sort();
    }
    history
}

/// Lists every consecutive-win interval across all producers.
///
/// A producer with `n >= 2` wins contributes exactly `n - 1` intervals;
/// single winners contribute nothing.
pub fn producer_intervals<I>(winners: I) -> Vec<ProducerInterval>
where
    I: IntoIterator,
    I::Item: WinningCredit,
{
    producer_win_history(winners)
        .into_iter()
        .flat_map(|(producer, years)| consecutive_intervals(producer, years))
        .collect()
}

/// Computes the minimum and maximum consecutive-win intervals.
///
/// Every interval equal to the global minimum lands in `min` and every
/// interval equal to the global maximum lands in `max`; when both extremes
/// coincide the two sets hold the same intervals.
pub fn compute_award_intervals<I>(winners: I) -> AwardIntervalResult
where
    I: IntoIterator,
    I::Item: WinningCredit,
{
    select_extremes(producer_intervals(winners))
}

fn consecutive_intervals(producer: String, years: Vec<i32>) -> Vec<ProducerInterval> {
    years
        .windows(2)
        .map(|pair| ProducerInterval {
            producer: producer.clone(),
            interval: pair[1].abs_diff(pair[0]),
            previous_win: pair[0],
            following_win: pair[1],
        })
        .collect()
}

fn select_extremes(intervals: Vec<ProducerInterval>) -> AwardIntervalResult {
    let bounds = intervals.iter().map(|item| item.interval);
    let (Some(min_interval), Some(max_interval)) = (bounds.clone().min(), bounds.max()) else {
        return AwardIntervalResult::default();
    };

    let min = intervals
        .iter()
        .filter(|item| item.interval == min_interval)
        .cloned()
        .collect();
    let max = intervals
        .into_iter()
        .filter(|item| item.interval == max_interval)
        .collect();

    AwardIntervalResult { min, max }
}
