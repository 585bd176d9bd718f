// Aggregation: current/peak/average over the window

mod common;

use common::sample;
use rps_monitor::aggregator::{aggregate, rounded_mean};
use rps_monitor::models::{Sample, Statistics};
use rps_monitor::window::SlidingWindow;

#[test]
fn three_values_give_expected_statistics() {
    let mut window = SlidingWindow::new(30);
    let mut stats = Statistics::default();
    for v in [10, 20, 30] {
        window.push(sample(v, v));
        stats = aggregate(window.values(), v, stats.peak);
    }
    assert_eq!(
        stats,
        Statistics {
            current: 30,
            peak: 30,
            average: 20
        }
    );
}

#[test]
fn thirty_one_values_average_over_last_thirty() {
    let mut window = SlidingWindow::new(30);
    let mut stats = Statistics::default();
    for v in 1..=31 {
        window.push(sample(v, v));
        stats = aggregate(window.values(), v, stats.peak);
    }
    // (2 + ... + 31) / 30 = 16.5, rounds up
    assert_eq!(stats.current, 31);
    assert_eq!(stats.peak, 31);
    assert_eq!(stats.average, 17);
}

#[test]
fn empty_window_averages_to_zero() {
    let empty: Vec<Sample> = vec![];
    let stats = aggregate(&empty, 0, 0);
    assert_eq!(stats.average, 0);
    assert_eq!(rounded_mean(std::iter::empty()), 0);
}

#[test]
fn peak_carries_over_when_current_drops() {
    let window = vec![sample(1, 5)];
    let stats = aggregate(&window, 5, 90);
    assert_eq!(stats.current, 5);
    assert_eq!(stats.peak, 90);
}

#[test]
fn aggregate_is_idempotent_for_same_window() {
    let window: Vec<Sample> = [3, 8, 13, 2].iter().map(|&v| sample(v, v)).collect();
    let a = aggregate(&window, 2, 13);
    let b = aggregate(&window, 2, 13);
    assert_eq!(a, b);
    assert_eq!(a.average, 7); // 26 / 4 = 6.5
}

#[test]
fn rounded_mean_rounds_to_nearest() {
    assert_eq!(rounded_mean([1, 2]), 2);
    assert_eq!(rounded_mean([1, 1, 2]), 1);
    assert_eq!(rounded_mean([1, 2, 2]), 2);
    assert_eq!(rounded_mean([7]), 7);
}

#[test]
fn rounded_mean_does_not_overflow_on_large_values() {
    assert_eq!(rounded_mean([u64::MAX, u64::MAX]), u64::MAX);
}

#[test]
fn peak_never_decreases_across_ticks() {
    let mut window = SlidingWindow::new(4);
    let mut stats = Statistics::default();
    let mut last_peak = 0;
    for (i, v) in [40, 12, 90, 3, 55, 91, 0, 17].into_iter().enumerate() {
        window.push(sample(i as u64, v));
        stats = aggregate(window.values(), v, stats.peak);
        assert!(stats.peak >= last_peak);
        last_peak = stats.peak;
    }
    assert_eq!(stats.peak, 91);
}
