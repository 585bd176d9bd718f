// Sliding window: capacity bound and FIFO eviction

mod common;

use common::sample;
use rps_monitor::window::{DEFAULT_WINDOW_CAPACITY, SlidingWindow};

fn values(window: &SlidingWindow) -> Vec<u64> {
    window.values().map(|s| s.value()).collect()
}

#[test]
fn default_capacity_is_thirty() {
    let window = SlidingWindow::default();
    assert_eq!(window.capacity(), 30);
    assert_eq!(DEFAULT_WINDOW_CAPACITY, 30);
    assert!(window.is_empty());
}

#[test]
fn push_below_capacity_keeps_everything_in_order() {
    let mut window = SlidingWindow::new(5);
    for v in [10, 20, 30] {
        window.push(sample(v, v));
    }
    assert_eq!(window.len(), 3);
    assert_eq!(values(&window), vec![10, 20, 30]);
    assert_eq!(window.latest().map(|s| s.value()), Some(30));
}

#[test]
fn push_past_capacity_evicts_oldest_first() {
    let mut window = SlidingWindow::new(30);
    for v in 1..=31 {
        window.push(sample(v, v));
    }
    assert_eq!(window.len(), 30);
    assert_eq!(values(&window), (2..=31).collect::<Vec<_>>());
}

#[test]
fn window_holds_most_recent_samples_for_any_push_count() {
    for capacity in [1usize, 2, 7, 30] {
        let mut window = SlidingWindow::new(capacity);
        for pushed in 1..=(capacity as u64 * 3) {
            window.push(sample(pushed, pushed * 2));
            assert!(window.len() <= capacity);

            let kept = pushed.min(capacity as u64);
            let expected: Vec<u64> = ((pushed - kept + 1)..=pushed).map(|i| i * 2).collect();
            assert_eq!(values(&window), expected, "capacity {capacity}, pushed {pushed}");
        }
    }
}

#[test]
fn values_is_restartable_and_does_not_mutate() {
    let mut window = SlidingWindow::new(4);
    for v in [5, 6, 7] {
        window.push(sample(v, v));
    }
    let iter = window.values();
    let first: Vec<u64> = iter.clone().map(|s| s.value()).collect();
    let second: Vec<u64> = iter.map(|s| s.value()).collect();
    assert_eq!(first, second);
    assert_eq!(window.len(), 3);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut window = SlidingWindow::new(0);
    window.push(sample(1, 1));
    window.push(sample(2, 2));
    assert_eq!(window.capacity(), 1);
    assert_eq!(values(&window), vec![2]);
}

#[test]
fn clear_empties_the_window() {
    let mut window = SlidingWindow::new(3);
    window.push(sample(1, 1));
    window.clear();
    assert!(window.is_empty());
    assert!(window.latest().is_none());
}
