// Bounded FIFO history of samples

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::models::Sample;

pub const DEFAULT_WINDOW_CAPACITY: usize = 30;

/// Keeps the most recent `capacity` samples in arrival order.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

impl SlidingWindow {
    /// A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends at the back and evicts from the front until `len() == capacity`.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Samples oldest first. The iterator is `Clone`, so it can be restarted.
    pub fn values(&self) -> vec_deque::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }
}
