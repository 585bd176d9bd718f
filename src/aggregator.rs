// Statistics over the current window. Pure; the full sum is recomputed on every call.

use crate::models::{Sample, Statistics};

/// Builds the statistics for one tick.
///
/// `current` is the value of the sample that was just pushed; `previous_peak`
/// is the peak carried over from the last tick. The average is the mean of
/// `window`, rounded to the nearest integer with halves rounding up, and 0
/// for an empty window.
pub fn aggregate<'a, I>(window: I, current: u64, previous_peak: u64) -> Statistics
where
    I: IntoIterator<Item = &'a Sample>,
{
    Statistics {
        current,
        peak: previous_peak.max(current),
        average: rounded_mean(window.into_iter().map(Sample::value)),
    }
}

/// Integer mean rounded half-up; 0 when there are no values.
pub fn rounded_mean(values: impl IntoIterator<Item = u64>) -> u64 {
    let (sum, count) = values
        .into_iter()
        .fold((0u128, 0u128), |(sum, count), v| (sum + v as u128, count + 1));
    if count == 0 {
        return 0;
    }
    ((sum + count / 2) / count) as u64
}
