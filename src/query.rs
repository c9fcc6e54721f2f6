//! Read-side rendering of the ring history.

use crate::counters::COUNTER_NAMES;
use crate::ring::RingStore;
use std::fmt::Write;
use std::sync::Arc;
use tracing::error;

/// Aggregate of the one-step counter-sum gradients that exceeded the
/// baseline threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineSummary {
    /// How many gradients exceeded the threshold.
    pub above_baseline_count: u64,
    /// Sum of `gradient - threshold` over exactly those gradients.
    pub above_baseline_area_sum: u64,
}

impl BaselineSummary {
    /// Render the two-line plain-text response body.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "above_baseline_count {}\nabove_baseline_area_sum {}\n",
            self.above_baseline_count, self.above_baseline_area_sum
        )
    }
}

/// Reads a requested window from the ring and renders it.
///
/// Both operations are computed against the `(cursor, slots)` pair at call
/// time; see [`RingStore`] for what a concurrent write can do to a range.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    ring: Arc<RingStore>,
}

impl QueryEngine {
    pub fn new(ring: Arc<RingStore>) -> Self {
        Self { ring }
    }

    /// Validate `0 < n < window`. Range errors are recovered locally:
    /// logged here, empty result at the caller.
    fn checked_count(&self, n: i64) -> Option<usize> {
        let window = self.ring.window();
        if n <= 0 || n >= window as i64 {
            error!("query range invalid, need 0 < {} < {}", n, window);
            return None;
        }
        Some(n as usize)
    }

    /// The `n` most recent snapshots, one line per counter per snapshot:
    /// `"<absolute_index> <counter_name> <value>\n"`, oldest snapshot
    /// first, counters in declared order. Out-of-range `n` yields an empty
    /// string.
    #[must_use]
    pub fn raw(&self, n: i64) -> String {
        let Some(n) = self.checked_count(n) else {
            return String::new();
        };

        let mut body = String::new();
        for (position, snapshot) in self.ring.read_range(self.ring.cursor(), n) {
            for (name, value) in COUNTER_NAMES.iter().zip(snapshot) {
                // infallible for String
                let _ = writeln!(body, "{} {} {}", position, name, value);
            }
        }
        body
    }

    /// Baseline-crossing aggregate over the `n` most recent snapshots.
    ///
    /// Each snapshot's gradient is the first difference of its summed
    /// counters against the immediately preceding slot, so `n + 1` slots
    /// are read. Arithmetic wraps: a counter reset or wraparound on the
    /// device produces one absurd gradient, which is a known limitation
    /// rather than something this clamps. Out-of-range `n` yields `None`.
    #[must_use]
    pub fn baseline(&self, threshold: u64, n: i64) -> Option<BaselineSummary> {
        let n = self.checked_count(n)?;

        let mut above_baseline_count = 0;
        let mut above_baseline_area_sum = 0u64;

        let range = self.ring.read_range(self.ring.cursor(), n + 1);
        for pair in range.windows(2) {
            let gradient = sum(pair[1].1).wrapping_sub(sum(pair[0].1));
            if gradient > threshold {
                above_baseline_count += 1;
                above_baseline_area_sum =
                    above_baseline_area_sum.wrapping_add(gradient - threshold);
            }
        }

        Some(BaselineSummary {
            above_baseline_count,
            above_baseline_area_sum,
        })
    }
}

fn sum(snapshot: crate::counters::CounterSet) -> u64 {
    snapshot.iter().fold(0u64, |acc, v| acc.wrapping_add(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_line_format() {
        let ring = Arc::new(RingStore::new(8));
        ring.write(4, [11, 22]);
        ring.set_cursor(5);

        let engine = QueryEngine::new(ring);
        assert_eq!(engine.raw(1), "4 receive_bytes 11\n4 transmit_bytes 22\n");
    }

    #[test]
    fn test_baseline_render_format() {
        let summary = BaselineSummary {
            above_baseline_count: 35,
            above_baseline_area_sum: 531_161,
        };
        assert_eq!(
            summary.render(),
            "above_baseline_count 35\nabove_baseline_area_sum 531161\n"
        );
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let engine = QueryEngine::new(Arc::new(RingStore::new(8)));
        assert_eq!(engine.raw(0), "");
        assert_eq!(engine.raw(8), "");
        assert_eq!(engine.raw(-3), "");
        assert!(engine.baseline(100, 0).is_none());
        assert!(engine.baseline(100, 8).is_none());
    }
}
