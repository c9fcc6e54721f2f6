//! Fixed-capacity ring of counter snapshots.
//!
//! One writer (the sampling loop) and arbitrarily many readers (HTTP
//! requests) share the ring without locks. Each counter value lives in an
//! `AtomicU64` accessed with relaxed ordering, so a single value is never
//! observed torn; a read *range* that overlaps the slot currently being
//! overwritten can still mix old and new data for that one slot. At a
//! window of hundreds of seconds against microsecond reads this staleness
//! is accepted rather than locked away. Wrapping the store in an RwLock
//! would restore strict consistency without changing the contract.

use crate::counters::{CounterSet, COUNTER_COUNT};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Debug)]
struct Slot {
    counters: [AtomicU64; COUNTER_COUNT],
}

impl Slot {
    fn new() -> Self {
        Self {
            counters: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

/// Circular buffer of the most recent `window` snapshots plus the cursor,
/// the index of the next slot to be written.
#[derive(Debug)]
pub struct RingStore {
    slots: Box<[Slot]>,
    cursor: AtomicUsize,
}

impl RingStore {
    /// Create a ring with `window` zeroed slots and the cursor at 0.
    pub fn new(window: usize) -> Self {
        debug_assert!(window > 1, "ring needs at least two slots");
        Self {
            slots: (0..window).map(|_| Slot::new()).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Ring capacity in samples.
    #[must_use]
    pub fn window(&self) -> usize {
        self.slots.len()
    }

    /// Next write position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    pub fn set_cursor(&self, position: usize) {
        self.cursor.store(position % self.window(), Ordering::Relaxed);
    }

    /// Store a snapshot at `position`. Never fails: plain atomic stores,
    /// no allocation, no I/O.
    pub fn write(&self, position: usize, snapshot: CounterSet) {
        let slot = &self.slots[position % self.window()];
        for (counter, value) in slot.counters.iter().zip(snapshot) {
            counter.store(value, Ordering::Relaxed);
        }
    }

    /// Load the snapshot at `position`.
    #[must_use]
    pub fn read(&self, position: usize) -> CounterSet {
        let slot = &self.slots[position % self.window()];
        std::array::from_fn(|i| slot.counters[i].load(Ordering::Relaxed))
    }

    /// The `n` most recent snapshots ending just before `end`, oldest
    /// first, each paired with its absolute slot index. Indices are
    /// `(end - n + i) mod window`, so the range wraps across the array
    /// boundary wherever the cursor sits. Range validation is the caller's
    /// job; the store only wraps.
    #[must_use]
    pub fn read_range(&self, end: usize, n: usize) -> Vec<(usize, CounterSet)> {
        let window = self.window();
        (0..n)
            .map(|i| {
                let position = (end + window - n + i) % window;
                (position, self.read(position))
            })
            .collect()
    }
}
