//! Fixed counter schema tracked per sample.
//!
//! The counter set is part of the build: adding a counter is a schema
//! change, not a runtime operation. Values are always carried in
//! declared-name order.

/// Counter names, in the order they are rendered.
pub const COUNTER_NAMES: [&str; 2] = ["receive_bytes", "transmit_bytes"];

/// Number of counters tracked per sample.
pub const COUNTER_COUNT: usize = COUNTER_NAMES.len();

/// One capture of the counter set for a device at one sampling tick,
/// ordered to match [`COUNTER_NAMES`].
pub type CounterSet = [u64; COUNTER_COUNT];
