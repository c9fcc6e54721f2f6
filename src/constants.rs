//! Constants used throughout the sampler
//!
//! Centralizes the window geometry, HTTP defaults and timing values so the
//! relationships between them can be checked at compile time.

use std::time::Duration;

/// Ring capacity in samples. One slot per second means the window covers
/// five minutes of history.
pub const WINDOW: usize = 300;

/// Number of samples returned when a request omits `n` or sends something
/// unparsable.
pub const DEFAULT_SAMPLE_COUNT: i64 = 60;

/// Baseline threshold (bytes per tick) used when a request omits `baseline`.
pub const DEFAULT_BASELINE: u64 = 100;

/// Period of the sampling loop. One slot is written per period.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// How long the coordinator waits after cancelling for in-flight requests
/// to drain before the process exits.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(1500);

// Compile-time validation

/// The window must be able to hold more than the default request size,
/// otherwise default requests would always fail range validation.
const _DEFAULT_FITS: () = assert!(
    (DEFAULT_SAMPLE_COUNT as usize) < WINDOW,
    "DEFAULT_SAMPLE_COUNT must be inside the valid (0, WINDOW) range"
);

/// A one-slot ring cannot hold a gradient's predecessor.
const _WINDOW_MIN: () = assert!(WINDOW > 1, "WINDOW must hold at least two samples");
