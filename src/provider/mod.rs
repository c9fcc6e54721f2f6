//! Statistics source adapters
//!
//! The sampling loop only needs "the counter set for every in-scope
//! interface, or an error". [`StatsProvider`] is that seam; the production
//! implementation reads the kernel's per-interface counter table.

mod netdev;

pub use netdev::NetDevProvider;

use crate::counters::CounterSet;
use std::collections::HashMap;
use thiserror::Error;

/// Error fetching a snapshot from the statistics source
///
/// Fetches are all-or-nothing: any unreadable source or malformed row fails
/// the whole call, never a partial result.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("statistics source unreachable: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed statistics for {device}: {reason}")]
    Parse { device: String, reason: String },
}

/// Source of per-device counter snapshots.
pub trait StatsProvider: Send + Sync {
    /// Fetch the current counter set for every in-scope interface.
    fn fetch(&self) -> Result<HashMap<String, CounterSet>, ProviderError>;
}
