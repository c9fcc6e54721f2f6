//! Network interface statistics sampler.
//!
//! A single sampling loop polls kernel link counters for one device every
//! second and writes them into a fixed-capacity ring buffer. HTTP handlers
//! read the buffer concurrently and render the history either raw or
//! aggregated against a baseline threshold.
//!
//! The ring is shared by exactly one writer and many readers without locks;
//! see [`ring::RingStore`] for the consistency trade-off this implies.

pub mod args;
pub mod config;
pub mod constants;
pub mod counters;
pub mod filter;
pub mod logging;
pub mod provider;
pub mod query;
pub mod ring;
pub mod sampler;
pub mod server;

pub use config::{create_default_config, load_config, load_config_with_fallback, Config};
pub use counters::{CounterSet, COUNTER_COUNT, COUNTER_NAMES};
pub use filter::DeviceFilter;
pub use provider::{NetDevProvider, ProviderError, StatsProvider};
pub use query::{BaselineSummary, QueryEngine};
pub use ring::RingStore;
pub use sampler::{Sampler, SamplerError};
