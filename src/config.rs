//! Recorder configuration.
//!
//! [`RecorderConfig`] is fixed when the [`Recorder`](crate::recorder::Recorder)
//! is built; nothing in it changes afterwards.
//!
//! ```rust
//! use chiamate::config::RecorderConfig;
//! use chiamate::recorder::Recorder;
//!
//! let recorder = Recorder::with_config(
//!     RecorderConfig::new()
//!         .history_capacity(50)
//!         .shards(16),
//! );
//! assert_eq!(recorder.config().capacity(), 50);
//! ```

use chrono::{DateTime, FixedOffset, Local};

/// Default number of records kept per key.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Source of call timestamps.
pub type Clock = fn() -> DateTime<FixedOffset>;

/// Local wall clock with its UTC offset.
pub fn local_clock() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Configuration for a [`Recorder`](crate::recorder::Recorder).
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    history_capacity: usize,
    shards: Option<usize>,
    clock: Clock,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            shards: None,
            clock: local_clock,
        }
    }
}

impl RecorderConfig {
    /// Creates the default configuration: 200 records per key, the
    /// registry's default shard count and the local wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many recent calls are kept per key.
    ///
    /// Values less than 1 are treated as 1.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    /// Sets the number of registry shards.
    ///
    /// Rounded up to the next power of two (minimum 2), as required by the
    /// registry map.
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = Some(shards.max(2).next_power_of_two());
        self
    }

    /// Replaces the timestamp source.
    ///
    /// ```rust
    /// use chiamate::config::RecorderConfig;
    /// use chrono::{DateTime, FixedOffset};
    ///
    /// fn frozen() -> DateTime<FixedOffset> {
    ///     DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap()
    /// }
    ///
    /// let config = RecorderConfig::new().clock(frozen);
    /// assert_eq!(config.now(), frozen());
    /// ```
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Records retained per key.
    pub fn capacity(&self) -> usize {
        self.history_capacity
    }

    /// Explicit shard count, if one was set.
    pub fn shard_count(&self) -> Option<usize> {
        self.shards
    }

    /// Reads the configured clock.
    pub fn now(&self) -> DateTime<FixedOffset> {
        (self.clock)()
    }
}
