//! Point-in-time view of the recorder.
//!
//! A [`UsageSnapshot`] is what every observer renders. It is produced by
//! [`Recorder::snapshot`](crate::recorder::Recorder::snapshot) and is
//! already sorted: descending call count, ties broken by ascending key.
//!
//! With the `serde` feature both types are serializable, which is how the
//! JSON observer exports them.
//!
//! # Examples
//!
//! ```rust
//! use chiamate::recorder::Recorder;
//! use chiamate::record;
//!
//! let recorder = Recorder::new();
//! for _ in 0..3 {
//!     record!(recorder, "Y");
//! }
//! record!(recorder, "X");
//!
//! let snapshot = recorder.snapshot();
//! let keys: Vec<_> = snapshot.iter().map(|u| u.key.as_str()).collect();
//! assert_eq!(keys, vec!["Y", "X"]);
//! assert_eq!(snapshot.total_calls(), 4);
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};

use crate::key::MethodKey;
use crate::record::CallRecord;

/// Usage of a single key at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyUsage {
    /// The observed key.
    pub key: MethodKey,
    /// Number of recorded calls.
    pub count: u64,
    /// Retained calls, oldest first.
    pub history: Vec<CallRecord>,
}

impl KeyUsage {
    /// Report order: higher counts first, equal counts by key.
    pub fn report_order(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Sorted usage of every key seen by a recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageSnapshot {
    taken_at: DateTime<FixedOffset>,
    entries: Vec<KeyUsage>,
}

impl UsageSnapshot {
    /// Builds a snapshot, sorting `entries` into report order.
    pub fn new(taken_at: DateTime<FixedOffset>, mut entries: Vec<KeyUsage>) -> Self {
        entries.sort_by(KeyUsage::report_order);
        Self { taken_at, entries }
    }

    /// When the snapshot was taken.
    pub fn taken_at(&self) -> DateTime<FixedOffset> {
        self.taken_at
    }

    /// All entries in report order.
    pub fn entries(&self) -> &[KeyUsage] {
        &self.entries
    }

    /// Iterates entries in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeyUsage> {
        self.entries.iter()
    }

    /// Finds the entry for `key`.
    pub fn get(&self, key: &str) -> Option<&KeyUsage> {
        self.entries.iter().find(|usage| usage.key.as_str() == key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_calls(&self) -> u64 {
        self.entries.iter().map(|usage| usage.count).sum()
    }
}

impl<'a> IntoIterator for &'a UsageSnapshot {
    type Item = &'a KeyUsage;
    type IntoIter = std::slice::Iter<'a, KeyUsage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
