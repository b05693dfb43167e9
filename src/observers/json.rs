//! JSON observer for exporting usage snapshots.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! chiamate = { version = "0.1", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use chiamate::observers::json::JsonObserver;
//!
//! let json = JsonObserver::new()
//!     .include_history(false)
//!     .to_json(&recorder.snapshot())?;
//! // {"taken_at":"2024-06-01T12:00:00+02:00","entries":[{"key":"Cart#add","count":2}]}
//! ```

use std::io;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::key::MethodKey;
use crate::observers::Result;
use crate::snapshot::UsageSnapshot;

/// Configuration for the JSON observer.
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether each entry carries its retained calls.
    pub include_history: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            include_history: true,
        }
    }
}

#[derive(Serialize)]
struct CountsOnly<'a> {
    taken_at: DateTime<FixedOffset>,
    entries: Vec<CountEntry<'a>>,
}

#[derive(Serialize)]
struct CountEntry<'a> {
    key: &'a MethodKey,
    count: u64,
}

/// An observer that serializes a [`UsageSnapshot`] to JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonObserver {
    config: JsonConfig,
}

impl JsonObserver {
    /// Creates a JSON observer with default settings (compact, with history).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a JSON observer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables per-key history in the output.
    pub fn include_history(mut self, enabled: bool) -> Self {
        self.config.include_history = enabled;
        self
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self, snapshot: &UsageSnapshot) -> Result<String> {
        let json = if self.config.include_history {
            self.serialize(snapshot)?
        } else {
            self.serialize(&Self::counts_only(snapshot))?
        };
        Ok(json)
    }

    /// Serializes the snapshot into an I/O sink.
    pub fn write_to<W: io::Write + ?Sized>(&self, snapshot: &UsageSnapshot, sink: &mut W) -> Result<()> {
        sink.write_all(self.to_json(snapshot)?.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn serialize<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }

    fn counts_only(snapshot: &UsageSnapshot) -> CountsOnly<'_> {
        CountsOnly {
            taken_at: snapshot.taken_at(),
            entries: snapshot
                .iter()
                .map(|usage| CountEntry {
                    key: &usage.key,
                    count: usage.count,
                })
                .collect(),
        }
    }
}
